//! Whole-project encoding.
//!
//! MessagePack is the native on-disk form, JSON is available for tooling.
//! Both go through the same field-numbered document layout. Encoding culls
//! the project first, so stale pixels are dropped from memory as well as from
//! the output.

use std::io::{Read, Write};

use log::debug;
use rmp_serde::{Deserializer, Serializer};
use serde::de::Deserialize;
use serde::ser::Serialize;

use crate::{DocumentError, Project};

pub fn encode(project: &mut Project) -> Result<Vec<u8>, DocumentError> {
    let mut buf = Vec::new();
    write_to(project, &mut buf)?;
    Ok(buf)
}

pub fn write_to<W: Write>(project: &mut Project, dest: W) -> Result<(), DocumentError> {
    let culled = project.cull();
    debug!(
        "Encoding project {} ({} layers, {} stale pixels culled)",
        project.id(),
        project.layer_count(),
        culled
    );

    let mut serializer = Serializer::new(dest);
    project
        .serialize(&mut serializer)
        .map_err(|err| DocumentError::CouldNotEncode(err.to_string()))
}

pub fn decode(data: &[u8]) -> Result<Project, DocumentError> {
    read_from(data)
}

pub fn read_from<R: Read>(source: R) -> Result<Project, DocumentError> {
    let mut deserializer = Deserializer::new(source);
    Deserialize::deserialize(&mut deserializer)
        .map_err(|err: rmp_serde::decode::Error| DocumentError::CouldNotDecode(err.to_string()))
}

pub fn encode_json(project: &mut Project) -> Result<String, DocumentError> {
    project.cull();
    serde_json::to_string_pretty(project).map_err(|err| DocumentError::CouldNotEncode(err.to_string()))
}

pub fn decode_json(data: &str) -> Result<Project, DocumentError> {
    serde_json::from_str(data).map_err(|err| DocumentError::CouldNotDecode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use structures::{Color, Coordinate, Size};

    use super::{decode, decode_json, encode, encode_json};
    use crate::{DocumentError, Project};

    fn test_project() -> Project {
        let mut project = Project::new("Test Project", Size::new(16, 16));
        let layer = project.add_layer("Testing Layers");

        layer.set(Coordinate::new(8, 8), Color::opaque(128, 0, 170));
        layer.set(Coordinate::new(9, 7), Color::opaque(128, 78, 0));
        layer.set(Coordinate::new(7, 5), Color::opaque(128, 123, 85));

        project
    }

    fn assert_same_project(left: &Project, right: &Project) {
        assert_eq!(left.id(), right.id());
        assert_eq!(left.name(), right.name());
        assert_eq!(left.size(), right.size());
        assert_eq!(left.layer_count(), right.layer_count());

        for (l, r) in left.layers().iter().zip(right.layers()) {
            assert_eq!(l.id(), r.id());
            assert_eq!(l.name(), r.name());
            assert_eq!(r.project(), Some(right.id()));
            assert_eq!(l.len(), r.len());
            for (coordinate, color) in l.pixels() {
                let decoded = r.get(coordinate).unwrap();
                assert_eq!((decoded.red, decoded.green, decoded.blue), (color.red, color.green, color.blue));
                assert_eq!(decoded.alpha, color.alpha as f32 as f64);
            }
        }
    }

    #[test]
    fn message_pack_round_trip() {
        env_logger::try_init().ok();

        let mut project = test_project();
        project.add_layer("Second").set(Coordinate::new(0, 0), Color::new(1, 2, 3, 0.1));

        let data = encode(&mut project).unwrap();
        let decoded = decode(&data).unwrap();

        assert_same_project(&project, &decoded);
    }

    #[test]
    fn json_round_trip() {
        let mut project = test_project();

        let json = encode_json(&mut project).unwrap();
        let decoded = decode_json(&json).unwrap();

        assert_same_project(&project, &decoded);
    }

    #[test]
    fn alpha_too_small_for_the_document_is_culled_on_encode() {
        let mut project = test_project();
        let layer = project.layers()[0].id();
        let faint = Coordinate::new(1, 1);
        project.set_pixel(layer, faint, Color::new(1, 2, 3, 1e-46));

        let json = encode_json(&mut project).unwrap();
        let decoded = decode_json(&json).unwrap();

        assert_eq!(project.layer(layer).unwrap().get(faint), None);
        assert_eq!(decoded.layers()[0].len(), project.layers()[0].len());
        assert_same_project(&project, &decoded);
    }

    #[test]
    fn encoding_culls_stale_pixels() {
        let mut project = test_project();
        let layer = project.layers()[0].id();
        let transparent = Coordinate::new(3, 3);
        project.set_pixel(layer, transparent, Color::new(0, 0, 0, 0.0));
        project.set_pixel(layer, Coordinate::new(20, 0), Color::opaque(0, 0, 0));

        assert!(project.layer(layer).unwrap().get(transparent).is_some());

        let decoded = decode(&encode(&mut project).unwrap()).unwrap();

        assert_eq!(project.layer(layer).unwrap().get(transparent), None);
        assert_eq!(project.layer(layer).unwrap().len(), 3);
        assert_eq!(decoded.layers()[0].len(), 3);
    }

    #[test]
    fn serializing_a_borrowed_project_skips_stale_pixels() {
        let mut project = Project::new("Borrowed", Size::new(2, 2));
        let layer = project.add_layer("layer-1");
        layer.set(Coordinate::new(1, 1), Color::opaque(9, 9, 9));
        layer.set(Coordinate::new(2, 1), Color::opaque(9, 9, 9));
        layer.set(Coordinate::new(0, 0), Color::new(9, 9, 9, -1.0));

        let value = serde_json::to_value(&project).unwrap();

        assert_eq!(project.layers()[0].len(), 3);
        assert_eq!(value["2"][0]["2"].as_object().unwrap().len(), 1);
        assert!(value["2"][0]["2"].get("65537").is_some());
    }

    #[test]
    fn document_layout_uses_field_numbers() {
        let mut project = test_project();
        let json = encode_json(&mut project).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["1"], "Test Project");
        assert_eq!(value["3"], 0x0010_0010u32);
        assert_eq!(value["2"][0]["1"], "Testing Layers");
        assert_eq!(value["2"][0]["2"]["458757"], 0x80_7b_55_00_3f_80_00_00u64);
    }

    #[test]
    fn malformed_documents_fail_to_decode() {
        assert!(matches!(decode(&[0xc1]), Err(DocumentError::CouldNotDecode(_))));
        assert!(matches!(decode(&[]), Err(DocumentError::CouldNotDecode(_))));
        assert!(matches!(
            decode_json("{\"0\": \"not-a-uuid\", \"1\": \"x\", \"2\": [], \"3\": 0}"),
            Err(DocumentError::CouldNotDecode(_))
        ));

        let mut project = test_project();
        let json = encode_json(&mut project).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["2"][0]["2"]["458757"] = serde_json::json!(0x80_7b_55_ff_3f_80_00_00u64);

        assert!(matches!(
            decode_json(&value.to_string()),
            Err(DocumentError::CouldNotDecode(_))
        ));
    }

    #[test]
    fn decoding_culls_foreign_documents() {
        let json = serde_json::json!({
            "0": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "1": "Foreign",
            "2": [{
                "0": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
                "1": "layer-1",
                "2": {
                    "65537": 0x01_02_03_00_3f_80_00_00u64,
                    "262144": 0x01_02_03_00_3f_80_00_00u64,
                    "2": 0x01_02_03_00_00_00_00_00u64,
                },
            }],
            "3": 0x0004_0004u32,
        });

        let decoded = decode_json(&json.to_string()).unwrap();

        assert_eq!(decoded.layers()[0].len(), 1);
        assert_eq!(
            decoded.layers()[0].get(Coordinate::new(1, 1)),
            Some(&Color::opaque(1, 2, 3))
        );
    }

    #[test]
    fn unknown_project_fields_are_ignored() {
        let mut project = test_project();
        let json = encode_json(&mut project).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["4"] = serde_json::json!({ "thumbnail": null });

        let decoded = decode_json(&value.to_string()).unwrap();
        assert_same_project(&project, &decoded);
    }
}
