use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use structures::{Color, Coordinate, Size};

use crate::constants::{FIELD_ID, FIELD_NAME, LAYER_FIELD_PIXELS};
use crate::{LayerId, ProjectId};

/// A sparse pixel canvas. Only pixels that were explicitly set are stored;
/// a missing coordinate is transparent.
///
/// Writes are not checked against any canvas size. Out-of-bounds and fully
/// transparent pixels linger until the layer is culled, which happens when the
/// owning project is resized or encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: LayerId,
    name: String,
    project: Option<ProjectId>,
    storage: HashMap<Coordinate, Color>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: LayerId::new(),
            name: name.into(),
            project: None,
            storage: HashMap::new(),
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The project this layer was added to, if any.
    pub fn project(&self) -> Option<ProjectId> {
        self.project
    }

    pub(crate) fn attach(&mut self, project: ProjectId) {
        self.project = Some(project);
    }

    pub(crate) fn detach(&mut self) {
        self.project = None;
    }

    pub fn set(&mut self, coordinate: Coordinate, color: Color) {
        self.storage.insert(coordinate, color);
    }

    pub fn get(&self, coordinate: Coordinate) -> Option<&Color> {
        self.storage.get(&coordinate)
    }

    pub fn remove(&mut self, coordinate: Coordinate) -> Option<Color> {
        self.storage.remove(&coordinate)
    }

    pub fn clear(&mut self) {
        self.storage.clear();
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Every stored pixel, in no particular order.
    pub fn pixels(&self) -> impl Iterator<Item = (Coordinate, &Color)> {
        self.storage.iter().map(|(coordinate, color)| (*coordinate, color))
    }

    /// Stored pixels inside `size`, in row-major order. Transparent pixels
    /// that have not been culled yet are included.
    pub fn pixels_in_paint_order(&self, size: Size) -> Vec<(Coordinate, &Color)> {
        let mut pixels: Vec<_> = self
            .pixels()
            .filter(|(coordinate, _)| coordinate.is_within(size))
            .collect();
        pixels.sort_unstable_by_key(|(coordinate, _)| *coordinate);
        pixels
    }

    /// Drops pixels outside `size` and pixels with `alpha <= 0.0`.
    /// Returns how many were removed.
    pub fn cull(&mut self, size: Size) -> usize {
        let before = self.storage.len();
        self.storage
            .retain(|coordinate, color| coordinate.is_within(size) && color.is_visible());

        let removed = before - self.storage.len();
        if removed > 0 {
            debug!(
                "Culled {} pixels from layer {} against {}x{}",
                removed, self.id, size.width, size.height
            );
        }
        removed
    }

    /// A layer has no size of its own, resizing it is a cull against the
    /// project's new size.
    pub fn resize(&mut self, size: Size) {
        self.cull(size);
    }

    pub(crate) fn serialize_document<S: Serializer>(
        &self,
        serializer: S,
        within: Option<Size>,
    ) -> Result<S::Ok, S::Error> {
        let pixels = match within {
            Some(size) => self
                .pixels_in_paint_order(size)
                .into_iter()
                .filter(|(_, color)| color.is_visible())
                .collect(),
            None => {
                let mut pixels: Vec<_> = self.pixels().collect();
                pixels.sort_unstable_by_key(|(coordinate, _)| *coordinate);
                pixels
            }
        };

        let mut document = serializer.serialize_map(Some(3))?;
        document.serialize_entry(&FIELD_ID, &self.id)?;
        document.serialize_entry(&FIELD_NAME, &self.name)?;
        document.serialize_entry(&LAYER_FIELD_PIXELS, &PixelMap(&pixels))?;
        document.end()
    }
}

struct PixelMap<'a>(&'a [(Coordinate, &'a Color)]);

impl Serialize for PixelMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (coordinate, color) in self.0 {
            map.serialize_entry(coordinate, color)?;
        }
        map.end()
    }
}

/// Layer document wrapper that only writes pixels valid for `size`.
pub(crate) struct CulledLayer<'a> {
    pub layer: &'a Layer,
    pub size: Size,
}

impl Serialize for CulledLayer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.layer.serialize_document(serializer, Some(self.size))
    }
}

impl Serialize for Layer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.serialize_document(serializer, None)
    }
}

impl<'de> Deserialize<'de> for Layer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LayerVisitor)
    }
}

struct LayerVisitor;

impl<'de> Visitor<'de> for LayerVisitor {
    type Value = Layer;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a layer document keyed by field number")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Layer, A::Error> {
        let mut id = None;
        let mut name = None;
        let mut storage = None;

        while let Some(field) = map.next_key::<u64>()? {
            match field {
                FIELD_ID => {
                    if id.is_some() {
                        return Err(de::Error::duplicate_field("id"));
                    }
                    id = Some(map.next_value::<LayerId>()?);
                }
                FIELD_NAME => {
                    if name.is_some() {
                        return Err(de::Error::duplicate_field("name"));
                    }
                    name = Some(map.next_value::<String>()?);
                }
                LAYER_FIELD_PIXELS => {
                    if storage.is_some() {
                        return Err(de::Error::duplicate_field("pixels"));
                    }
                    storage = Some(map.next_value::<HashMap<Coordinate, Color>>()?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(Layer {
            id: id.ok_or_else(|| de::Error::missing_field("id"))?,
            name: name.ok_or_else(|| de::Error::missing_field("name"))?,
            project: None,
            storage: storage.ok_or_else(|| de::Error::missing_field("pixels"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use structures::{Color, Coordinate, Size};

    use super::Layer;

    fn scenario_layer() -> Layer {
        let mut layer = Layer::new("Testing Layers");
        layer.set(Coordinate::new(8, 8), Color::opaque(128, 0, 170));
        layer.set(Coordinate::new(9, 7), Color::opaque(128, 78, 0));
        layer.set(Coordinate::new(7, 5), Color::opaque(128, 123, 85));
        layer
    }

    #[test]
    fn new_layers_are_empty_and_detached() {
        let layer = Layer::new("empty");

        assert!(layer.is_empty());
        assert_eq!(layer.project(), None);
        assert_ne!(layer.id(), Layer::new("empty").id());
    }

    #[test]
    fn set_is_an_upsert_without_bounds_checks() {
        let mut layer = Layer::new("layer-1");
        let far_away = Coordinate::new(u16::MAX, u16::MAX);

        layer.set(far_away, Color::opaque(1, 1, 1));
        layer.set(far_away, Color::opaque(2, 2, 2));

        assert_eq!(layer.len(), 1);
        assert_eq!(layer.get(far_away), Some(&Color::opaque(2, 2, 2)));
        assert_eq!(layer.get(Coordinate::new(0, 0)), None);
    }

    #[test]
    fn cull_removes_out_of_bounds_pixels() {
        let mut layer = scenario_layer();

        assert_eq!(layer.cull(Size::new(8, 8)), 2);
        assert_eq!(layer.get(Coordinate::new(8, 8)), None);
        assert_eq!(layer.get(Coordinate::new(9, 7)), None);
        assert_eq!(
            layer.get(Coordinate::new(7, 5)),
            Some(&Color::opaque(128, 123, 85))
        );
    }

    #[test]
    fn transparent_pixels_survive_until_culled() {
        let mut layer = Layer::new("layer-1");
        let coordinate = Coordinate::new(1, 1);
        layer.set(coordinate, Color::new(10, 20, 30, 0.0));

        assert_eq!(layer.get(coordinate), Some(&Color::new(10, 20, 30, 0.0)));

        layer.resize(Size::new(16, 16));
        assert_eq!(layer.get(coordinate), None);
    }

    #[test]
    fn cull_is_idempotent() {
        let mut layer = scenario_layer();

        layer.cull(Size::new(8, 8));
        assert_eq!(layer.cull(Size::new(8, 8)), 0);
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn paint_order_is_row_major_and_skips_out_of_bounds_pixels() {
        let mut layer = scenario_layer();
        layer.set(Coordinate::new(0, 7), Color::new(0, 0, 0, 0.0));
        layer.set(Coordinate::new(2, 7), Color::opaque(0, 0, 0));

        let order: Vec<_> = layer
            .pixels_in_paint_order(Size::new(9, 9))
            .into_iter()
            .map(|(coordinate, _)| coordinate)
            .collect();

        assert_eq!(
            order,
            vec![
                Coordinate::new(7, 5),
                Coordinate::new(0, 7),
                Coordinate::new(2, 7),
                Coordinate::new(8, 8),
            ]
        );
    }

    #[test]
    fn cull_drops_alpha_that_narrows_to_zero() {
        let mut layer = Layer::new("layer-1");
        layer.set(Coordinate::new(1, 1), Color::new(1, 2, 3, 1e-46));
        layer.set(Coordinate::new(2, 2), Color::new(1, 2, 3, 1e-30));

        assert_eq!(layer.cull(Size::new(4, 4)), 1);
        assert_eq!(layer.get(Coordinate::new(1, 1)), None);
        assert!(layer.get(Coordinate::new(2, 2)).is_some());
    }

    #[test]
    fn decodes_with_unknown_fields() {
        let layer = scenario_layer();
        let mut document: serde_json::Value = serde_json::to_value(&layer).unwrap();
        document["7"] = serde_json::json!(["from", "the", "future"]);

        let decoded: Layer = serde_json::from_value(document).unwrap();
        assert_eq!(decoded, layer);
    }

    #[test]
    fn missing_fields_fail_to_decode() {
        let layer = scenario_layer();
        let mut document: serde_json::Value = serde_json::to_value(&layer).unwrap();
        document.as_object_mut().unwrap().remove("1");

        assert!(serde_json::from_value::<Layer>(document).is_err());
    }
}
