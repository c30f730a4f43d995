use std::fmt;

use log::debug;
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use structures::{Color, Coordinate, Size};

use crate::constants::{FIELD_ID, FIELD_NAME, PROJECT_FIELD_LAYERS, PROJECT_FIELD_SIZE};
use crate::events::{Listener, ProjectEvent};
use crate::layer::CulledLayer;
use crate::{Layer, LayerId, ProjectId};

/// A canvas size plus an ordered stack of layers.
///
/// Layers are painted in the order they were added: the first layer is the
/// backdrop, the last one sits on top.
pub struct Project {
    id: ProjectId,
    name: String,
    size: Size,
    layers: Vec<Layer>,
    listeners: Vec<Listener>,
}

impl Project {
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            size,
            layers: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    /// Direct access to a layer. Changes made through the returned reference
    /// are not reported to listeners.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id() == id)
    }

    /// Registers a listener that is called after every change made through
    /// this project.
    pub fn subscribe(&mut self, listener: impl FnMut(&ProjectEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, event: ProjectEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        let name = self.name.clone();
        self.notify(ProjectEvent::Renamed { name });
    }

    /// Creates a layer on top of the stack.
    pub fn add_layer(&mut self, name: impl Into<String>) -> &mut Layer {
        let mut layer = Layer::new(name);
        layer.attach(self.id);
        let id = layer.id();
        self.layers.push(layer);

        self.notify(ProjectEvent::LayerAdded { layer: id });

        let index = self.layers.len() - 1;
        &mut self.layers[index]
    }

    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        let index = self.layers.iter().position(|layer| layer.id() == id)?;
        let mut layer = self.layers.remove(index);
        layer.detach();

        self.notify(ProjectEvent::LayerRemoved { layer: id });
        Some(layer)
    }

    /// Returns `false` if no layer with `id` belongs to this project.
    pub fn rename_layer(&mut self, id: LayerId, name: impl Into<String>) -> bool {
        let name = name.into();
        let Some(layer) = self.layer_mut(id) else {
            return false;
        };
        layer.set_name(name.clone());

        self.notify(ProjectEvent::LayerRenamed { layer: id, name });
        true
    }

    /// Sets a pixel on one of this project's layers and reports it.
    /// Returns `false` if no layer with `id` belongs to this project.
    pub fn set_pixel(&mut self, id: LayerId, coordinate: Coordinate, color: Color) -> bool {
        let Some(layer) = self.layer_mut(id) else {
            return false;
        };
        layer.set(coordinate, color);

        self.notify(ProjectEvent::PixelSet {
            layer: id,
            coordinate,
            color,
        });
        true
    }

    /// Changes the canvas size and culls every layer against it before
    /// returning.
    pub fn set_size(&mut self, size: Size) {
        let from = self.size;
        self.size = size;
        for layer in self.layers.iter_mut() {
            layer.resize(size);
        }

        debug!(
            "Resized project {} from {}x{} to {}x{}",
            self.id, from.width, from.height, size.width, size.height
        );
        self.notify(ProjectEvent::Resized { from, to: size });
    }

    /// Restores the stored-pixel invariant on every layer. Returns the total
    /// number of pixels removed.
    pub fn cull(&mut self) -> usize {
        let size = self.size;
        self.layers.iter_mut().map(|layer| layer.cull(size)).sum()
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("size", &self.size)
            .field("layers", &self.layers)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

struct CulledLayers<'a> {
    layers: &'a [Layer],
    size: Size,
}

impl Serialize for CulledLayers<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.layers.len()))?;
        for layer in self.layers {
            seq.serialize_element(&CulledLayer {
                layer,
                size: self.size,
            })?;
        }
        seq.end()
    }
}

// Layers are written as if culled, so a document never holds pixels that are
// out of bounds or transparent.
impl Serialize for Project {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut document = serializer.serialize_map(Some(4))?;
        document.serialize_entry(&FIELD_ID, &self.id)?;
        document.serialize_entry(&FIELD_NAME, &self.name)?;
        document.serialize_entry(
            &PROJECT_FIELD_LAYERS,
            &CulledLayers {
                layers: &self.layers,
                size: self.size,
            },
        )?;
        document.serialize_entry(&PROJECT_FIELD_SIZE, &self.size)?;
        document.end()
    }
}

impl<'de> Deserialize<'de> for Project {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ProjectVisitor)
    }
}

struct ProjectVisitor;

impl<'de> Visitor<'de> for ProjectVisitor {
    type Value = Project;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a project document keyed by field number")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Project, A::Error> {
        let mut id = None;
        let mut name = None;
        let mut layers = None;
        let mut size = None;

        while let Some(field) = map.next_key::<u64>()? {
            match field {
                FIELD_ID => {
                    if id.is_some() {
                        return Err(de::Error::duplicate_field("id"));
                    }
                    id = Some(map.next_value::<ProjectId>()?);
                }
                FIELD_NAME => {
                    if name.is_some() {
                        return Err(de::Error::duplicate_field("name"));
                    }
                    name = Some(map.next_value::<String>()?);
                }
                PROJECT_FIELD_LAYERS => {
                    if layers.is_some() {
                        return Err(de::Error::duplicate_field("layers"));
                    }
                    layers = Some(map.next_value::<Vec<Layer>>()?);
                }
                PROJECT_FIELD_SIZE => {
                    if size.is_some() {
                        return Err(de::Error::duplicate_field("size"));
                    }
                    size = Some(map.next_value::<Size>()?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        let id: ProjectId = id.ok_or_else(|| de::Error::missing_field("id"))?;
        let size: Size = size.ok_or_else(|| de::Error::missing_field("size"))?;
        let mut layers: Vec<Layer> = layers.ok_or_else(|| de::Error::missing_field("layers"))?;
        // Alpha narrowing can turn a barely visible pixel into a transparent one.
        for layer in layers.iter_mut() {
            layer.attach(id);
            layer.cull(size);
        }

        Ok(Project {
            id,
            name: name.ok_or_else(|| de::Error::missing_field("name"))?,
            size,
            layers,
            listeners: Vec::new(),
        })
    }
}
