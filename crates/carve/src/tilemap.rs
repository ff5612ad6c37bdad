//! Layered tile map produced by carving.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::TileMapError;
use crate::grid::Grid;

pub const FLOOR_LAYER: &str = "floor";
pub const WALLS_LAYER: &str = "walls";
pub const DOORS_LAYER: &str = "doors";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Grid,
    Object,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayerContent {
    Grid(Grid),
    Object { objects: Vec<MapObject> },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: u32,
    pub name: String,
    pub visible: bool,
    pub opacity: f32,
    pub content: LayerContent,
}

impl Layer {
    pub fn kind(&self) -> LayerKind {
        match self.content {
            LayerContent::Grid(_) => LayerKind::Grid,
            LayerContent::Object { .. } => LayerKind::Object,
        }
    }

    pub fn grid(&self) -> Option<&Grid> {
        match &self.content {
            LayerContent::Grid(grid) => Some(grid),
            LayerContent::Object { .. } => None,
        }
    }

    pub fn grid_mut(&mut self) -> Option<&mut Grid> {
        match &mut self.content {
            LayerContent::Grid(grid) => Some(grid),
            LayerContent::Object { .. } => None,
        }
    }

    pub fn objects(&self) -> Option<&[MapObject]> {
        match &self.content {
            LayerContent::Object { objects } => Some(objects),
            LayerContent::Grid(_) => None,
        }
    }

    pub fn objects_mut(&mut self) -> Option<&mut Vec<MapObject>> {
        match &mut self.content {
            LayerContent::Object { objects } => Some(objects),
            LayerContent::Grid(_) => None,
        }
    }
}

/// Point or region annotation on an object layer. Coordinates are in pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub rotation: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_id: Option<u32>,
    pub visible: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl MapObject {
    pub fn new(id: u32, name: impl Into<String>, object_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            object_type: object_type.into(),
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            rotation: 0,
            tile_id: None,
            visible: true,
            properties: BTreeMap::new(),
        }
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    pub width: usize,
    pub height: usize,
    pub tile_width: u32,
    pub tile_height: u32,
    pub layers: BTreeMap<String, Layer>,
}

impl TileMap {
    pub fn new(
        width: i32,
        height: i32,
        tile_width: u32,
        tile_height: u32,
    ) -> Result<Self, TileMapError> {
        if width <= 0 || height <= 0 || tile_width == 0 || tile_height == 0 {
            return Err(TileMapError::InvalidDimensions { width, height, tile_width, tile_height });
        }
        Ok(Self {
            width: width as usize,
            height: height as usize,
            tile_width,
            tile_height,
            layers: BTreeMap::new(),
        })
    }

    /// Registers an empty layer. Ids follow insertion order starting at 1.
    pub fn add_layer(&mut self, name: &str, kind: LayerKind) -> Result<&mut Layer, TileMapError> {
        if self.layers.contains_key(name) {
            return Err(TileMapError::DuplicateLayer(name.to_string()));
        }
        let content = match kind {
            LayerKind::Grid => LayerContent::Grid(Grid::new(self.width, self.height)),
            LayerKind::Object => LayerContent::Object { objects: Vec::new() },
        };
        let layer = Layer {
            id: self.layers.len() as u32 + 1,
            name: name.to_string(),
            visible: true,
            opacity: 1.0,
            content,
        };
        Ok(self.layers.entry(name.to_string()).or_insert(layer))
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.get_mut(name)
    }

    pub fn grid(&self, name: &str) -> Option<&Grid> {
        self.layer(name).and_then(Layer::grid)
    }

    pub fn grid_mut(&mut self, name: &str) -> Option<&mut Grid> {
        self.layer_mut(name).and_then(Layer::grid_mut)
    }

    pub fn objects(&self, name: &str) -> Option<&[MapObject]> {
        self.layer(name).and_then(Layer::objects)
    }

    pub fn objects_mut(&mut self, name: &str) -> Option<&mut Vec<MapObject>> {
        self.layer_mut(name).and_then(Layer::objects_mut)
    }

    /// Layers in id (insertion) order.
    pub fn layers_in_order(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers.values().collect();
        layers.sort_by_key(|layer| layer.id);
        layers
    }

    /// Stable byte encoding of dimensions and every layer, in id order.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.tile_width.to_le_bytes());
        bytes.extend(self.tile_height.to_le_bytes());

        for layer in self.layers_in_order() {
            bytes.extend(layer.id.to_le_bytes());
            push_str(&mut bytes, &layer.name);
            bytes.push(u8::from(layer.visible));
            bytes.extend(layer.opacity.to_bits().to_le_bytes());
            match &layer.content {
                LayerContent::Grid(grid) => {
                    bytes.push(0);
                    bytes.extend((grid.width() as u32).to_le_bytes());
                    bytes.extend((grid.height() as u32).to_le_bytes());
                    for &cell in grid.data() {
                        bytes.extend(cell.to_le_bytes());
                    }
                }
                LayerContent::Object { objects } => {
                    bytes.push(1);
                    bytes.extend((objects.len() as u32).to_le_bytes());
                    for object in objects {
                        push_object(&mut bytes, object);
                    }
                }
            }
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_str(bytes: &mut Vec<u8>, text: &str) {
    bytes.extend((text.len() as u32).to_le_bytes());
    bytes.extend(text.as_bytes());
}

fn push_object(bytes: &mut Vec<u8>, object: &MapObject) {
    bytes.extend(object.id.to_le_bytes());
    push_str(bytes, &object.name);
    push_str(bytes, &object.object_type);
    bytes.extend(object.x.to_le_bytes());
    bytes.extend(object.y.to_le_bytes());
    bytes.extend(object.width.to_le_bytes());
    bytes.extend(object.height.to_le_bytes());
    bytes.extend(object.rotation.to_le_bytes());
    match object.tile_id {
        Some(tile_id) => {
            bytes.push(1);
            bytes.extend(tile_id.to_le_bytes());
        }
        None => bytes.push(0),
    }
    bytes.push(u8::from(object.visible));
    // BTreeMap keys keep this ordering stable.
    let properties: Map<String, Value> = object.properties.clone().into_iter().collect();
    push_str(bytes, &Value::Object(properties).to_string());
}
