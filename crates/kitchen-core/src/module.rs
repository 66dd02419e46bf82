use serde::{Deserialize, Serialize};

use crate::geometry::Rotation;
use crate::material::MaterialId;
use crate::store::StoreError;

/// Material used when a module does not name one.
pub const DEFAULT_MATERIAL_ID: MaterialId = 1;

/// The compiler strategy a module is built with.
///
/// Type names coming from stored descriptors are matched exhaustively here;
/// anything not listed is an explicit fallback to [`ModuleKind::BasicCarcass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModuleKind {
    #[default]
    BasicCarcass,
    TableTop,
}

impl ModuleKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ModuleKind::BasicCarcass => "default",
            ModuleKind::TableTop => "tableTop",
        }
    }

    pub fn from_type_name(name: &str) -> Self {
        match name {
            "tableTop" => ModuleKind::TableTop,
            "" | "default" => ModuleKind::BasicCarcass,
            // Cabinet variants without a dedicated builder yet.
            "kitchenLower" | "kitchenDrawers" | "corner" => {
                log::debug!("Module type '{}' is built as a basic carcass", name);
                ModuleKind::BasicCarcass
            }
            other => {
                log::warn!("Unrecognized module type '{}', falling back to basic carcass", other);
                ModuleKind::BasicCarcass
            }
        }
    }
}

impl From<String> for ModuleKind {
    fn from(name: String) -> Self {
        Self::from_type_name(&name)
    }
}

impl From<ModuleKind> for String {
    fn from(kind: ModuleKind) -> Self {
        kind.type_name().to_string()
    }
}

/// Front door / drawer panel covering a carcass opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facade {
    pub enabled: bool,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub material_id: MaterialId,
    pub thickness: f64,
}

impl Facade {
    pub fn new(material_id: MaterialId, thickness: f64) -> Self {
        Self {
            enabled: true,
            kind: String::from("door"),
            material_id,
            thickness,
        }
    }
}

/// A rectangular furniture unit as the user described it.
///
/// All extents are in the module's own unrotated frame: `x` is the left edge
/// before rotation, `y` the floor height and `z` the distance from the wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(rename = "type", default)]
    pub kind: ModuleKind,
    #[serde(default = "default_material_id")]
    pub material_id: MaterialId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facade: Option<Facade>,
    #[serde(default)]
    pub has_rear_wall: bool,
    /// Draw dimension brackets on the opposite side of the measured edge.
    #[serde(default)]
    pub flip_measurements: bool,
}

fn default_material_id() -> MaterialId {
    DEFAULT_MATERIAL_ID
}

impl ModuleDescriptor {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            rotation: Rotation::Front,
            kind: ModuleKind::BasicCarcass,
            material_id: DEFAULT_MATERIAL_ID,
            facade: None,
            has_rear_wall: false,
            flip_measurements: false,
        }
    }

    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    pub fn rotated(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_kind(mut self, kind: ModuleKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_material(mut self, material_id: MaterialId) -> Self {
        self.material_id = material_id;
        self
    }

    pub fn with_facade(mut self, facade: Facade) -> Self {
        self.facade = Some(facade);
        self
    }

    pub fn with_rear_wall(mut self, has_rear_wall: bool) -> Self {
        self.has_rear_wall = has_rear_wall;
        self
    }

    /// The facade, if one is present and switched on.
    pub fn enabled_facade(&self) -> Option<&Facade> {
        self.facade.as_ref().filter(|f| f.enabled)
    }

    /// Extent along the global x axis once rotated.
    pub fn footprint_x(&self) -> f64 {
        if self.rotation.is_sideways() {
            self.depth
        } else {
            self.width
        }
    }

    /// Extent along the global z axis once rotated.
    pub fn footprint_z(&self) -> f64 {
        if self.rotation.is_sideways() {
            self.width
        } else {
            self.depth
        }
    }

    /// Check extents and that no carcass panel is thicker than half the
    /// dimension it is cut from.
    pub fn validate(&self, panel_thickness: f64) -> Result<(), StoreError> {
        for (name, value) in [("width", self.width), ("height", self.height), ("depth", self.depth)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(StoreError::InvalidDimension { name, value });
            }
        }
        if self.kind == ModuleKind::BasicCarcass {
            for (name, value) in [("width", self.width), ("height", self.height)] {
                if panel_thickness * 2.0 > value {
                    return Err(StoreError::PanelTooThick {
                        thickness: panel_thickness,
                        name,
                        value,
                    });
                }
            }
        }
        if let Some(facade) = self.enabled_facade() {
            if !(facade.thickness.is_finite() && facade.thickness > 0.0) {
                return Err(StoreError::InvalidDimension {
                    name: "facade thickness",
                    value: facade.thickness,
                });
            }
            if facade.thickness * 2.0 > self.depth {
                return Err(StoreError::PanelTooThick {
                    thickness: facade.thickness,
                    name: "depth",
                    value: self.depth,
                });
            }
        }
        Ok(())
    }
}
