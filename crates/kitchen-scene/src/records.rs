use serde::{Deserialize, Serialize};

use kitchen_core::geometry::{Aabb, Rotation, Vec3};
use kitchen_core::MaterialId;

/// Which part of a module a panel is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelKind {
    Bottom,
    Top,
    LeftSide,
    RightSide,
    RearWall,
    Facade,
    /// The single slab of a worktop module.
    TableTop,
}

/// An oriented box cut from board material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub module_index: usize,
    pub kind: PanelKind,
    /// Box center.
    pub center: Vec3,
    /// Box extents along the panel's own (unrotated) axes.
    pub size: Vec3,
    /// Yaw about the vertical axis.
    pub rotation: Rotation,
    pub material_id: MaterialId,
    /// Set when the owning module is the selected one.
    pub highlighted: bool,
}

impl Panel {
    /// Lowest corner of the box in the panel's own frame.
    pub fn min_corner(&self) -> Vec3 {
        self.center.sub(&self.size.scale(0.5))
    }

    pub fn world_bounds(&self) -> Aabb {
        let size = if self.rotation.is_sideways() {
            Vec3::new(self.size.z, self.size.y, self.size.x)
        } else {
            self.size
        };
        Aabb::from_center_size(self.center, size)
    }
}

/// The face of a module's bounding box a hover region sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Bottom,
    Top,
    Left,
    Right,
    Front,
}

/// What the pointer handler learns when it hits a hover region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverTag {
    pub position: Face,
    pub module_index: usize,
    pub click_to_open: bool,
}

/// Invisible, transparent plane on one face of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverRegion {
    pub module_index: usize,
    pub face: Face,
    pub center: Vec3,
    /// Extent along `u_axis`.
    pub width: f64,
    /// Extent along `v_axis`.
    pub height: f64,
    pub u_axis: Vec3,
    pub v_axis: Vec3,
    /// Outward face normal.
    pub normal: Vec3,
    pub rotation: Rotation,
    pub click_to_open: bool,
}

impl HoverRegion {
    pub fn tag(&self) -> HoverTag {
        HoverTag {
            position: self.face,
            module_index: self.module_index,
            click_to_open: self.click_to_open,
        }
    }

    pub fn corners(&self) -> [Vec3; 4] {
        let u = self.u_axis.scale(self.width / 2.0);
        let v = self.v_axis.scale(self.height / 2.0);
        [
            self.center.sub(&u).sub(&v),
            self.center.add(&u).sub(&v),
            self.center.add(&u).add(&v),
            self.center.sub(&u).add(&v),
        ]
    }

    pub fn world_bounds(&self) -> Aabb {
        let corners = self.corners();
        // Four points always yield a box.
        Aabb::from_points(&corners).unwrap_or(Aabb::new(self.center, self.center))
    }
}

/// Which extent of a module a measurement shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionAxis {
    Width,
    Height,
    Depth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelOrientation {
    /// Reads left to right, facing the viewer.
    Horizontal,
    /// Turned 90° to run up a vertical edge.
    Vertical,
}

/// Open bracket-shaped polyline: edge start, stepped start, stepped end, edge end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionLine {
    pub points: [Vec3; 4],
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub font_size: f64,
    pub color: u32,
    pub anchor: Vec3,
    pub orientation: LabelOrientation,
    pub rotation: Rotation,
}

/// A dimension bracket with its value, for one module or the whole assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// `None` for assembly-wide dimensions.
    pub module_index: Option<usize>,
    pub axis: DimensionAxis,
    pub line: DimensionLine,
    pub label: Label,
}
