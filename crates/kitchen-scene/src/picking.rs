use rstar::{Envelope, PointDistance, RTree, RTreeObject, AABB};

use kitchen_core::geometry::{Aabb, Vec3};

use crate::records::HoverTag;
use crate::scene::{HoverKey, SceneArena};

/// Hover planes are flat; boxes are padded by this much so point queries can hit them.
pub const DEFAULT_PICK_TOLERANCE: f64 = 1.0;

/// An entry in the R-tree, referencing a hover region by its arena key.
#[derive(Debug, Clone)]
pub struct HoverEntry {
    pub key: HoverKey,
    pub tag: HoverTag,
    /// Padded world bounding box of the region.
    pub bbox: Aabb,
}

impl RTreeObject for HoverEntry {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min.to_array(), self.bbox.max.to_array())
    }
}

impl PointDistance for HoverEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        self.envelope().distance_2(point)
    }

    fn contains_point(&self, point: &[f64; 3]) -> bool {
        self.bbox.contains_point(&Vec3::new(point[0], point[1], point[2]))
    }
}

/// Spatial index over hover regions for pointer hit-testing.
pub struct HoverIndex {
    tree: RTree<HoverEntry>,
}

impl HoverIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Index every hover region of a rebuilt arena.
    pub fn build(arena: &SceneArena, tolerance: f64) -> Self {
        let entries: Vec<HoverEntry> = arena
            .hover_regions()
            .map(|region| HoverEntry {
                key: HoverKey {
                    module_index: region.module_index,
                    face: region.face,
                },
                tag: region.tag(),
                bbox: region.world_bounds().padded(tolerance),
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Regions whose padded box contains `point`, ordered by module then face.
    pub fn query_point(&self, point: &Vec3) -> Vec<&HoverEntry> {
        let mut hits: Vec<&HoverEntry> = self.tree.locate_all_at_point(&point.to_array()).collect();
        hits.sort_by_key(|e| e.key);
        hits
    }

    /// Regions intersecting `area`, ordered by module then face.
    pub fn query_box(&self, area: &Aabb) -> Vec<&HoverEntry> {
        let envelope = AABB::from_corners(area.min.to_array(), area.max.to_array());
        let mut hits: Vec<&HoverEntry> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .collect();
        hits.sort_by_key(|e| e.key);
        hits
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for HoverIndex {
    fn default() -> Self {
        Self::new()
    }
}
