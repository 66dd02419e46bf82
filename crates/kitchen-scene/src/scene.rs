use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use kitchen_core::geometry::Vec3;

use crate::records::{Annotation, DimensionAxis, Face, HoverRegion, Panel, PanelKind};

/// Arena key of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PanelKey {
    pub module_index: usize,
    pub kind: PanelKind,
}

/// Arena key of a hover region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HoverKey {
    pub module_index: usize,
    pub face: Face,
}

/// Arena key of an annotation. Assembly dimensions have no module and sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnnotationKey {
    pub module_index: Option<usize>,
    pub axis: DimensionAxis,
}

/// Any record in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SceneKey {
    Panel(PanelKey),
    Hover(HoverKey),
    Annotation(AnnotationKey),
}

/// Dynamic scene content of one rebuild pass, keyed by module and part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneArena {
    panels: BTreeMap<PanelKey, Panel>,
    hover_regions: BTreeMap<HoverKey, HoverRegion>,
    annotations: BTreeMap<AnnotationKey, Annotation>,
}

impl SceneArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a panel, returning the one it replaced.
    pub fn insert_panel(&mut self, panel: Panel) -> Option<Panel> {
        let key = PanelKey {
            module_index: panel.module_index,
            kind: panel.kind,
        };
        self.panels.insert(key, panel)
    }

    pub fn insert_hover_region(&mut self, region: HoverRegion) -> Option<HoverRegion> {
        let key = HoverKey {
            module_index: region.module_index,
            face: region.face,
        };
        self.hover_regions.insert(key, region)
    }

    pub fn insert_annotation(&mut self, annotation: Annotation) -> Option<Annotation> {
        let key = AnnotationKey {
            module_index: annotation.module_index,
            axis: annotation.axis,
        };
        self.annotations.insert(key, annotation)
    }

    pub fn panel(&self, module_index: usize, kind: PanelKind) -> Option<&Panel> {
        self.panels.get(&PanelKey { module_index, kind })
    }

    pub fn hover_region(&self, module_index: usize, face: Face) -> Option<&HoverRegion> {
        self.hover_regions.get(&HoverKey { module_index, face })
    }

    pub fn annotation(&self, module_index: Option<usize>, axis: DimensionAxis) -> Option<&Annotation> {
        self.annotations.get(&AnnotationKey { module_index, axis })
    }

    /// Panels ordered by module, then kind.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels.values()
    }

    pub fn module_panels(&self, module_index: usize) -> impl Iterator<Item = &Panel> {
        self.panels
            .values()
            .filter(move |p| p.module_index == module_index)
    }

    pub fn hover_regions(&self) -> impl Iterator<Item = &HoverRegion> {
        self.hover_regions.values()
    }

    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.values()
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn hover_region_count(&self) -> usize {
        self.hover_regions.len()
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty() && self.hover_regions.is_empty() && self.annotations.is_empty()
    }

    pub fn clear(&mut self) {
        self.panels.clear();
        self.hover_regions.clear();
        self.annotations.clear();
    }

    /// What changed going from `previous` to `self`, for renderer reconciliation.
    pub fn diff(&self, previous: &SceneArena) -> SceneDiff {
        let mut diff = SceneDiff::default();
        diff_maps(&self.panels, &previous.panels, SceneKey::Panel, &mut diff);
        diff_maps(&self.hover_regions, &previous.hover_regions, SceneKey::Hover, &mut diff);
        diff_maps(&self.annotations, &previous.annotations, SceneKey::Annotation, &mut diff);
        diff
    }
}

fn diff_maps<K: Ord + Copy, V: PartialEq>(
    current: &BTreeMap<K, V>,
    previous: &BTreeMap<K, V>,
    wrap: fn(K) -> SceneKey,
    diff: &mut SceneDiff,
) {
    for (key, value) in current {
        match previous.get(key) {
            None => diff.added.push(wrap(*key)),
            Some(old) if old != value => diff.changed.push(wrap(*key)),
            Some(_) => {}
        }
    }
    for key in previous.keys() {
        if !current.contains_key(key) {
            diff.removed.push(wrap(*key));
        }
    }
}

/// Keys added, removed and modified between two arenas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDiff {
    pub added: Vec<SceneKey>,
    pub removed: Vec<SceneKey>,
    pub changed: Vec<SceneKey>,
}

impl SceneDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Fixed background geometry (floor, wall) that rebuilds never touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticNode {
    pub name: String,
    pub center: Vec3,
    pub width: f64,
    pub height: f64,
    pub normal: Vec3,
    pub texture_url: String,
    /// Texture repeats across the plane (u, v).
    pub texture_repeat: [u32; 2],
}

impl StaticNode {
    pub fn floor() -> Self {
        Self {
            name: String::from("floor"),
            center: Vec3::new(0.0, 0.0, 1500.0),
            width: 6000.0,
            height: 3000.0,
            normal: Vec3::UP,
            texture_url: String::from("/textures/laminate-texture.jpg"),
            texture_repeat: [6, 3],
        }
    }

    pub fn wall() -> Self {
        Self {
            name: String::from("wall"),
            center: Vec3::new(0.0, 1500.0, 0.0),
            width: 6000.0,
            height: 3000.0,
            normal: Vec3::new(0.0, 0.0, 1.0),
            texture_url: String::from("/textures/wall.avif"),
            texture_repeat: [6, 3],
        }
    }
}

/// Scene target of the layout engine, split into static backdrop and
/// dynamic content so clearing never depends on node order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    backdrop: Vec<StaticNode>,
    content: SceneArena,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene with the default floor and wall already in place.
    pub fn with_backdrop() -> Self {
        let mut scene = Self::new();
        scene.add_backdrop();
        scene
    }

    /// Append floor and wall. Does nothing if a backdrop is already present.
    pub fn add_backdrop(&mut self) {
        if !self.backdrop.is_empty() {
            log::debug!("Backdrop already present, skipping");
            return;
        }
        self.add_static(StaticNode::floor());
        self.add_static(StaticNode::wall());
    }

    pub fn add_static(&mut self, node: StaticNode) {
        self.backdrop.push(node);
    }

    pub fn backdrop(&self) -> &[StaticNode] {
        &self.backdrop
    }

    pub fn content(&self) -> &SceneArena {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut SceneArena {
        &mut self.content
    }

    /// Drop every generated record, keeping the backdrop.
    pub fn clear_dynamic(&mut self) {
        self.content.clear();
    }

    /// Swap in freshly built content, returning the previous arena.
    pub fn replace_content(&mut self, content: SceneArena) -> SceneArena {
        std::mem::replace(&mut self.content, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_core::geometry::Rotation;

    fn panel(module_index: usize, kind: PanelKind, x: f64) -> Panel {
        Panel {
            module_index,
            kind,
            center: Vec3::new(x, 0.0, 0.0),
            size: Vec3::new(10.0, 10.0, 10.0),
            rotation: Rotation::Front,
            material_id: 1,
            highlighted: false,
        }
    }

    #[test]
    fn test_arena_orders_by_module_then_kind() {
        let mut arena = SceneArena::new();
        arena.insert_panel(panel(1, PanelKind::Bottom, 0.0));
        arena.insert_panel(panel(0, PanelKind::Top, 0.0));
        arena.insert_panel(panel(0, PanelKind::Bottom, 0.0));
        let order: Vec<_> = arena.panels().map(|p| (p.module_index, p.kind)).collect();
        assert_eq!(
            order,
            vec![(0, PanelKind::Bottom), (0, PanelKind::Top), (1, PanelKind::Bottom)]
        );
        assert_eq!(arena.module_panels(0).count(), 2);
    }

    #[test]
    fn test_diff_reports_changes() {
        let mut before = SceneArena::new();
        before.insert_panel(panel(0, PanelKind::Bottom, 0.0));
        before.insert_panel(panel(0, PanelKind::Top, 0.0));

        let mut after = SceneArena::new();
        after.insert_panel(panel(0, PanelKind::Bottom, 5.0));
        after.insert_panel(panel(1, PanelKind::Bottom, 0.0));

        let diff = after.diff(&before);
        let key = |module_index, kind| SceneKey::Panel(PanelKey { module_index, kind });
        assert_eq!(diff.added, vec![key(1, PanelKind::Bottom)]);
        assert_eq!(diff.removed, vec![key(0, PanelKind::Top)]);
        assert_eq!(diff.changed, vec![key(0, PanelKind::Bottom)]);
        assert!(after.diff(&after.clone()).is_empty());
    }

    #[test]
    fn test_clear_keeps_backdrop() {
        let mut scene = Scene::with_backdrop();
        scene.add_backdrop();
        assert_eq!(scene.backdrop().len(), 2);
        scene.add_static(StaticNode {
            name: String::from("splashback"),
            ..StaticNode::wall()
        });
        scene.content_mut().insert_panel(panel(0, PanelKind::Bottom, 0.0));
        scene.clear_dynamic();
        assert!(scene.content().is_empty());
        assert_eq!(scene.backdrop().len(), 3);
        assert_eq!(scene.backdrop()[2].name, "splashback");
    }
}
