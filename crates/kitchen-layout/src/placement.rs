//! Maps module-local geometry into world space.
//!
//! A module is turned about its anchor corner, then shifted so the turned
//! volume lands back in the floor cell its unrotated footprint would occupy
//! along the rotated axes. Neighbouring modules on different walls stay
//! contiguous that way.

use kitchen_core::geometry::{Rotation, Vec3};
use kitchen_core::ModuleDescriptor;
use kitchen_scene::records::{Annotation, HoverRegion, Panel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// World position of the module's local origin before rotation.
    pub anchor: Vec3,
    pub rotation: Rotation,
    pub width: f64,
    pub depth: f64,
}

impl Placement {
    /// Placement of `module` in an assembly shifted left by `centering_offset`.
    pub fn for_module(module: &ModuleDescriptor, centering_offset: f64) -> Self {
        Self {
            anchor: Vec3::new(module.x - centering_offset, module.y, module.z),
            rotation: module.rotation,
            width: module.width,
            depth: module.depth,
        }
    }

    /// Translation applied after rotating about the anchor.
    pub fn correction(&self) -> Vec3 {
        match self.rotation {
            Rotation::Front => Vec3::ZERO,
            Rotation::Left => Vec3::new(self.depth, 0.0, 0.0),
            Rotation::Back => Vec3::new(self.width, 0.0, self.depth),
            Rotation::Right => Vec3::new(0.0, 0.0, self.width),
        }
    }

    pub fn apply_point(&self, local: &Vec3) -> Vec3 {
        local
            .rotate_y(self.rotation)
            .add(&self.anchor)
            .add(&self.correction())
    }

    /// Rotate a direction; directions are not translated.
    pub fn apply_direction(&self, direction: &Vec3) -> Vec3 {
        direction.rotate_y(self.rotation)
    }

    pub fn apply_panel(&self, panel: &Panel) -> Panel {
        Panel {
            center: self.apply_point(&panel.center),
            rotation: panel.rotation.then(self.rotation),
            ..panel.clone()
        }
    }

    pub fn apply_hover(&self, region: &HoverRegion) -> HoverRegion {
        HoverRegion {
            center: self.apply_point(&region.center),
            u_axis: self.apply_direction(&region.u_axis),
            v_axis: self.apply_direction(&region.v_axis),
            normal: self.apply_direction(&region.normal),
            rotation: region.rotation.then(self.rotation),
            ..region.clone()
        }
    }

    pub fn apply_annotation(&self, annotation: &Annotation) -> Annotation {
        let mut placed = annotation.clone();
        for point in placed.line.points.iter_mut() {
            *point = self.apply_point(point);
        }
        placed.label.anchor = self.apply_point(&annotation.label.anchor);
        placed.label.rotation = annotation.label.rotation.then(self.rotation);
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_core::geometry::Aabb;
    use kitchen_scene::records::PanelKind;

    fn bottom(width: f64, depth: f64) -> Panel {
        Panel {
            module_index: 0,
            kind: PanelKind::Bottom,
            center: Vec3::new(width / 2.0, 8.0, depth / 2.0),
            size: Vec3::new(width, 16.0, depth),
            rotation: Rotation::Front,
            material_id: 1,
            highlighted: false,
        }
    }

    fn close(a: &Vec3, b: &Vec3) -> bool {
        a.distance_to(b) < 1e-9
    }

    #[test]
    fn test_front_is_pure_translation() {
        let module = ModuleDescriptor::new(600.0, 800.0, 670.0).at(300.0, 0.0, 20.0);
        let placement = Placement::for_module(&module, 600.0);
        assert_eq!(placement.correction(), Vec3::ZERO);
        let p = placement.apply_point(&Vec3::new(1.0, 2.0, 3.0));
        assert!(close(&p, &Vec3::new(-299.0, 2.0, 23.0)));
    }

    #[test]
    fn test_rotation_matches_equivalent_unrotated_module() {
        for rotation in [Rotation::Left, Rotation::Right] {
            let module = ModuleDescriptor::new(600.0, 800.0, 670.0)
                .at(1200.0, 0.0, 0.0)
                .rotated(rotation);
            let placed = Placement::for_module(&module, 0.0).apply_panel(&bottom(600.0, 670.0));

            // Same cell declared directly with width and depth swapped.
            let twin = ModuleDescriptor::new(670.0, 800.0, 600.0).at(1200.0, 0.0, 0.0);
            let expected = Placement::for_module(&twin, 0.0).apply_panel(&bottom(670.0, 600.0));

            assert!((placed.center.x - expected.center.x).abs() < 1e-9);
            assert!((placed.center.z - expected.center.z).abs() < 1e-9);
            assert_eq!(placed.rotation, rotation);
            assert_eq!(placed.world_bounds().size(), expected.world_bounds().size());
        }
    }

    #[test]
    fn test_every_rotation_stays_in_its_cell() {
        for rotation in Rotation::ALL {
            let module = ModuleDescriptor::new(600.0, 800.0, 670.0)
                .at(100.0, 0.0, 50.0)
                .rotated(rotation);
            let placed = Placement::for_module(&module, 0.0).apply_panel(&bottom(600.0, 670.0));
            let cell = Aabb::new(
                Vec3::new(100.0, 0.0, 50.0),
                Vec3::new(100.0 + module.footprint_x(), 16.0, 50.0 + module.footprint_z()),
            )
            .padded(1e-9);
            let bounds = placed.world_bounds();
            assert!(cell.contains_point(&bounds.min), "{:?}", rotation);
            assert!(cell.contains_point(&bounds.max), "{:?}", rotation);
        }
    }

    #[test]
    fn test_back_flips_both_axes() {
        let module = ModuleDescriptor::new(600.0, 800.0, 670.0).rotated(Rotation::Back);
        let placement = Placement::for_module(&module, 0.0);
        let origin = placement.apply_point(&Vec3::ZERO);
        assert!(close(&origin, &Vec3::new(600.0, 0.0, 670.0)));
        let normal = placement.apply_direction(&Vec3::new(0.0, 0.0, 1.0));
        assert!(close(&normal, &Vec3::new(0.0, 0.0, -1.0)));
    }
}
