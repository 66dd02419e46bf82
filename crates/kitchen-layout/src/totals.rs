use serde::{Deserialize, Serialize};

use kitchen_core::ModuleDescriptor;

/// Running sums of one rebuild pass, used for pricing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTotals {
    /// Face area of every carcass, facade and slab panel, in mm².
    pub panel_area: f64,
    /// Fabricated (post-inset) rear-wall area, in mm².
    pub rear_wall_area: f64,
    /// Physical panels, rear walls included.
    pub panel_count: usize,
}

impl LayoutTotals {
    pub fn record_panel(&mut self, area: f64) {
        self.panel_area += area;
        self.panel_count += 1;
    }

    pub fn record_rear_wall(&mut self, area: f64) {
        self.rear_wall_area += area;
        self.panel_count += 1;
    }

    pub fn merge(&mut self, other: &LayoutTotals) {
        self.panel_area += other.panel_area;
        self.rear_wall_area += other.rear_wall_area;
        self.panel_count += other.panel_count;
    }
}

/// Overall size of the module run, for camera framing and centering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyExtents {
    pub width: f64,
    pub height: f64,
}

impl AssemblyExtents {
    pub fn from_modules(modules: &[ModuleDescriptor]) -> Self {
        Self {
            width: total_width(modules),
            height: total_height(modules),
        }
    }

    /// Shift that centers the assembly horizontally on the origin.
    pub fn centering_offset(&self) -> f64 {
        self.width / 2.0
    }
}

/// Top of the highest-placed module; later modules win ties.
fn total_height(modules: &[ModuleDescriptor]) -> f64 {
    let Some(mut highest) = modules.first() else {
        return 0.0;
    };
    let mut max_y = 0.0;
    for module in modules {
        if module.y >= max_y {
            highest = module;
            max_y = module.y;
        }
    }
    highest.y + highest.height
}

/// Rightmost x plus leftmost x plus the x-footprint of the rightmost module;
/// later modules win ties.
fn total_width(modules: &[ModuleDescriptor]) -> f64 {
    let Some(mut rightmost) = modules.first() else {
        return 0.0;
    };
    let mut max_x = f64::NEG_INFINITY;
    let mut min_x = f64::INFINITY;
    for module in modules {
        if module.x >= max_x {
            rightmost = module;
            max_x = module.x;
        }
        if module.x <= min_x {
            min_x = module.x;
        }
    }
    max_x + min_x + rightmost.footprint_x()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_core::Rotation;

    #[test]
    fn test_two_module_run_width() {
        let modules = vec![
            ModuleDescriptor::new(600.0, 800.0, 670.0),
            ModuleDescriptor::new(600.0, 800.0, 670.0).at(600.0, 0.0, 0.0),
        ];
        let extents = AssemblyExtents::from_modules(&modules);
        assert!((extents.width - 1200.0).abs() < 1e-9);
        assert!((extents.height - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_sideways_module_uses_depth() {
        let modules = vec![
            ModuleDescriptor::new(600.0, 800.0, 670.0),
            ModuleDescriptor::new(600.0, 800.0, 670.0)
                .at(600.0, 0.0, 0.0)
                .rotated(Rotation::Right),
        ];
        assert!((AssemblyExtents::from_modules(&modules).width - 1270.0).abs() < 1e-9);
    }

    #[test]
    fn test_height_ties_go_to_later_module() {
        let modules = vec![
            ModuleDescriptor::new(600.0, 400.0, 670.0).at(0.0, 800.0, 0.0),
            ModuleDescriptor::new(600.0, 700.0, 670.0).at(600.0, 800.0, 0.0),
        ];
        assert!((AssemblyExtents::from_modules(&modules).height - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(AssemblyExtents::from_modules(&[]), AssemblyExtents::default());
    }

    #[test]
    fn test_record_counts_rear_walls() {
        let mut totals = LayoutTotals::default();
        totals.record_panel(10.0);
        totals.record_rear_wall(4.0);
        let mut sum = LayoutTotals::default();
        sum.merge(&totals);
        sum.merge(&totals);
        assert_eq!(sum.panel_count, 4);
        assert!((sum.panel_area - 20.0).abs() < 1e-9);
        assert!((sum.rear_wall_area - 8.0).abs() < 1e-9);
    }
}
