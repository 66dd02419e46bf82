use kitchen_core::geometry::{Rotation, Vec3};
use kitchen_core::{ModuleDescriptor, ModuleKind};
use kitchen_scene::records::{Annotation, DimensionAxis, DimensionLine, Label, LabelOrientation};

use crate::config::LayoutConfig;
use crate::totals::AssemblyExtents;

/// Average advance of a numeric glyph relative to the font size.
const GLYPH_ASPECT: f64 = 1.6;

/// Text shown for a dimension value: whole millimetres print without a fraction.
pub fn dimension_text(value: f64) -> String {
    format!("{}", value)
}

/// Shift that roughly centers `text` on its anchor, assuming fixed-width digits.
pub fn centering_shift(text: &str, font_size: f64) -> f64 {
    -0.5 * (text.chars().count() as f64 * font_size / GLYPH_ASPECT)
}

/// Width, height and (for carcasses) depth brackets of one module, in the
/// module's local frame.
pub fn annotate_module(module: &ModuleDescriptor, index: usize, config: &LayoutConfig) -> Vec<Annotation> {
    let (w, h, d) = (module.width, module.height, module.depth);
    let gap = config.measurement_gap;
    let flip = module.flip_measurements;
    let step = |offset: f64| if flip { -offset } else { offset };

    let mut annotations = vec![
        width_bracket(
            Some(index),
            w,
            Vec3::new(0.0, h, d + gap),
            step(config.width_offset),
            step(config.width_offset + config.width_label_gap),
            config,
        ),
        height_bracket(
            Some(index),
            h,
            Vec3::new(-gap, 0.0, d + gap),
            -step(config.height_offset),
            -step(config.height_offset + config.height_label_gap) + gap,
            config,
        ),
    ];

    if module.kind == ModuleKind::BasicCarcass {
        let s = step(config.depth_offset);
        let start = Vec3::new(w + gap, h, 0.0);
        let text = dimension_text(d);
        let shift = centering_shift(&text, config.label_font_size);
        annotations.push(Annotation {
            module_index: Some(index),
            axis: DimensionAxis::Depth,
            line: DimensionLine {
                points: [
                    start,
                    start.translate(s, 0.0, 0.0),
                    start.translate(s, 0.0, d),
                    start.translate(0.0, 0.0, d),
                ],
                color: config.line_color,
            },
            label: label(
                text,
                Vec3::new(w + 2.0 * s + shift, h + config.depth_label_gap, d / 2.0),
                LabelOrientation::Horizontal,
                config,
            ),
        });
    }

    annotations
}

/// Overall width and height brackets of the whole run, already in world space.
pub fn annotate_assembly(extents: &AssemblyExtents, config: &LayoutConfig) -> Vec<Annotation> {
    if extents.width <= 0.0 || extents.height <= 0.0 {
        return Vec::new();
    }
    let left = -extents.centering_offset();
    let offset = config.assembly_offset;
    let z = config.measurement_gap;
    vec![
        width_bracket(
            None,
            extents.width,
            Vec3::new(left, extents.height, z),
            offset,
            offset + config.width_label_gap,
            config,
        ),
        height_bracket(
            None,
            extents.height,
            Vec3::new(left - config.measurement_gap, 0.0, z),
            -offset,
            -(offset + config.height_label_gap),
            config,
        ),
    ]
}

/// Bracket along x starting at `start`, stepping `step` in y.
fn width_bracket(
    module_index: Option<usize>,
    length: f64,
    start: Vec3,
    step: f64,
    label_rise: f64,
    config: &LayoutConfig,
) -> Annotation {
    let text = dimension_text(length);
    let shift = centering_shift(&text, config.label_font_size);
    Annotation {
        module_index,
        axis: DimensionAxis::Width,
        line: DimensionLine {
            points: [
                start,
                start.translate(0.0, step, 0.0),
                start.translate(length, step, 0.0),
                start.translate(length, 0.0, 0.0),
            ],
            color: config.line_color,
        },
        label: label(
            text,
            Vec3::new(start.x + length / 2.0 + shift, start.y + label_rise, start.z - config.measurement_gap),
            LabelOrientation::Horizontal,
            config,
        ),
    }
}

/// Bracket along y starting at `start`, stepping `step` in x. The label is
/// turned to read up the edge.
fn height_bracket(
    module_index: Option<usize>,
    length: f64,
    start: Vec3,
    step: f64,
    label_shift: f64,
    config: &LayoutConfig,
) -> Annotation {
    let text = dimension_text(length);
    let shift = centering_shift(&text, config.label_font_size);
    Annotation {
        module_index,
        axis: DimensionAxis::Height,
        line: DimensionLine {
            points: [
                start,
                start.translate(step, 0.0, 0.0),
                start.translate(step, length, 0.0),
                start.translate(0.0, length, 0.0),
            ],
            color: config.line_color,
        },
        label: label(
            text,
            Vec3::new(start.x + label_shift, start.y + length / 2.0 + shift, start.z),
            LabelOrientation::Vertical,
            config,
        ),
    }
}

fn label(text: String, anchor: Vec3, orientation: LabelOrientation, config: &LayoutConfig) -> Label {
    Label {
        text,
        font_size: config.label_font_size,
        color: config.label_color,
        anchor,
        orientation,
        rotation: Rotation::Front,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(annotations: &[Annotation], axis: DimensionAxis) -> &Annotation {
        annotations.iter().find(|a| a.axis == axis).unwrap()
    }

    #[test]
    fn test_dimension_text_drops_fraction() {
        assert_eq!(dimension_text(600.0), "600");
        assert_eq!(dimension_text(600.5), "600.5");
    }

    #[test]
    fn test_centering_shift() {
        // 3 digits * 36 / 1.6 = 67.5
        assert!((centering_shift("600", 36.0) + 33.75).abs() < 1e-9);
    }

    #[test]
    fn test_carcass_gets_three_brackets() {
        let config = LayoutConfig::default();
        let module = ModuleDescriptor::new(600.0, 800.0, 670.0);
        let annotations = annotate_module(&module, 0, &config);
        assert_eq!(annotations.len(), 3);

        let width = axis(&annotations, DimensionAxis::Width);
        assert_eq!(width.label.text, "600");
        assert!((width.line.points[1].y - 880.0).abs() < 1e-9);
        assert!((width.line.points[2].x - 600.0).abs() < 1e-9);
        assert!((width.label.anchor.x - (300.0 - 33.75)).abs() < 1e-9);

        let height = axis(&annotations, DimensionAxis::Height);
        assert_eq!(height.label.orientation, LabelOrientation::Vertical);
        assert!((height.line.points[1].x + 66.0).abs() < 1e-9);
        assert!((height.line.points[2].y - 800.0).abs() < 1e-9);

        let depth = axis(&annotations, DimensionAxis::Depth);
        assert_eq!(depth.label.text, "670");
        assert!((depth.line.points[1].x - 634.0).abs() < 1e-9);
        assert!((depth.line.points[3].z - 670.0).abs() < 1e-9);
    }

    #[test]
    fn test_flip_reverses_steps() {
        let config = LayoutConfig::default();
        let mut module = ModuleDescriptor::new(600.0, 800.0, 670.0);
        module.flip_measurements = true;
        let annotations = annotate_module(&module, 0, &config);
        let width = axis(&annotations, DimensionAxis::Width);
        assert!((width.line.points[1].y - 720.0).abs() < 1e-9);
        let height = axis(&annotations, DimensionAxis::Height);
        assert!((height.line.points[1].x - 62.0).abs() < 1e-9);
        let depth = axis(&annotations, DimensionAxis::Depth);
        assert!((depth.line.points[1].x - 570.0).abs() < 1e-9);
    }

    #[test]
    fn test_table_top_has_no_depth_bracket() {
        let config = LayoutConfig::default();
        let module = ModuleDescriptor::new(600.0, 40.0, 400.0).with_kind(ModuleKind::TableTop);
        let annotations = annotate_module(&module, 2, &config);
        assert_eq!(annotations.len(), 2);
        assert!(annotations.iter().all(|a| a.axis != DimensionAxis::Depth));
        assert!(annotations.iter().all(|a| a.module_index == Some(2)));
    }

    #[test]
    fn test_assembly_brackets_span_run() {
        let config = LayoutConfig::default();
        let extents = AssemblyExtents { width: 1200.0, height: 1200.0 };
        let annotations = annotate_assembly(&extents, &config);
        assert_eq!(annotations.len(), 2);
        let width = axis(&annotations, DimensionAxis::Width);
        assert!((width.line.points[0].x + 600.0).abs() < 1e-9);
        assert!((width.line.points[3].x - 600.0).abs() < 1e-9);
        assert!(width.module_index.is_none());
        assert!(annotate_assembly(&AssemblyExtents::default(), &config).is_empty());
    }
}
