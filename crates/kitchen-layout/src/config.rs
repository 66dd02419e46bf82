use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid layout config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Layout config field '{field}' must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

/// Geometric constants of the layout engine, in millimetres.
///
/// Every field has a default, so a partial JSON document only overrides
/// what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Thickness of the hardboard rear wall.
    pub rear_wall_thickness: f64,
    /// Rear wall is this much smaller than the carcass on every edge.
    pub rear_wall_inset: f64,
    /// Gap between the wall and the rear panel.
    pub rear_wall_setback: f64,
    /// Facade is this much smaller than the carcass opening on every edge.
    pub facade_inset: f64,
    /// How far a table top reaches past the module depth.
    pub table_top_overhang: f64,
    /// Hover planes are this much narrower than the face they cover.
    pub hover_inset: f64,
    /// Hover planes float this far off the face they cover.
    pub hover_lift: f64,

    pub width_offset: f64,
    pub height_offset: f64,
    pub depth_offset: f64,
    /// Gap between a measured edge and its bracket.
    pub measurement_gap: f64,
    pub width_label_gap: f64,
    pub height_label_gap: f64,
    pub depth_label_gap: f64,
    pub label_font_size: f64,
    pub line_color: u32,
    pub label_color: u32,

    /// Also dimension the whole assembly.
    pub assembly_dimensions: bool,
    pub assembly_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rear_wall_thickness: 3.0,
            rear_wall_inset: 2.0,
            rear_wall_setback: 1.0,
            facade_inset: 2.0,
            table_top_overhang: 50.0,
            hover_inset: 32.0,
            hover_lift: 0.1,
            width_offset: 80.0,
            height_offset: 64.0,
            depth_offset: 32.0,
            measurement_gap: 2.0,
            width_label_gap: 60.0,
            height_label_gap: 48.0,
            depth_label_gap: 48.0,
            label_font_size: 36.0,
            line_color: 0x333333,
            label_color: 0x000000,
            assembly_dimensions: false,
            assembly_offset: 200.0,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("rearWallThickness", self.rear_wall_thickness),
            ("tableTopOverhang", self.table_top_overhang),
            ("widthOffset", self.width_offset),
            ("heightOffset", self.height_offset),
            ("depthOffset", self.depth_offset),
            ("labelFontSize", self.label_font_size),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LayoutConfig::from_json(r#"{"tableTopOverhang": 30, "assemblyDimensions": true}"#).unwrap();
        assert!((config.table_top_overhang - 30.0).abs() < 1e-9);
        assert!(config.assembly_dimensions);
        assert!((config.width_offset - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive() {
        let err = LayoutConfig::from_json(r#"{"labelFontSize": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "labelFontSize", .. }));
        assert!(matches!(LayoutConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
