//! # Configurator Settings
//!
//! Dimension bounds, grid size limits and the option lists a configurator
//! offers. Settings constrain what the editor produces; the layout and
//! pricing engines never read them.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CaseworkError;
use crate::model::{Axis, BackPanel, BaseType, BoardThickness, Finish};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub dimension_limits: DimensionLimits,
    pub available_options: AvailableOptions,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, CaseworkError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse stored settings, falling back to the defaults when nothing is
    /// stored or the stored record doesn't parse.
    pub fn load_or_default(stored: Option<&str>) -> Self {
        match stored.map(Self::from_json) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                warn!(error = %e, "stored settings are invalid, using defaults");
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, CaseworkError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn dimension(&self, axis: Axis) -> &DimensionLimit {
        match axis {
            Axis::Width => &self.dimension_limits.width,
            Axis::Height => &self.dimension_limits.height,
            Axis::Depth => &self.dimension_limits.depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionLimits {
    pub width: DimensionLimit,
    pub height: DimensionLimit,
    pub depth: DimensionLimit,
    pub columns: CountLimit,
    pub rows: CountLimit,
}

impl Default for DimensionLimits {
    fn default() -> Self {
        Self {
            width: DimensionLimit::new(400, 2400, 10),
            height: DimensionLimit::new(400, 2400, 10),
            depth: DimensionLimit::new(200, 800, 10),
            columns: CountLimit { min: 1, max: 6 },
            rows: CountLimit { min: 1, max: 8 },
        }
    }
}

/// Millimeter range with a slider step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionLimit {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl DimensionLimit {
    pub const fn new(min: u32, max: u32, step: u32) -> Self {
        Self { min, max, step }
    }

    /// Clamp into `[min, max]` and snap to the nearest step counted from
    /// `min`, the way a range slider reports its value.
    pub fn snap(&self, value: u32) -> u32 {
        let upper = self.max.max(self.min);
        let clamped = value.clamp(self.min, upper);
        if self.step == 0 {
            return clamped;
        }
        // Widened so limits near u32::MAX can't overflow.
        let (min, step) = (u64::from(self.min), u64::from(self.step));
        let steps = (u64::from(clamped) - min + step / 2) / step;
        let mut snapped = min + steps * step;
        if snapped > u64::from(upper) {
            snapped -= step;
        }
        u32::try_from(snapped).unwrap_or(upper)
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Inclusive bounds on a grid track count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountLimit {
    pub min: usize,
    pub max: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AvailableOptions {
    pub finishes: Vec<Finish>,
    pub board_thicknesses: Vec<BoardThickness>,
    pub bases: Vec<BaseType>,
    pub back_panels: Vec<BackPanel>,
}

impl Default for AvailableOptions {
    fn default() -> Self {
        Self {
            finishes: vec![Finish::NaturalOak, Finish::Walnut, Finish::WhiteLaminate],
            board_thicknesses: vec![
                BoardThickness::T18,
                BoardThickness::T21,
                BoardThickness::T25,
            ],
            bases: vec![
                BaseType::None,
                BaseType::Plinth50,
                BaseType::Leg100,
                BaseType::Caster,
            ],
            back_panels: vec![BackPanel::Off, BackPanel::On],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let settings = Settings::default();
        assert_eq!(settings.dimension_limits.width, DimensionLimit::new(400, 2400, 10));
        assert_eq!(settings.dimension_limits.depth.max, 800);
        assert_eq!(settings.dimension_limits.columns.max, 6);
        assert_eq!(settings.dimension_limits.rows.max, 8);
        assert_eq!(settings.available_options.board_thicknesses.len(), 3);
    }

    #[test]
    fn test_json_shape_matches_web_settings() {
        let json = Settings::default().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["dimensionLimits"]["width"]["step"], 10);
        assert_eq!(value["dimensionLimits"]["rows"]["min"], 1);
        assert_eq!(value["availableOptions"]["finishes"][2], "white_laminate");
        assert_eq!(value["availableOptions"]["boardThicknesses"][0], "t18");
        assert_eq!(value["availableOptions"]["backPanels"][1], "on");
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings =
            Settings::from_json(r#"{"dimensionLimits": {"columns": {"min": 2, "max": 4}}}"#)
                .unwrap();
        assert_eq!(settings.dimension_limits.columns, CountLimit { min: 2, max: 4 });
        assert_eq!(settings.dimension_limits.rows.max, 8);
        assert_eq!(settings.available_options, AvailableOptions::default());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        assert_eq!(Settings::load_or_default(None), Settings::default());
        assert_eq!(Settings::load_or_default(Some("not json")), Settings::default());
        let custom = Settings::load_or_default(Some(
            r#"{"dimensionLimits": {"rows": {"min": 1, "max": 3}}}"#,
        ));
        assert_eq!(custom.dimension_limits.rows.max, 3);
    }

    #[test]
    fn test_snap_clamps_and_steps() {
        let limit = DimensionLimit::new(400, 2400, 10);
        assert_eq!(limit.snap(100), 400);
        assert_eq!(limit.snap(9999), 2400);
        assert_eq!(limit.snap(1234), 1230);
        assert_eq!(limit.snap(1235), 1240);
        assert_eq!(limit.snap(1200), 1200);
    }

    #[test]
    fn test_snap_never_exceeds_max() {
        let limit = DimensionLimit::new(0, 25, 10);
        assert_eq!(limit.snap(25), 20);
        assert_eq!(limit.snap(24), 20);
    }

    #[test]
    fn test_snap_near_u32_max() {
        let limit = DimensionLimit::new(0, u32::MAX, u32::MAX);
        assert_eq!(limit.snap(u32::MAX), u32::MAX);
        assert_eq!(limit.snap(u32::MAX / 2), 0);
        assert_eq!(limit.snap(u32::MAX / 2 + 1), u32::MAX);

        let limit = DimensionLimit::new(u32::MAX - 5, u32::MAX, 4);
        assert_eq!(limit.snap(u32::MAX), u32::MAX - 1);
        assert_eq!(limit.snap(0), u32::MAX - 5);
    }

    #[test]
    fn test_snap_zero_step() {
        let limit = DimensionLimit::new(10, 20, 0);
        assert_eq!(limit.snap(13), 13);
        assert!(limit.contains(20));
        assert!(!limit.contains(21));
    }
}
