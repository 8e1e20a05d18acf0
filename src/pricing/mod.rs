//! # Pricing Engine
//!
//! Prices a specification from its volume, finish, fronts and options. The
//! constants live in [`PriceFactors`] so they can be tuned (or loaded from
//! JSON) without touching the algorithm.
//!
//! Every field of the breakdown is computed from unrounded intermediates and
//! rounded only when it is placed into the breakdown. `total` is rounded to
//! the nearest 10 from the unrounded sum, so it need not equal the sum of the
//! four rounded fields.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::model::{BaseType, CellType, Finish, Specification};

/// Cost decomposition in the smallest currency unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Volume-based carcass price.
    pub base: i64,
    /// Finish surcharge relative to a neutral multiplier of 1. Negative for
    /// finishes cheaper than neutral.
    pub materials: i64,
    /// Doors and drawers.
    pub hardware: i64,
    /// Base support and back panel.
    pub options: i64,
    /// Grand total, rounded to the nearest 10.
    pub total: i64,
}

/// Tunable pricing constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceFactors {
    /// Price per cubic millimeter of outer volume.
    pub base_rate_per_mm3: f64,
    pub door_cost: f64,
    pub drawer_cost: f64,
    pub plinth_cost: f64,
    pub leg_cost: f64,
    pub caster_cost: f64,
    /// Price per square meter of back panel.
    pub back_panel_cost_per_m2: f64,
    pub finish_multipliers: FinishMultipliers,
}

impl Default for PriceFactors {
    fn default() -> Self {
        Self {
            base_rate_per_mm3: 0.000025,
            door_cost: 4500.0,
            drawer_cost: 7000.0,
            plinth_cost: 3000.0,
            leg_cost: 4000.0,
            caster_cost: 5000.0,
            back_panel_cost_per_m2: 2000.0,
            finish_multipliers: FinishMultipliers::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FinishMultipliers {
    pub natural_oak: f64,
    pub walnut: f64,
    pub white_laminate: f64,
}

impl Default for FinishMultipliers {
    fn default() -> Self {
        Self {
            natural_oak: 1.0,
            walnut: 1.3,
            white_laminate: 0.9,
        }
    }
}

impl PriceFactors {
    /// Multiplier applied to the base price. Unknown finishes are neutral.
    pub fn finish_multiplier(&self, finish: Finish) -> f64 {
        match finish {
            Finish::NaturalOak => self.finish_multipliers.natural_oak,
            Finish::Walnut => self.finish_multipliers.walnut,
            Finish::WhiteLaminate => self.finish_multipliers.white_laminate,
            Finish::Unknown => 1.0,
        }
    }

    /// Fixed cost of a base support. Unknown bases are free.
    pub fn base_cost(&self, base: BaseType) -> f64 {
        match base {
            BaseType::None | BaseType::Unknown => 0.0,
            BaseType::Plinth50 => self.plinth_cost,
            BaseType::Leg100 => self.leg_cost,
            BaseType::Caster => self.caster_cost,
        }
    }

    pub fn cell_cost(&self, kind: CellType) -> f64 {
        match kind {
            CellType::Empty | CellType::Unknown => 0.0,
            CellType::Door => self.door_cost,
            CellType::Drawer => self.drawer_cost,
        }
    }

    /// Price a specification with these factors.
    #[instrument(level = "debug", skip_all)]
    pub fn calculate(&self, spec: &Specification) -> PriceBreakdown {
        let width = spec.width as f64;
        let height = spec.height as f64;
        let depth = spec.depth as f64;

        let base = width * height * depth * self.base_rate_per_mm3;
        let materials = base * self.finish_multiplier(spec.finish) - base;

        let hardware: f64 = spec
            .iter_cells()
            .map(|(_, _, cell)| self.cell_cost(cell.kind))
            .sum();

        let mut options = self.base_cost(spec.base);
        if spec.back_panel.is_on() {
            let area_m2 = width * height / 1_000_000.0;
            options += area_m2 * self.back_panel_cost_per_m2;
        }

        let total = base + materials + hardware + options;

        let breakdown = PriceBreakdown {
            base: round_half_up(base),
            materials: round_half_up(materials),
            hardware: round_half_up(hardware),
            options: round_half_up(options),
            total: round_half_up(total / 10.0) * 10,
        };
        debug!(?breakdown, "price calculated");
        breakdown
    }
}

/// Price a specification with the default factors.
pub fn calculate_price(spec: &Specification) -> PriceBreakdown {
    PriceFactors::default().calculate(spec)
}

/// Round to the nearest integer, halves toward positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
