//! # Casework
//!
//! A parametric cabinet engine.
//!
//! A cabinet is described by a [`Specification`]: outer dimensions, board
//! material and thickness, a base, an optional back panel, and an uneven
//! grid of compartments whose columns and rows are sized by ratio. From that
//! one value the crate derives everything a configurator needs to show:
//! where every board goes, and what the cabinet costs.
//!
//! Both derivations are pure functions. Nothing is cached; every edit is
//! followed by a full recomputation, which is cheap at cabinet scale and
//! can never go stale.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON / share link / editor)
//!       ↓
//!   [model]     — Specification, closed enums, grid invariant
//!       ↓
//!   [editor]    — Row/column/cell edits that keep the grid consistent
//!       ↓
//!   [layout]    — Carcass, dividers and fronts in meters
//!   [pricing]   — Base, materials, hardware, options, total
//! ```

pub mod editor;
pub mod error;
pub mod layout;
pub mod model;
pub mod pricing;
pub mod settings;
pub mod share;

#[cfg(feature = "wasm")]
pub mod wasm;

use serde::Serialize;

pub use editor::Configurator;
pub use error::CaseworkError;
pub use layout::{compute_layout, PanelLayout};
pub use model::Specification;
pub use pricing::{calculate_price, PriceBreakdown};
pub use settings::Settings;

/// Layout and price of one specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub layout: PanelLayout,
    pub price: PriceBreakdown,
}

/// Derive both the panel layout and the price.
pub fn evaluate(spec: &Specification) -> Evaluation {
    Evaluation {
        layout: compute_layout(spec),
        price: calculate_price(spec),
    }
}

/// Evaluate a specification given as JSON.
///
/// The JSON must parse; the grid is not checked, so a mismatched grid
/// evaluates with the unresolvable cells left out.
pub fn evaluate_json(json: &str) -> Result<Evaluation, CaseworkError> {
    let spec = Specification::from_json(json)?;
    Ok(evaluate(&spec))
}
