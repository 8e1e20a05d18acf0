//! # Grid Editor
//!
//! Structural edits on a [`Specification`]. Every operation keeps the cell
//! grid the same shape as the ratio sequences, and each one reports whether
//! it changed anything so callers can skip a redraw when it didn't.
//!
//! [`Configurator`] bundles one specification with its settings and is the
//! single owner that edits go through. Layout and price are derived on each
//! call; nothing is cached.

use tracing::{debug, info};

use crate::layout::{compute_layout, PanelLayout};
use crate::model::{Axis, Cell, CellType, SpecPatch, Specification};
use crate::pricing::{calculate_price, PriceBreakdown};
use crate::settings::{CountLimit, Settings};

impl Specification {
    /// Append a column of weight 1 with an empty cell in every row.
    /// No-op at `limit.max`.
    pub fn add_column(&mut self, limit: &CountLimit) -> bool {
        if self.columns() >= limit.max {
            return false;
        }
        self.column_ratios.push(1.0);
        for row in &mut self.cells {
            row.push(Cell::empty());
        }
        true
    }

    /// Drop the last column and the last cell of every row.
    /// No-op at `limit.min`.
    pub fn remove_column(&mut self, limit: &CountLimit) -> bool {
        if self.columns() <= limit.min {
            return false;
        }
        self.column_ratios.pop();
        for row in &mut self.cells {
            row.pop();
        }
        true
    }

    /// Append a row of weight 1 filled with empty cells.
    /// No-op at `limit.max`.
    pub fn add_row(&mut self, limit: &CountLimit) -> bool {
        if self.rows() >= limit.max {
            return false;
        }
        let columns = self.columns();
        self.row_ratios.push(1.0);
        self.cells.push(vec![Cell::empty(); columns]);
        true
    }

    /// Drop the bottom row. No-op at `limit.min`.
    pub fn remove_row(&mut self, limit: &CountLimit) -> bool {
        if self.rows() <= limit.min {
            return false;
        }
        self.row_ratios.pop();
        self.cells.pop();
        true
    }

    /// Set one cell's content. Out-of-range positions are ignored.
    pub fn update_cell_type(&mut self, row: usize, col: usize, kind: CellType) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) if cell.kind != kind => {
                cell.kind = kind;
                true
            }
            _ => false,
        }
    }

    /// Change one column's weight. Ignored when out of range or when the
    /// weight is not a positive finite number.
    pub fn set_column_ratio(&mut self, index: usize, weight: f64) -> bool {
        set_ratio(&mut self.column_ratios, index, weight)
    }

    /// Change one row's weight. Same rules as [`Self::set_column_ratio`].
    pub fn set_row_ratio(&mut self, index: usize, weight: f64) -> bool {
        set_ratio(&mut self.row_ratios, index, weight)
    }

    /// Merge the scalar fields of `patch`. The grid is left alone.
    pub fn apply_patch(&mut self, patch: &SpecPatch) -> bool {
        let before = self.clone();
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(depth) = patch.depth {
            self.depth = depth;
        }
        if let Some(finish) = patch.finish {
            self.finish = finish;
        }
        if let Some(thickness) = patch.board_thickness {
            self.board_thickness = thickness;
        }
        if let Some(base) = patch.base {
            self.base = base;
        }
        if let Some(back_panel) = patch.back_panel {
            self.back_panel = back_panel;
        }
        *self != before
    }
}

fn set_ratio(ratios: &mut [f64], index: usize, weight: f64) -> bool {
    if !weight.is_finite() || weight <= 0.0 {
        return false;
    }
    match ratios.get_mut(index) {
        Some(ratio) if *ratio != weight => {
            *ratio = weight;
            true
        }
        _ => false,
    }
}

/// One editing session: a specification plus the settings that bound it.
#[derive(Debug, Clone, Default)]
pub struct Configurator {
    spec: Specification,
    settings: Settings,
}

impl Configurator {
    pub fn new(settings: Settings) -> Self {
        Self {
            spec: Specification::default(),
            settings,
        }
    }

    pub fn with_spec(spec: Specification, settings: Settings) -> Self {
        Self { spec, settings }
    }

    pub fn spec(&self) -> &Specification {
        &self.spec
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn into_spec(self) -> Specification {
        self.spec
    }

    pub fn add_column(&mut self) -> bool {
        let changed = self.spec.add_column(&self.settings.dimension_limits.columns);
        debug!(changed, columns = self.spec.columns(), "add column");
        changed
    }

    pub fn remove_column(&mut self) -> bool {
        let changed = self
            .spec
            .remove_column(&self.settings.dimension_limits.columns);
        debug!(changed, columns = self.spec.columns(), "remove column");
        changed
    }

    pub fn add_row(&mut self) -> bool {
        let changed = self.spec.add_row(&self.settings.dimension_limits.rows);
        debug!(changed, rows = self.spec.rows(), "add row");
        changed
    }

    pub fn remove_row(&mut self) -> bool {
        let changed = self.spec.remove_row(&self.settings.dimension_limits.rows);
        debug!(changed, rows = self.spec.rows(), "remove row");
        changed
    }

    pub fn update_cell_type(&mut self, row: usize, col: usize, kind: CellType) -> bool {
        let changed = self.spec.update_cell_type(row, col, kind);
        debug!(changed, row, col, ?kind, "update cell");
        changed
    }

    pub fn set_column_ratio(&mut self, index: usize, weight: f64) -> bool {
        self.spec.set_column_ratio(index, weight)
    }

    pub fn set_row_ratio(&mut self, index: usize, weight: f64) -> bool {
        self.spec.set_row_ratio(index, weight)
    }

    /// Shallow-merge scalar fields. Not checked against the settings.
    pub fn update_spec(&mut self, patch: &SpecPatch) -> bool {
        self.spec.apply_patch(patch)
    }

    /// Set one outer dimension, clamped and snapped to the settings' step.
    /// Returns the value actually stored.
    pub fn set_dimension(&mut self, axis: Axis, value: u32) -> u32 {
        let snapped = self.settings.dimension(axis).snap(value);
        self.spec.set_dimension(axis, snapped);
        snapped
    }

    /// Replace the whole specification, e.g. with a saved or shared design.
    pub fn load_spec(&mut self, spec: Specification) {
        info!(
            columns = spec.columns(),
            rows = spec.rows(),
            "specification loaded"
        );
        self.spec = spec;
    }

    /// Back to the default specification. Settings are kept.
    pub fn reset(&mut self) {
        info!("specification reset");
        self.spec = Specification::default();
    }

    pub fn layout(&self) -> PanelLayout {
        compute_layout(&self.spec)
    }

    pub fn price(&self) -> PriceBreakdown {
        calculate_price(&self.spec)
    }
}
