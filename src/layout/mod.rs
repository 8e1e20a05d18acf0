//! # Panel Layout Engine
//!
//! Turns a [`Specification`] into the position and size of every physical
//! board: the carcass, the internal dividers, and the door and drawer fronts.
//!
//! ## Frame
//!
//! All output is in meters (`MM_TO_M` scales the millimeter input). The
//! origin is the center of the cabinet's bounding box; +x points right, +y
//! up and +z toward the viewer. Every panel is an axis-aligned box given by
//! its center and full extents.
//!
//! ## Algorithm
//!
//! 1. Resolve the board thickness `t`
//! 2. Place the carcass: top and bottom span the full width, left and right
//!    the full height, the back panel (if any) closes the rear
//! 3. The internal cavity is the outer size minus two thicknesses
//! 4. Columns and rows share the cavity by ratio after reserving one `t`
//!    per divider (see [`grid`])
//! 5. Walk columns left to right and rows top to bottom with a running offset
//! 6. Dividers sit in the gaps between adjacent tracks
//! 7. Door and drawer fronts are shrunk by a tenth of `t` and set 1.5 `t`
//!    behind the front edge; drawers get a pull
//!
//! A cell whose track size or center can't be resolved to a finite number is
//! left out rather than producing a degenerate panel.

pub mod grid;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::model::{CellType, FinishMaterial, Specification};

/// Millimeters to render units (meters).
pub const MM_TO_M: f64 = 0.001;

/// How much smaller than its cell a front is, as a fraction of `t`.
const FRONT_CLEARANCE: f64 = 0.1;
/// Front panel depth offset from the carcass front edge, in thicknesses.
const FRONT_INSET: f64 = 1.5;
/// Separation between a drawer front and its pull, in meters.
const PULL_STANDOFF: f64 = 0.001;

/// A point or extent in render units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// What a panel is in the finished cabinet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PanelRole {
    Top,
    Bottom,
    Left,
    Right,
    Back,
    VerticalDivider { index: usize },
    HorizontalDivider { index: usize },
    Door { row: usize, col: usize },
    DrawerFront { row: usize, col: usize },
}

/// An axis-aligned board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub role: PanelRole,
    /// Center of the box.
    pub center: Vec3,
    /// Full extents along x, y and z.
    pub size: Vec3,
}

impl Panel {
    fn new(role: PanelRole, center: Vec3, size: Vec3) -> Self {
        Self { role, center, size }
    }

    /// Lowest corner of the box.
    pub fn min(&self) -> Vec3 {
        Vec3::new(
            self.center.x - self.size.x / 2.0,
            self.center.y - self.size.y / 2.0,
            self.center.z - self.size.z / 2.0,
        )
    }

    /// Highest corner of the box.
    pub fn max(&self) -> Vec3 {
        Vec3::new(
            self.center.x + self.size.x / 2.0,
            self.center.y + self.size.y / 2.0,
            self.center.z + self.size.z / 2.0,
        )
    }
}

/// Decorative drawer pull: a flat rectangle facing +z. Carries no price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pull {
    pub center: Vec3,
    pub width: f64,
    pub height: f64,
}

/// A door or drawer front covering one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Front {
    pub row: usize,
    pub col: usize,
    pub kind: CellType,
    pub panel: Panel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull: Option<Pull>,
}

/// Every board of one cabinet, ready for a renderer or exporter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelLayout {
    /// Top, bottom, left, right and, when enabled, back.
    pub carcass: Vec<Panel>,
    /// Vertical dividers first, then horizontal ones.
    pub dividers: Vec<Panel>,
    pub fronts: Vec<Front>,
    /// Width of the cavity inside the carcass.
    pub internal_width: f64,
    /// Height of the cavity inside the carcass.
    pub internal_height: f64,
    /// Board thickness in render units.
    pub thickness: f64,
    pub material: FinishMaterial,
}

impl PanelLayout {
    /// All panels in draw order: carcass, dividers, fronts.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.carcass
            .iter()
            .chain(self.dividers.iter())
            .chain(self.fronts.iter().map(|f| &f.panel))
    }

    pub fn panel_count(&self) -> usize {
        self.carcass.len() + self.dividers.len() + self.fronts.len()
    }
}

/// Compute the panel layout for a specification.
///
/// Pure and total: a specification whose cell grid disagrees with its ratio
/// sequences yields a layout with the unresolvable cells omitted.
#[instrument(level = "debug", skip_all, fields(
    width = spec.width,
    height = spec.height,
    depth = spec.depth,
    columns = spec.columns(),
    rows = spec.rows()
))]
pub fn compute_layout(spec: &Specification) -> PanelLayout {
    let t = spec.board_thickness.millimeters() as f64 * MM_TO_M;
    let w = spec.width as f64 * MM_TO_M;
    let h = spec.height as f64 * MM_TO_M;
    let d = spec.depth as f64 * MM_TO_M;

    let carcass = carcass_panels(w, h, d, t, spec.back_panel.is_on());

    let internal_width = w - 2.0 * t;
    let internal_height = h - 2.0 * t;

    let col_widths = grid::resolve_tracks(&spec.column_ratios, internal_width, t);
    let row_heights = grid::resolve_tracks(&spec.row_ratios, internal_height, t);

    let col_x = grid::track_centers(&col_widths, -internal_width / 2.0, t, 1.0);
    let row_y = grid::track_centers(&row_heights, internal_height / 2.0, t, -1.0);

    let mut dividers = Vec::new();
    let mut skipped = 0usize;
    for (index, x) in grid::divider_centers(&col_widths, -internal_width / 2.0, t, 1.0)
        .into_iter()
        .enumerate()
    {
        if !x.is_finite() {
            skipped += 1;
            continue;
        }
        dividers.push(Panel::new(
            PanelRole::VerticalDivider { index },
            Vec3::new(x, 0.0, 0.0),
            Vec3::new(t, internal_height, d),
        ));
    }
    for (index, y) in grid::divider_centers(&row_heights, internal_height / 2.0, t, -1.0)
        .into_iter()
        .enumerate()
    {
        if !y.is_finite() {
            skipped += 1;
            continue;
        }
        dividers.push(Panel::new(
            PanelRole::HorizontalDivider { index },
            Vec3::new(0.0, y, 0.0),
            Vec3::new(internal_width, t, d),
        ));
    }

    let front_z = d / 2.0 - FRONT_INSET * t;
    let mut fronts = Vec::new();

    for (row, col, cell) in spec.iter_cells() {
        let role = match cell.kind {
            CellType::Door => PanelRole::Door { row, col },
            CellType::Drawer => PanelRole::DrawerFront { row, col },
            CellType::Empty | CellType::Unknown => continue,
        };

        let track = (
            col_widths.get(col),
            row_heights.get(row),
            col_x.get(col),
            row_y.get(row),
        );
        let (cell_w, cell_h, cell_x, cell_y) = match track {
            (Some(&cw), Some(&ch), Some(&cx), Some(&cy))
                if cw.is_finite() && ch.is_finite() && cx.is_finite() && cy.is_finite() =>
            {
                (cw, ch, cx, cy)
            }
            _ => {
                skipped += 1;
                continue;
            }
        };

        let panel = Panel::new(
            role,
            Vec3::new(cell_x, cell_y, front_z),
            Vec3::new(
                cell_w - FRONT_CLEARANCE * t,
                cell_h - FRONT_CLEARANCE * t,
                t,
            ),
        );

        let pull = match cell.kind {
            CellType::Drawer => Some(Pull {
                center: Vec3::new(cell_x, cell_y, front_z + t / 2.0 + PULL_STANDOFF),
                width: cell_w * 0.5,
                height: t * 0.5,
            }),
            _ => None,
        };

        fronts.push(Front {
            row,
            col,
            kind: cell.kind,
            panel,
            pull,
        });
    }

    if skipped > 0 {
        warn!(skipped, "omitted panels that fall outside the resolved grid");
    }
    debug!(
        carcass = carcass.len(),
        dividers = dividers.len(),
        fronts = fronts.len(),
        "layout computed"
    );

    PanelLayout {
        carcass,
        dividers,
        fronts,
        internal_width,
        internal_height,
        thickness: t,
        material: spec.finish.material(),
    }
}

fn carcass_panels(w: f64, h: f64, d: f64, t: f64, back: bool) -> Vec<Panel> {
    let mut panels = vec![
        Panel::new(
            PanelRole::Top,
            Vec3::new(0.0, h / 2.0 - t / 2.0, 0.0),
            Vec3::new(w, t, d),
        ),
        Panel::new(
            PanelRole::Bottom,
            Vec3::new(0.0, -h / 2.0 + t / 2.0, 0.0),
            Vec3::new(w, t, d),
        ),
        Panel::new(
            PanelRole::Left,
            Vec3::new(-w / 2.0 + t / 2.0, 0.0, 0.0),
            Vec3::new(t, h, d),
        ),
        Panel::new(
            PanelRole::Right,
            Vec3::new(w / 2.0 - t / 2.0, 0.0, 0.0),
            Vec3::new(t, h, d),
        ),
    ];
    if back {
        panels.push(Panel::new(
            PanelRole::Back,
            Vec3::new(0.0, 0.0, -d / 2.0 + t / 2.0),
            Vec3::new(w, h, t),
        ));
    }
    panels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BackPanel, Cell, Finish};

    const EPS: f64 = 1e-9;

    fn two_by_two() -> Specification {
        Specification {
            column_ratios: vec![1.0, 1.0],
            row_ratios: vec![1.0, 1.0],
            cells: vec![
                vec![Cell::door(), Cell::empty()],
                vec![Cell::drawer(), Cell::door()],
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_default_spec_has_bare_carcass() {
        let layout = compute_layout(&Specification::default());
        assert_eq!(layout.carcass.len(), 4);
        assert!(layout.dividers.is_empty());
        assert!(layout.fronts.is_empty());
        assert!((layout.thickness - 0.018).abs() < EPS);
        assert!((layout.internal_width - 1.164).abs() < EPS);
        assert!((layout.internal_height - 0.764).abs() < EPS);
    }

    #[test]
    fn test_carcass_placement() {
        let layout = compute_layout(&Specification::default());
        let top = layout.carcass[0];
        assert_eq!(top.role, PanelRole::Top);
        assert!((top.center.y - (0.4 - 0.009)).abs() < EPS);
        assert!((top.size.x - 1.2).abs() < EPS);
        assert!((top.size.z - 0.4).abs() < EPS);

        let bottom = layout.carcass[1];
        assert!((bottom.center.y + 0.391).abs() < EPS);

        let left = layout.carcass[2];
        assert!((left.center.x + 0.591).abs() < EPS);
        assert!((left.size.y - 0.8).abs() < EPS);

        let right = layout.carcass[3];
        assert!((right.center.x - 0.591).abs() < EPS);
    }

    #[test]
    fn test_back_panel_only_when_on() {
        let mut spec = Specification::default();
        spec.back_panel = BackPanel::On;
        let layout = compute_layout(&spec);
        assert_eq!(layout.carcass.len(), 5);
        let back = layout.carcass[4];
        assert_eq!(back.role, PanelRole::Back);
        assert!((back.center.z + 0.191).abs() < EPS);
        assert!((back.size.z - 0.018).abs() < EPS);
    }

    #[test]
    fn test_dividers_count_and_extent() {
        let layout = compute_layout(&two_by_two());
        assert_eq!(layout.dividers.len(), 2);

        let vertical = layout.dividers[0];
        assert_eq!(vertical.role, PanelRole::VerticalDivider { index: 0 });
        // Equal columns: the divider sits on the center line.
        assert!(vertical.center.x.abs() < EPS);
        assert!((vertical.size.y - layout.internal_height).abs() < EPS);

        let horizontal = layout.dividers[1];
        assert_eq!(horizontal.role, PanelRole::HorizontalDivider { index: 0 });
        assert!(horizontal.center.y.abs() < EPS);
        assert!((horizontal.size.x - layout.internal_width).abs() < EPS);
    }

    #[test]
    fn test_equal_columns_have_equal_widths() {
        let spec = Specification {
            column_ratios: vec![1.0, 1.0],
            cells: vec![vec![Cell::door(), Cell::door()]],
            ..Default::default()
        };
        let layout = compute_layout(&spec);
        assert_eq!(layout.fronts.len(), 2);
        let a = layout.fronts[0].panel.size.x;
        let b = layout.fronts[1].panel.size.x;
        assert!((a - b).abs() < EPS);
        // (1.164 - 0.018) / 2 - 0.0018
        assert!((a - 0.5712).abs() < EPS);
    }

    #[test]
    fn test_front_placement() {
        let layout = compute_layout(&two_by_two());
        assert_eq!(layout.fronts.len(), 3);

        let door = &layout.fronts[0];
        assert_eq!(door.panel.role, PanelRole::Door { row: 0, col: 0 });
        assert!(door.pull.is_none());
        // d/2 - 1.5t
        assert!((door.panel.center.z - (0.2 - 0.027)).abs() < EPS);
        assert!(door.panel.center.x < 0.0);
        assert!(door.panel.center.y > 0.0);
    }

    #[test]
    fn test_drawer_has_pull() {
        let layout = compute_layout(&two_by_two());
        let drawer = layout
            .fronts
            .iter()
            .find(|f| f.kind == CellType::Drawer)
            .unwrap();
        assert_eq!(drawer.panel.role, PanelRole::DrawerFront { row: 1, col: 0 });
        let pull = drawer.pull.unwrap();
        assert!((pull.center.x - drawer.panel.center.x).abs() < EPS);
        assert!((pull.center.y - drawer.panel.center.y).abs() < EPS);
        assert!(pull.center.z > drawer.panel.max().z);
        assert!((pull.height - 0.009).abs() < EPS);
    }

    #[test]
    fn test_uneven_ratios() {
        let spec = Specification {
            width: 1000,
            column_ratios: vec![1.0, 3.0],
            cells: vec![vec![Cell::door(), Cell::door()]],
            ..Default::default()
        };
        let layout = compute_layout(&spec);
        let narrow = layout.fronts[0].panel.size.x + 0.0018;
        let wide = layout.fronts[1].panel.size.x + 0.0018;
        assert!((wide / narrow - 3.0).abs() < 1e-9);
        // Fronts stay within the cavity.
        assert!(layout.fronts[0].panel.min().x >= -layout.internal_width / 2.0 - EPS);
        assert!(layout.fronts[1].panel.max().x <= layout.internal_width / 2.0 + EPS);
    }

    #[test]
    fn test_cells_beyond_ratios_are_skipped() {
        let spec = Specification {
            cells: vec![
                vec![Cell::door(), Cell::door()],
                vec![Cell::drawer(), Cell::door()],
            ],
            ..Default::default()
        };
        let layout = compute_layout(&spec);
        // Only (0, 0) resolves against one column ratio and one row ratio.
        assert_eq!(layout.fronts.len(), 1);
        assert_eq!(layout.fronts[0].row, 0);
        assert_eq!(layout.fronts[0].col, 0);
    }

    #[test]
    fn test_empty_ratio_lists_skip_everything() {
        let spec = Specification {
            column_ratios: vec![],
            row_ratios: vec![],
            cells: vec![vec![Cell::door()]],
            ..Default::default()
        };
        let layout = compute_layout(&spec);
        assert!(layout.fronts.is_empty());
        assert!(layout.dividers.is_empty());
        assert_eq!(layout.carcass.len(), 4);
    }

    #[test]
    fn test_non_finite_ratio_is_skipped() {
        let spec = Specification {
            column_ratios: vec![1.0, f64::NAN],
            cells: vec![vec![Cell::door(), Cell::door()]],
            ..Default::default()
        };
        let layout = compute_layout(&spec);
        assert!(layout.fronts.iter().all(|f| f.panel.center.is_finite()));
        assert!(layout.fronts.len() < 2);
        assert!(layout.dividers.iter().all(|p| p.center.is_finite()));
        assert!(layout
            .dividers
            .iter()
            .all(|p| !matches!(p.role, PanelRole::VerticalDivider { .. })));
    }

    #[test]
    fn test_non_finite_row_ratio_drops_horizontal_dividers() {
        let spec = Specification {
            column_ratios: vec![1.0, 1.0],
            row_ratios: vec![f64::INFINITY, 1.0],
            cells: vec![vec![Cell::door(), Cell::door()]; 2],
            ..Default::default()
        };
        let layout = compute_layout(&spec);
        assert_eq!(layout.dividers.len(), 1);
        assert_eq!(layout.dividers[0].role, PanelRole::VerticalDivider { index: 0 });
        assert!(layout.panels().all(|p| p.center.is_finite() && p.size.is_finite()));
    }

    #[test]
    fn test_unknown_cells_render_nothing() {
        let spec = Specification {
            column_ratios: vec![1.0, 1.0],
            cells: vec![vec![Cell::new(CellType::Unknown), Cell::door()]],
            back_panel: BackPanel::Unknown,
            ..Default::default()
        };
        let layout = compute_layout(&spec);
        assert_eq!(layout.carcass.len(), 4);
        assert_eq!(layout.fronts.len(), 1);
        assert_eq!(layout.fronts[0].col, 1);
    }

    #[test]
    fn test_material_follows_finish() {
        let mut spec = Specification::default();
        spec.finish = Finish::Walnut;
        assert_eq!(compute_layout(&spec).material.color, "#6F4F28");
    }

    #[test]
    fn test_layout_serializes_roles() {
        let layout = compute_layout(&two_by_two());
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["carcass"][0]["role"]["type"], "top");
        assert_eq!(json["dividers"][0]["role"]["type"], "verticalDivider");
        assert_eq!(json["fronts"][0]["kind"], "door");
        assert!(json["fronts"][0].get("pull").is_none());
        assert_eq!(json["internalWidth"], layout.internal_width);
    }
}
