//! # Specification Model
//!
//! The input representation for both engines. A [`Specification`] is the
//! complete parametric description of one cabinet: outer dimensions, board
//! material and thickness, base support, back panel, and an uneven grid of
//! compartments described by two ratio sequences plus a row-major cell grid.
//!
//! The JSON shape matches what the web configurator stores and shares, so a
//! saved design or a share-link payload deserializes straight into this type.
//!
//! One structural rule ties the grid together: `cells` has exactly one row per
//! entry in `row_ratios`, and every row has exactly one cell per entry in
//! `column_ratios`. The editor operations maintain it; decoders check it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CaseworkError;

/// A complete cabinet specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specification {
    /// Outer width in millimeters.
    pub width: u32,
    /// Outer height in millimeters.
    pub height: u32,
    /// Outer depth in millimeters.
    pub depth: u32,
    pub finish: Finish,
    pub board_thickness: BoardThickness,
    pub base: BaseType,
    pub back_panel: BackPanel,
    /// Relative column widths. Only proportions matter.
    pub column_ratios: Vec<f64>,
    /// Relative row heights, top to bottom.
    pub row_ratios: Vec<f64>,
    /// Row-major compartment contents.
    pub cells: Vec<Vec<Cell>>,
}

impl Default for Specification {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            depth: 400,
            finish: Finish::NaturalOak,
            board_thickness: BoardThickness::T18,
            base: BaseType::None,
            back_panel: BackPanel::Off,
            column_ratios: vec![1.0],
            row_ratios: vec![1.0],
            cells: vec![vec![Cell::empty()]],
        }
    }
}

impl Specification {
    /// Parse a specification from JSON without checking the grid.
    pub fn from_json(json: &str) -> Result<Self, CaseworkError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CaseworkError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Number of grid columns, as defined by the column ratios.
    pub fn columns(&self) -> usize {
        self.column_ratios.len()
    }

    /// Number of grid rows, as defined by the row ratios.
    pub fn rows(&self) -> usize {
        self.row_ratios.len()
    }

    pub fn dimension(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
            Axis::Depth => self.depth,
        }
    }

    pub fn set_dimension(&mut self, axis: Axis, value: u32) {
        match axis {
            Axis::Width => self.width = value,
            Axis::Height => self.height = value,
            Axis::Depth => self.depth = value,
        }
    }

    /// Whether `cells` matches `row_ratios` × `column_ratios`.
    pub fn grid_is_consistent(&self) -> bool {
        self.check_grid().is_ok()
    }

    /// Check the cell grid against the ratio sequences, reporting the first
    /// mismatch found.
    pub fn check_grid(&self) -> Result<(), CaseworkError> {
        if self.cells.len() != self.rows() {
            return Err(CaseworkError::GridMismatch(format!(
                "{} cell rows for {} row ratios",
                self.cells.len(),
                self.rows()
            )));
        }
        for (r, row) in self.cells.iter().enumerate() {
            if row.len() != self.columns() {
                return Err(CaseworkError::GridMismatch(format!(
                    "row {} has {} cells for {} column ratios",
                    r,
                    row.len(),
                    self.columns()
                )));
            }
        }
        Ok(())
    }

    /// Iterate over every cell with its (row, column) position.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, cell)| (r, c, cell)))
    }

    /// Count cells of the given type.
    pub fn count_cells(&self, kind: CellType) -> usize {
        self.iter_cells().filter(|(_, _, cell)| cell.kind == kind).count()
    }
}

/// One of the three outer dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Width,
    Height,
    Depth,
}

/// Surface material of every board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Finish {
    NaturalOak,
    Walnut,
    WhiteLaminate,
    /// Any finish this build doesn't know. Priced and rendered as neutral.
    #[serde(other)]
    Unknown,
}

impl Finish {
    /// Render material for this finish.
    pub fn material(self) -> FinishMaterial {
        match self {
            Finish::NaturalOak | Finish::Unknown => FinishMaterial {
                color: "#E0C9A6",
                roughness: 0.8,
                metalness: 0.1,
            },
            Finish::Walnut => FinishMaterial {
                color: "#6F4F28",
                roughness: 0.7,
                metalness: 0.1,
            },
            Finish::WhiteLaminate => FinishMaterial {
                color: "#F5F5F5",
                roughness: 0.5,
                metalness: 0.2,
            },
        }
    }
}

/// PBR-style surface description handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinishMaterial {
    /// sRGB hex color.
    pub color: &'static str,
    pub roughness: f64,
    pub metalness: f64,
}

/// Structural board thickness, encoded as a tag like `t18`.
///
/// The tag is parsed once, when the value is built or deserialized. A value
/// of this type always holds a positive millimeter count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoardThickness(u32);

impl BoardThickness {
    pub const T18: Self = Self(18);
    pub const T21: Self = Self(21);
    pub const T25: Self = Self(25);

    pub fn millimeters(self) -> u32 {
        self.0
    }

    /// Parse a `t<digits>` tag. The leading unit letter is stripped and the
    /// rest must be a positive decimal integer.
    pub fn parse(tag: &str) -> Result<Self, CaseworkError> {
        let invalid = || CaseworkError::InvalidThickness(tag.to_string());
        let mut chars = tag.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return Err(invalid()),
        }
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        match digits.parse::<u32>() {
            Ok(mm) if mm > 0 => Ok(Self(mm)),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for BoardThickness {
    type Err = CaseworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BoardThickness {
    type Error = CaseworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BoardThickness> for String {
    fn from(value: BoardThickness) -> Self {
        value.to_string()
    }
}

impl fmt::Display for BoardThickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// What the cabinet stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    None,
    Plinth50,
    Leg100,
    Caster,
    /// Any base this build doesn't know. Costs nothing.
    #[serde(other)]
    Unknown,
}

/// Whether a rear panel closes the carcass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackPanel {
    #[default]
    Off,
    On,
    /// Any value this build doesn't know. Treated as no back panel.
    #[serde(other)]
    Unknown,
}

impl BackPanel {
    pub fn is_on(self) -> bool {
        matches!(self, BackPanel::On)
    }
}

/// Content of one grid compartment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(rename = "type")]
    pub kind: CellType,
}

impl Cell {
    pub fn new(kind: CellType) -> Self {
        Self { kind }
    }

    pub fn empty() -> Self {
        Self::new(CellType::Empty)
    }

    pub fn door() -> Self {
        Self::new(CellType::Door)
    }

    pub fn drawer() -> Self {
        Self::new(CellType::Drawer)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    #[default]
    Empty,
    Door,
    Drawer,
    /// Any content this build doesn't know. Costs nothing and renders nothing.
    #[serde(other)]
    Unknown,
}

/// A partial update of the scalar fields of a [`Specification`].
///
/// Grid fields are deliberately absent: the grid only changes through the
/// editor's row and column operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<Finish>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_thickness: Option<BoardThickness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<BaseType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_panel: Option<BackPanel>,
}
