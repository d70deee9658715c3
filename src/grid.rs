//! Sparse stitch grid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::color::HexColor;
use crate::error::CellKeyError;
use crate::shape::{is_inside, ProjectConfig};

/// A grid cell address. Any pair of integers is representable; whether a cell
/// may be painted is decided by the project's shape at write time.
///
/// Serialized as `"x,y"`, e.g. `"3,-2"`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for GridPoint {
    type Err = CellKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CellKeyError::InvalidFormat(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
        let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
        Ok(Self { x, y })
    }
}

impl TryFrom<String> for GridPoint {
    type Error = CellKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GridPoint> for String {
    fn from(point: GridPoint) -> Self {
        point.to_string()
    }
}

/// One recorded change to a cell. `None` means the cell was (or becomes) unpainted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub cell: GridPoint,
    pub before: Option<HexColor>,
    pub after: Option<HexColor>,
}

/// Read-only copy of the grid contents, ordered by cell key.
pub type PatternSnapshot = BTreeMap<GridPoint, HexColor>;

/// The authoritative design state: painted cells only.
///
/// Mutating calls return the [`CellEdit`] they performed so the caller can
/// record it in the active stroke; a `None` return means nothing changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternGrid {
    cells: BTreeMap<GridPoint, HexColor>,
}

impl PatternGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: BTreeMap<GridPoint, HexColor>) -> Self {
        Self { cells }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<HexColor> {
        self.cells.get(&GridPoint::new(x, y)).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridPoint, HexColor)> + '_ {
        self.cells.iter().map(|(point, color)| (*point, *color))
    }

    pub fn snapshot(&self) -> PatternSnapshot {
        self.cells.clone()
    }

    /// Paint a cell. Cells outside `bounds` and cells already holding `color` are left alone.
    pub fn paint(
        &mut self,
        x: i32,
        y: i32,
        color: HexColor,
        bounds: Option<&ProjectConfig>,
    ) -> Option<CellEdit> {
        if !is_inside(bounds, x, y) {
            return None;
        }
        let cell = GridPoint::new(x, y);
        let before = self.cells.insert(cell, color);
        if before == Some(color) {
            return None;
        }
        Some(CellEdit {
            cell,
            before,
            after: Some(color),
        })
    }

    /// Remove a cell's stitch. Not bounds-checked, so stray stitches left outside
    /// a changed shape can still be removed.
    pub fn erase(&mut self, x: i32, y: i32) -> Option<CellEdit> {
        let cell = GridPoint::new(x, y);
        self.cells.remove(&cell).map(|before| CellEdit {
            cell,
            before: Some(before),
            after: None,
        })
    }

    /// Remove every cell, returning one edit per previously painted cell.
    pub fn clear(&mut self) -> Vec<CellEdit> {
        std::mem::take(&mut self.cells)
            .into_iter()
            .map(|(cell, before)| CellEdit {
                cell,
                before: Some(before),
                after: None,
            })
            .collect()
    }

    /// Set a cell to an exact state without bounds checks. Used when replaying history.
    pub(crate) fn restore(&mut self, cell: GridPoint, value: Option<HexColor>) {
        match value {
            Some(color) => {
                self.cells.insert(cell, color);
            }
            None => {
                self.cells.remove(&cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: HexColor = HexColor::new(255, 0, 0);
    const BLUE: HexColor = HexColor::new(0, 0, 255);

    #[test]
    fn cell_keys_round_trip_through_strings() {
        assert_eq!("3,-2".parse::<GridPoint>().unwrap(), GridPoint::new(3, -2));
        assert_eq!(GridPoint::new(-7, 40).to_string(), "-7,40");
        for bad in ["", "3", "3,", ",4", "3;4", "a,b", "1.5,2", "1,2,3"] {
            assert!(bad.parse::<GridPoint>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn paint_records_previous_value() {
        let mut grid = PatternGrid::new();
        let first = grid.paint(1, 2, RED, None).unwrap();
        assert_eq!(first.before, None);
        assert_eq!(first.after, Some(RED));

        let second = grid.paint(1, 2, BLUE, None).unwrap();
        assert_eq!(second.before, Some(RED));
        assert_eq!(grid.get(1, 2), Some(BLUE));
    }

    #[test]
    fn repainting_same_color_is_not_an_edit() {
        let mut grid = PatternGrid::new();
        grid.paint(0, 0, RED, None);
        assert_eq!(grid.paint(0, 0, RED, None), None);
        assert_eq!(grid.get(0, 0), Some(RED));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn paint_outside_shape_is_ignored() {
        let config = ProjectConfig::rectangle(14, 1.0, 1.0, 2);
        let mut grid = PatternGrid::new();
        assert_eq!(grid.paint(14, 0, RED, Some(&config)), None);
        assert_eq!(grid.paint(-1, 3, RED, Some(&config)), None);
        assert!(grid.is_empty());
        assert!(grid.paint(13, 13, RED, Some(&config)).is_some());
    }

    #[test]
    fn erase_removes_key_and_ignores_bounds() {
        let mut grid = PatternGrid::new();
        grid.paint(500, 500, RED, None);

        assert_eq!(grid.erase(4, 4), None);

        let edit = grid.erase(500, 500).unwrap();
        assert_eq!(edit.before, Some(RED));
        assert_eq!(edit.after, None);
        assert!(grid.is_empty());
        assert_eq!(grid.erase(500, 500), None);
    }

    #[test]
    fn clear_reports_every_cell() {
        let mut grid = PatternGrid::new();
        grid.paint(0, 0, RED, None);
        grid.paint(2, -1, BLUE, None);
        let edits = grid.clear();
        assert_eq!(edits.len(), 2);
        assert!(grid.is_empty());
        assert!(edits.iter().all(|edit| edit.after.is_none()));
    }

    #[test]
    fn snapshot_is_detached_from_grid() {
        let mut grid = PatternGrid::new();
        grid.paint(0, 0, RED, None);
        let snapshot = grid.snapshot();
        grid.paint(0, 0, BLUE, None);
        grid.paint(1, 0, BLUE, None);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(&GridPoint::new(0, 0)), Some(&RED));
    }
}
