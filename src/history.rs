//! Stroke-based undo/redo.
//!
//! Edits accumulate in an open stroke until [`HistoryLog::end_stroke`] closes it.
//! Undo replays a stroke's edits backwards restoring `before`; redo replays them
//! forwards restoring `after`.

use crate::grid::{CellEdit, PatternGrid};

/// One user gesture worth of cell edits, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stroke {
    edits: Vec<CellEdit>,
}

impl Stroke {
    pub fn new(edits: Vec<CellEdit>) -> Self {
        Self { edits }
    }

    pub fn edits(&self) -> &[CellEdit] {
        &self.edits
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    fn revert(&self, grid: &mut PatternGrid) {
        for edit in self.edits.iter().rev() {
            grid.restore(edit.cell, edit.before);
        }
    }

    fn reapply(&self, grid: &mut PatternGrid) {
        for edit in &self.edits {
            grid.restore(edit.cell, edit.after);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    undo_stack: Vec<Stroke>,
    redo_stack: Vec<Stroke>,
    current: Stroke,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh stroke. Pending edits of an unclosed stroke are dropped.
    pub fn begin_stroke(&mut self) {
        if !self.current.is_empty() {
            log::debug!(
                "Abandoning unclosed stroke with {} edits",
                self.current.len()
            );
        }
        self.current = Stroke::default();
    }

    pub fn record_edit(&mut self, edit: CellEdit) {
        self.current.edits.push(edit);
    }

    /// Close the open stroke. Returns `true` if it was committed to the undo stack.
    pub fn end_stroke(&mut self) -> bool {
        let stroke = std::mem::take(&mut self.current);
        self.commit(stroke)
    }

    /// Push a closed stroke onto the undo stack, invalidating redo. Empty strokes are discarded.
    pub fn commit(&mut self, stroke: Stroke) -> bool {
        if stroke.is_empty() {
            return false;
        }
        log::debug!("Committing stroke with {} edits", stroke.len());
        self.undo_stack.push(stroke);
        self.redo_stack.clear();
        true
    }

    pub fn undo(&mut self, grid: &mut PatternGrid) -> bool {
        let Some(stroke) = self.undo_stack.pop() else {
            return false;
        };
        log::debug!("Undoing stroke with {} edits", stroke.len());
        stroke.revert(grid);
        self.redo_stack.push(stroke);
        true
    }

    pub fn redo(&mut self, grid: &mut PatternGrid) -> bool {
        let Some(stroke) = self.redo_stack.pop() else {
            return false;
        };
        log::debug!("Redoing stroke with {} edits", stroke.len());
        stroke.reapply(grid);
        self.undo_stack.push(stroke);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// The stroke the next undo would revert.
    pub fn last_undo(&self) -> Option<&Stroke> {
        self.undo_stack.last()
    }

    /// Edits recorded since the last begin/end.
    pub fn pending(&self) -> &Stroke {
        &self.current
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current = Stroke::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;

    const RED: HexColor = HexColor::new(255, 0, 0);
    const GREEN: HexColor = HexColor::new(0, 255, 0);
    const BLUE: HexColor = HexColor::new(0, 0, 255);

    fn paint(grid: &mut PatternGrid, log: &mut HistoryLog, x: i32, y: i32, color: HexColor) {
        if let Some(edit) = grid.paint(x, y, color, None) {
            log.record_edit(edit);
        }
    }

    #[test]
    fn empty_stroke_is_discarded() {
        let mut log = HistoryLog::new();
        log.begin_stroke();
        assert!(!log.end_stroke());
        assert!(!log.can_undo());
    }

    #[test]
    fn overpainting_in_one_stroke_undoes_to_original() {
        let mut grid = PatternGrid::new();
        let mut log = HistoryLog::new();
        paint(&mut grid, &mut log, 0, 0, RED);
        log.end_stroke();
        let before = grid.clone();

        log.begin_stroke();
        paint(&mut grid, &mut log, 0, 0, GREEN);
        paint(&mut grid, &mut log, 0, 0, BLUE);
        paint(&mut grid, &mut log, 1, 0, BLUE);
        if let Some(edit) = grid.erase(1, 0) {
            log.record_edit(edit);
        }
        paint(&mut grid, &mut log, 1, 0, GREEN);
        assert!(log.end_stroke());
        let after = grid.clone();

        assert!(log.undo(&mut grid));
        assert_eq!(grid, before);

        assert!(log.redo(&mut grid));
        assert_eq!(grid, after);
    }

    #[test]
    fn empty_stacks_are_no_ops() {
        let mut grid = PatternGrid::new();
        let mut log = HistoryLog::new();
        assert!(!log.undo(&mut grid));
        assert!(!log.redo(&mut grid));
        assert!(grid.is_empty());
    }

    #[test]
    fn new_commit_clears_redo() {
        let mut grid = PatternGrid::new();
        let mut log = HistoryLog::new();
        log.begin_stroke();
        paint(&mut grid, &mut log, 0, 0, RED);
        log.end_stroke();

        log.undo(&mut grid);
        assert!(log.can_redo());

        log.begin_stroke();
        paint(&mut grid, &mut log, 5, 5, GREEN);
        log.end_stroke();

        assert!(!log.can_redo());
        assert!(!log.redo(&mut grid));
        assert_eq!(grid.get(0, 0), None);
        assert_eq!(grid.get(5, 5), Some(GREEN));
    }

    #[test]
    fn begin_stroke_drops_pending_edits() {
        let mut grid = PatternGrid::new();
        let mut log = HistoryLog::new();
        log.begin_stroke();
        paint(&mut grid, &mut log, 0, 0, RED);
        assert_eq!(log.pending().len(), 1);

        log.begin_stroke();
        assert!(log.pending().is_empty());
        assert!(!log.end_stroke());
        assert_eq!(log.undo_depth(), 0);
    }

    #[test]
    fn strokes_move_between_stacks() {
        let mut grid = PatternGrid::new();
        let mut log = HistoryLog::new();
        for x in 0..3 {
            log.begin_stroke();
            paint(&mut grid, &mut log, x, 0, RED);
            log.end_stroke();
        }
        assert_eq!((log.undo_depth(), log.redo_depth()), (3, 0));

        log.undo(&mut grid);
        log.undo(&mut grid);
        assert_eq!((log.undo_depth(), log.redo_depth()), (1, 2));
        assert_eq!(grid.len(), 1);

        log.redo(&mut grid);
        assert_eq!((log.undo_depth(), log.redo_depth()), (2, 1));
        assert_eq!(grid.get(1, 0), Some(RED));
        assert_eq!(grid.get(2, 0), None);
    }
}
