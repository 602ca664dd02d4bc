//! Bounded undo/redo over snapshots of the shape list.

use crate::shapes::Shape;
use std::collections::VecDeque;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 20;

/// A full, independent copy of the shape list at one point in time.
pub type HistoryEntry = Vec<Shape>;

/// Undo and redo stacks of shape-list snapshots.
///
/// The history never borrows the live shape list: every entry it stores or
/// hands back is an owned copy.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_UNDO_HISTORY)
    }
}

impl History {
    /// Create an empty history keeping at most `capacity` undo states.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(capacity),
            redo_stack: VecDeque::new(),
            capacity,
        }
    }

    /// Record the current state before a change.
    ///
    /// Drops the oldest undo state when full and clears the redo stack.
    pub fn push(&mut self, current: &[Shape]) {
        if self.undo_stack.len() >= self.capacity {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(current.to_vec());
        self.redo_stack.clear();
    }

    /// Step back. Returns the state to restore, or `None` if there is nothing to undo.
    pub fn undo(&mut self, current: &[Shape]) -> Option<HistoryEntry> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push_back(current.to_vec());
        Some(previous)
    }

    /// Step forward again. Returns the state to restore, or `None` if there is nothing to redo.
    ///
    /// The current state goes through [`History::push`], so a redo can itself
    /// be undone; like any push, this clears the remaining redo entries.
    pub fn redo(&mut self, current: &[Shape]) -> Option<HistoryEntry> {
        let next = self.redo_stack.pop_back()?;
        self.push(current);
        Some(next)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget every recorded state.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Segment};
    use kurbo::Point;
    use pretty_assertions::assert_eq;

    fn circle(r: f64) -> Shape {
        Shape::Circle(Circle::new(Point::ZERO, r))
    }

    /// Commit `n` circles through the history, the way the session does.
    fn commit_n(history: &mut History, shapes: &mut Vec<Shape>, n: usize) {
        for i in 0..n {
            history.push(shapes);
            shapes.push(circle(i as f64));
        }
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = History::default();
        assert!(history.undo(&[]).is_none());
        assert!(history.redo(&[]).is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_capacity_bound() {
        let mut history = History::default();
        let mut shapes = Vec::new();
        commit_n(&mut history, &mut shapes, 25);
        assert_eq!(history.undo_len(), 20);

        let mut steps = 0;
        while let Some(previous) = history.undo(&shapes) {
            shapes = previous;
            steps += 1;
        }
        assert_eq!(steps, 20);
        // The five oldest states were dropped.
        assert_eq!(shapes.len(), 5);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = History::default();
        let mut shapes = Vec::new();
        commit_n(&mut history, &mut shapes, 3);
        let before = shapes.clone();

        shapes = history.undo(&shapes).unwrap();
        assert_eq!(shapes.len(), 2);
        shapes = history.redo(&shapes).unwrap();
        assert_eq!(shapes, before);
        // The redo is itself undoable.
        assert!(history.can_undo());
        assert_eq!(history.undo(&shapes).unwrap().len(), 2);
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::default();
        let mut shapes = Vec::new();
        commit_n(&mut history, &mut shapes, 2);
        shapes = history.undo(&shapes).unwrap();
        assert!(history.can_redo());

        history.push(&shapes);
        shapes.push(Shape::Segment(Segment::new(Point::ZERO, Point::new(1.0, 1.0))));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_redo_drops_remaining_redo_entries() {
        let mut history = History::default();
        let mut shapes = Vec::new();
        commit_n(&mut history, &mut shapes, 3);
        shapes = history.undo(&shapes).unwrap();
        shapes = history.undo(&shapes).unwrap();
        assert_eq!(history.redo_len(), 2);

        shapes = history.redo(&shapes).unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_snapshots_are_independent() {
        let mut history = History::default();
        let mut shapes = vec![circle(1.0)];
        history.push(&shapes);
        shapes[0] = circle(99.0);
        let restored = history.undo(&shapes).unwrap();
        assert_eq!(restored, vec![circle(1.0)]);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new(5);
        let mut shapes = Vec::new();
        commit_n(&mut history, &mut shapes, 3);
        history.clear();
        assert_eq!(history.undo_len(), 0);
        assert_eq!(history.capacity(), 5);
    }
}
