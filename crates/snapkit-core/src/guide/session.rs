//! Bracketing of related snap queries.

use crate::geometry::{RectExt, bounding_rect};
use crate::scene::ElementId;
use kurbo::{Line, Rect};
use std::collections::HashSet;

/// Growth applied to the visual bounding box so hairlines are fully repainted.
const INVALIDATION_PADDING: f64 = 1.0;

/// Elements the guides must ignore for the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
    ids: HashSet<ElementId>,
}

impl Exclusions {
    /// Add elements to the exclusion set.
    pub fn use_exclusions(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.ids.extend(ids);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// State of a (possibly nested) mapping session.
///
/// `begin` and `finish` must be paired. Visuals recorded while the session is
/// active replace the previous session's visuals when the outermost `finish`
/// runs.
#[derive(Debug, Clone, Default)]
pub struct Session {
    depth: u32,
    visuals: Vec<Line>,
    area: Option<Rect>,
    exclusions: Exclusions,
    flushed: Vec<Line>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session level. The outermost level discards stale visuals.
    pub fn begin(&mut self) {
        if self.depth == 0 {
            self.visuals.clear();
        }
        self.depth += 1;
    }

    /// Close a session level.
    ///
    /// When the outermost level closes, returns the area to repaint: the
    /// union of the previously drawn visuals and the new ones. Returns `None`
    /// for inner levels, for unbalanced calls, and when nothing was ever drawn.
    pub fn finish(&mut self) -> Option<Rect> {
        if self.depth == 0 {
            log::warn!("finish_map called without a matching begin_map");
            return None;
        }
        self.depth -= 1;
        if self.depth > 0 {
            return None;
        }

        self.exclusions.clear();
        let previous = self.area.take();
        let current = bounding_rect(self.visuals.iter().flat_map(|l| [l.p0, l.p1])).map(|r| {
            r.expanded(
                INVALIDATION_PADDING,
                INVALIDATION_PADDING,
                INVALIDATION_PADDING,
                INVALIDATION_PADDING,
            )
        });
        self.flushed = std::mem::take(&mut self.visuals);
        self.area = current;

        match (previous, current) {
            (Some(p), Some(c)) => Some(p.union(c)),
            (p, c) => p.or(c),
        }
    }

    /// Check if a session is open.
    pub fn is_active(&self) -> bool {
        self.depth > 0
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Record a guide line. Ignored outside a session.
    pub fn record(&mut self, line: Line) {
        if self.is_active() {
            self.visuals.push(line);
        }
    }

    /// Visuals recorded so far in the open session.
    pub fn visuals(&self) -> &[Line] {
        &self.visuals
    }

    /// Area covered by the last flushed visuals.
    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    /// Visuals of the last completed session.
    pub fn flushed(&self) -> &[Line] {
        &self.flushed
    }

    /// Take the visuals of the last completed session, leaving the buffer empty.
    pub fn take_flushed(&mut self) -> Vec<Line> {
        std::mem::take(&mut self.flushed)
    }

    pub fn exclusions(&self) -> &Exclusions {
        &self.exclusions
    }

    pub fn exclusions_mut(&mut self) -> &mut Exclusions {
        &mut self.exclusions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_record_outside_session_is_ignored() {
        let mut session = Session::new();
        session.record(Line::new((0.0, 0.0), (10.0, 0.0)));
        assert!(session.visuals().is_empty());
    }

    #[test]
    fn test_nested_sessions_flush_once() {
        let mut session = Session::new();
        session.begin();
        session.begin();
        session.record(Line::new((0.0, 0.0), (10.0, 0.0)));
        assert_eq!(session.finish(), None);
        assert!(session.is_active());
        let area = session.finish().unwrap();
        assert_eq!(area, Rect::new(-1.0, -1.0, 11.0, 1.0));
        assert!(!session.is_active());
        assert_eq!(session.flushed().len(), 1);
    }

    #[test]
    fn test_next_session_invalidates_previous_visuals() {
        let mut session = Session::new();
        session.begin();
        session.record(Line::new((0.0, 0.0), (10.0, 0.0)));
        session.finish();

        session.begin();
        assert!(session.visuals().is_empty());
        session.record(Line::new((50.0, 50.0), (50.0, 60.0)));
        let area = session.finish().unwrap();
        assert_eq!(area, Rect::new(-1.0, -1.0, 51.0, 61.0));
        assert_eq!(session.area(), Some(Rect::new(49.0, 49.0, 51.0, 61.0)));

        // Nothing new: only the old area needs repainting.
        session.begin();
        assert_eq!(session.finish(), Some(Rect::new(49.0, 49.0, 51.0, 61.0)));
        assert_eq!(session.area(), None);
        session.begin();
        assert_eq!(session.finish(), None);
    }

    #[test]
    fn test_unbalanced_finish_is_ignored() {
        let mut session = Session::new();
        assert_eq!(session.finish(), None);
        assert_eq!(session.depth(), 0);
    }

    #[test]
    fn test_exclusions_cleared_on_outermost_finish() {
        let mut session = Session::new();
        let id = Uuid::new_v4();
        session.begin();
        session.exclusions_mut().use_exclusions([id, id, Uuid::new_v4()]);
        assert_eq!(session.exclusions().len(), 2);
        session.begin();
        session.finish();
        assert!(session.exclusions().contains(id));
        session.finish();
        assert!(session.exclusions().is_empty());
    }

    #[test]
    fn test_take_flushed_empties_buffer() {
        let mut session = Session::new();
        session.begin();
        session.record(Line::new((0.0, 0.0), (0.0, 5.0)));
        session.finish();
        assert_eq!(session.take_flushed().len(), 1);
        assert!(session.take_flushed().is_empty());
    }
}
