use crate::zones::geometry::{to_reference_frame, Point};
use crate::zones::model::Zone;

/// Points collected before the quick-draw path commits a zone.
pub const QUICK_DRAW_POINTS: usize = 4;

/// Observable editor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Drawing,
    Selected,
}

/// What a canvas click did to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Drawing continues; `pending` points are buffered so far.
    PointAdded { pending: usize },
    /// The draft reached four points and became a zone.
    ZoneCommitted { id: u32 },
    Selected { id: u32 },
    SelectionCleared,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum EditorError {
    #[error("no zone selected")]
    NoSelection,
    #[error("unknown zone id {0}")]
    UnknownZone(u32),
    #[error("zone name must not be empty")]
    EmptyName,
}

/// Interactive zone editor for one area's camera frame.
///
/// Owns the working zone set exclusively until it is saved back to the
/// backend; all coordinates are in the fixed reference frame.
#[derive(Debug, Default)]
pub struct ZoneEditor {
    zones: Vec<Zone>,
    draft: Vec<Point>,
    selection: Option<u32>,
    drawing: bool,
}

impl ZoneEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working set, e.g. with zones loaded from the backend.
    pub fn load(&mut self, zones: Vec<Zone>) {
        self.zones = zones;
        self.draft.clear();
        self.selection = None;
        self.drawing = false;
    }

    pub fn state(&self) -> EditorState {
        if self.drawing {
            EditorState::Drawing
        } else if self.selection.is_some() {
            EditorState::Selected
        } else {
            EditorState::Idle
        }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn draft(&self) -> &[Point] {
        &self.draft
    }

    pub fn selected(&self) -> Option<&Zone> {
        let id = self.selection?;
        self.zones.iter().find(|zone| zone.id == id)
    }

    /// Enter drawing mode, discarding any draft points and selection.
    pub fn start_drawing(&mut self) {
        self.drawing = true;
        self.draft.clear();
        self.selection = None;
    }

    /// Abort an in-progress draft without committing it.
    pub fn cancel_drawing(&mut self) {
        self.drawing = false;
        self.draft.clear();
    }

    /// Handle a canvas click in reference-frame coordinates.
    pub fn click(&mut self, point: Point) -> ClickOutcome {
        if self.drawing {
            self.draft.push(point);
            if self.draft.len() == QUICK_DRAW_POINTS {
                let id = self.next_zone_id();
                let points = std::mem::take(&mut self.draft);
                self.zones.push(Zone::new(id, format!("Zone {id}"), points));
                self.drawing = false;
                return ClickOutcome::ZoneCommitted { id };
            }
            return ClickOutcome::PointAdded {
                pending: self.draft.len(),
            };
        }

        match self.hit_test(point) {
            Some(id) => {
                self.selection = Some(id);
                ClickOutcome::Selected { id }
            }
            None => {
                self.selection = None;
                ClickOutcome::SelectionCleared
            }
        }
    }

    /// Canvas handler entry point: scale an on-screen click into the
    /// reference frame, then treat it as a normal click.
    ///
    /// Returns `None` when the rendered size is degenerate.
    pub fn click_at_screen(
        &mut self,
        screen_x: f32,
        screen_y: f32,
        rendered_width: f32,
        rendered_height: f32,
    ) -> Option<ClickOutcome> {
        let point = to_reference_frame(screen_x, screen_y, rendered_width, rendered_height)?;
        Some(self.click(point))
    }

    /// First zone containing the point, in insertion order.
    pub fn hit_test(&self, point: Point) -> Option<u32> {
        self.zones
            .iter()
            .find(|zone| zone.contains(point))
            .map(|zone| zone.id)
    }

    /// Next auto-increment id: one past the current maximum, 1 when empty.
    pub fn next_zone_id(&self) -> u32 {
        self.zones
            .iter()
            .map(|zone| zone.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Select an existing zone by id, e.g. from the side list.
    pub fn select(&mut self, id: u32) -> Result<(), EditorError> {
        if self.zones.iter().any(|zone| zone.id == id) {
            self.drawing = false;
            self.draft.clear();
            self.selection = Some(id);
            Ok(())
        } else {
            Err(EditorError::UnknownZone(id))
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Remove the selected zone and return to idle.
    pub fn delete_selected(&mut self) -> Result<u32, EditorError> {
        let id = self.selection.ok_or(EditorError::NoSelection)?;
        self.zones.retain(|zone| zone.id != id);
        self.selection = None;
        Ok(id)
    }

    /// Rename the selected zone; the selection is kept.
    pub fn rename_selected(&mut self, name: &str) -> Result<(), EditorError> {
        let id = self.selection.ok_or(EditorError::NoSelection)?;
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(EditorError::EmptyName);
        }
        if let Some(zone) = self.zones.iter_mut().find(|zone| zone.id == id) {
            zone.name = trimmed.to_string();
        }
        Ok(())
    }

    pub fn delete_all(&mut self) {
        self.zones.clear();
        self.selection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(origin_x: f32) -> Vec<Point> {
        vec![
            Point::new(origin_x, 0.0),
            Point::new(origin_x + 10.0, 0.0),
            Point::new(origin_x + 10.0, 10.0),
            Point::new(origin_x, 10.0),
        ]
    }

    fn draw_square(editor: &mut ZoneEditor, origin_x: f32) -> ClickOutcome {
        editor.start_drawing();
        let mut outcome = ClickOutcome::SelectionCleared;
        for point in square(origin_x) {
            outcome = editor.click(point);
        }
        outcome
    }

    #[test]
    fn fourth_click_commits_a_zone_and_returns_to_idle() {
        let mut editor = ZoneEditor::new();
        editor.start_drawing();
        assert_eq!(editor.state(), EditorState::Drawing);

        let points = square(0.0);
        assert_eq!(editor.click(points[0]), ClickOutcome::PointAdded { pending: 1 });
        assert_eq!(editor.click(points[1]), ClickOutcome::PointAdded { pending: 2 });
        assert_eq!(editor.click(points[2]), ClickOutcome::PointAdded { pending: 3 });
        assert_eq!(editor.click(points[3]), ClickOutcome::ZoneCommitted { id: 1 });

        assert_eq!(editor.state(), EditorState::Idle);
        assert_eq!(editor.zones().len(), 1);
        assert_eq!(editor.zones()[0].name, "Zone 1");
        assert!(editor.draft().is_empty());
    }

    #[test]
    fn ids_auto_increment_past_the_maximum() {
        let mut editor = ZoneEditor::new();
        editor.load(vec![
            Zone::new(1, "Zone 1", square(0.0)),
            Zone::new(3, "Zone 3", square(20.0)),
            Zone::new(4, "Zone 4", square(40.0)),
        ]);
        assert_eq!(draw_square(&mut editor, 60.0), ClickOutcome::ZoneCommitted { id: 5 });
    }

    #[test]
    fn first_zone_gets_id_one() {
        let mut editor = ZoneEditor::new();
        assert_eq!(draw_square(&mut editor, 0.0), ClickOutcome::ZoneCommitted { id: 1 });
    }

    #[test]
    fn idle_click_selects_the_first_containing_zone() {
        let mut editor = ZoneEditor::new();
        // Overlapping squares; insertion order decides the winner.
        editor.load(vec![
            Zone::new(7, "front", square(0.0)),
            Zone::new(8, "behind", square(5.0)),
        ]);

        assert_eq!(editor.click(Point::new(6.0, 5.0)), ClickOutcome::Selected { id: 7 });
        assert_eq!(editor.state(), EditorState::Selected);
        assert_eq!(editor.selected().unwrap().name, "front");

        assert_eq!(editor.click(Point::new(200.0, 200.0)), ClickOutcome::SelectionCleared);
        assert_eq!(editor.state(), EditorState::Idle);
    }

    #[test]
    fn start_drawing_discards_draft_and_selection() {
        let mut editor = ZoneEditor::new();
        editor.load(vec![Zone::new(1, "Zone 1", square(0.0))]);
        editor.select(1).unwrap();

        editor.start_drawing();
        editor.click(Point::new(1.0, 1.0));
        editor.start_drawing();
        assert!(editor.draft().is_empty());
        assert_eq!(editor.selected(), None);
    }

    #[test]
    fn delete_and_rename_require_a_selection() {
        let mut editor = ZoneEditor::new();
        editor.load(vec![Zone::new(2, "Zone 2", square(0.0))]);

        assert_eq!(editor.delete_selected(), Err(EditorError::NoSelection));
        assert_eq!(editor.rename_selected("Queue"), Err(EditorError::NoSelection));

        editor.select(2).unwrap();
        editor.rename_selected("  Entrance Queue  ").unwrap();
        assert_eq!(editor.selected().unwrap().name, "Entrance Queue");
        assert_eq!(editor.rename_selected("   "), Err(EditorError::EmptyName));
        assert_eq!(editor.state(), EditorState::Selected);

        assert_eq!(editor.delete_selected(), Ok(2));
        assert_eq!(editor.state(), EditorState::Idle);
        assert!(editor.zones().is_empty());
    }

    #[test]
    fn screen_clicks_are_scaled_before_hit_testing() {
        let mut editor = ZoneEditor::new();
        // Zone covering the middle of the reference frame.
        editor.load(vec![Zone::new(
            1,
            "Zone 1",
            vec![
                Point::new(600.0, 320.0),
                Point::new(680.0, 320.0),
                Point::new(680.0, 400.0),
                Point::new(600.0, 400.0),
            ],
        )]);

        // A half-size canvas: screen (320, 180) lands at (640, 360).
        let outcome = editor.click_at_screen(320.0, 180.0, 640.0, 360.0);
        assert_eq!(outcome, Some(ClickOutcome::Selected { id: 1 }));
        assert_eq!(editor.click_at_screen(10.0, 10.0, 0.0, 360.0), None);
    }

    #[test]
    fn select_rejects_unknown_ids() {
        let mut editor = ZoneEditor::new();
        assert_eq!(editor.select(9), Err(EditorError::UnknownZone(9)));
    }
}
