use serde::{Deserialize, Serialize};

use crate::interface::zone::ZoneRecord;
use crate::prelude::{CoreError, CoreResult};
use crate::telemetry::log::LogManager;
use crate::zone::grid::{GridSpace, GridVertex};

/// Editing state of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneState {
    /// Accepts inserts, removals and the closing re-selection of the anchor.
    Open,
    /// Polygon is finished; `toggle_vertex` is rejected until `clear` or
    /// `set_edit_mode(true)`.
    Closed,
}

/// Effect of an accepted `toggle_vertex` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToggleOutcome {
    Inserted(GridVertex),
    Removed(GridVertex),
    /// The anchor was re-selected and a closing copy appended.
    Closed(GridVertex),
}

/// Midpoint of the vertices' axis-aligned bounding box, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneCenter {
    pub x: f64,
    pub y: f64,
}

/// Last pointer position in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub x: f64,
    pub y: f64,
}

/// Bounding-box midpoint of `vertices`; this is not the polygon centroid.
pub fn compute_center(vertices: &[GridVertex]) -> CoreResult<ZoneCenter> {
    let first = vertices
        .first()
        .ok_or_else(|| CoreError::invalid("cannot compute the center of an empty zone"))?;

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.col, first.col, first.row, first.row);
    for vertex in &vertices[1..] {
        min_x = min_x.min(vertex.col);
        max_x = max_x.max(vertex.col);
        min_y = min_y.min(vertex.row);
        max_y = max_y.max(vertex.row);
    }

    Ok(ZoneCenter {
        x: (max_x as f64 + min_x as f64) / 2.0,
        y: (max_y as f64 + min_y as f64) / 2.0,
    })
}

/// Pointer-driven polygon editor over a fixed [`GridSpace`].
///
/// Vertices keep insertion order. The first one is the anchor: picking it
/// again while at least two vertices exist appends a closing copy and moves
/// the zone to [`ZoneState::Closed`]. Picking any other existing vertex
/// removes every copy of it, and picking an empty cell appends it.
///
/// Not thread-safe; wrap it in
/// [`SharedZoneEditor`](crate::zone::shared::SharedZoneEditor) when pointer
/// events arrive from more than one task.
#[derive(Debug, Clone)]
pub struct ZoneEditor {
    grid: GridSpace,
    vertices: Vec<GridVertex>,
    anchor: Option<GridVertex>,
    center: Option<ZoneCenter>,
    state: ZoneState,
    cursor: Cursor,
    logger: LogManager,
}

impl ZoneEditor {
    pub fn new(grid: GridSpace) -> Self {
        Self {
            grid,
            vertices: Vec::new(),
            anchor: None,
            center: None,
            state: ZoneState::Open,
            cursor: Cursor::default(),
            logger: LogManager::new("zone"),
        }
    }

    /// Rebuilds an editor from a stored zone. A record whose last corner
    /// repeats the first (with at least three corners) comes back closed.
    pub fn from_record(grid: GridSpace, record: &ZoneRecord) -> Self {
        let mut editor = Self::new(grid);
        editor.vertices = record.corners.iter().copied().map(GridVertex::from).collect();
        let n = editor.vertices.len();
        if n >= 3 && editor.vertices[0] == editor.vertices[n - 1] {
            editor.state = ZoneState::Closed;
        }
        editor.refresh();
        editor
    }

    pub fn to_record(&self, name: impl Into<String>) -> ZoneRecord {
        ZoneRecord {
            name: name.into(),
            corners: self.vertices.iter().copied().map(Into::into).collect(),
        }
    }

    pub fn grid(&self) -> &GridSpace {
        &self.grid
    }

    pub fn vertices(&self) -> &[GridVertex] {
        &self.vertices
    }

    pub fn anchor(&self) -> Option<GridVertex> {
        self.anchor
    }

    /// `None` while the zone is empty.
    pub fn center(&self) -> Option<ZoneCenter> {
        self.center
    }

    pub fn state(&self) -> ZoneState {
        self.state
    }

    pub fn is_edit_mode(&self) -> bool {
        self.state == ZoneState::Open
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn map_to_grid(&self, px: f64, py: f64) -> GridVertex {
        self.grid.map_to_grid(px, py)
    }

    pub fn move_cursor(&mut self, px: f64, py: f64) {
        self.cursor = Cursor { x: px, y: py };
    }

    /// Applies the insert / remove / close rule at a pixel position.
    ///
    /// A closed zone rejects the call with [`CoreError::ZoneClosed`] and is
    /// left unchanged. Closing needs at least two vertices: re-selecting a
    /// lone anchor removes it instead of appending a closing copy.
    pub fn toggle_vertex(&mut self, px: f64, py: f64) -> CoreResult<ToggleOutcome> {
        if self.state == ZoneState::Closed {
            return Err(CoreError::ZoneClosed);
        }

        let vertex = self.grid.map_to_grid(px, py);
        let outcome = if self.anchor == Some(vertex) && self.vertices.len() >= 2 {
            self.vertices.push(vertex);
            self.state = ZoneState::Closed;
            ToggleOutcome::Closed(vertex)
        } else if self.vertices.contains(&vertex) {
            self.vertices.retain(|v| *v != vertex);
            ToggleOutcome::Removed(vertex)
        } else {
            self.vertices.push(vertex);
            ToggleOutcome::Inserted(vertex)
        };

        self.refresh();
        self.logger.trace_state(&format!(
            "{:?}; {} vertices, state {:?}",
            outcome,
            self.vertices.len(),
            self.state
        ));
        Ok(outcome)
    }

    /// Removes every vertex at the pixel position, whatever the edit state.
    /// The edit state itself is never changed, even when the zone empties.
    /// Returns how many were removed.
    pub fn toggle_vertex_off(&mut self, px: f64, py: f64) -> usize {
        let vertex = self.grid.map_to_grid(px, py);
        let before = self.vertices.len();
        self.vertices.retain(|v| *v != vertex);
        let removed = before - self.vertices.len();
        if removed > 0 {
            self.refresh();
            self.logger
                .trace_state(&format!("removed {} copies of {:?}", removed, vertex));
        }
        removed
    }

    /// Index of the vertex under the cursor; `Some(0)` is the anchor.
    pub fn cursor_vertex_exists(&self) -> Option<usize> {
        let vertex = self.grid.map_to_grid(self.cursor.x, self.cursor.y);
        self.vertices.iter().position(|v| *v == vertex)
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.state = ZoneState::Open;
        self.refresh();
        self.logger.trace_state("cleared");
    }

    pub fn set_edit_mode(&mut self, edit: bool) {
        self.state = if edit {
            ZoneState::Open
        } else {
            ZoneState::Closed
        };
    }

    fn refresh(&mut self) {
        self.anchor = self.vertices.first().copied();
        self.center = compute_center(&self.vertices).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> ZoneEditor {
        ZoneEditor::new(GridSpace::new(100.0, 100.0, 4).unwrap())
    }

    #[test]
    fn anchor_reselection_closes_zone() {
        let mut zone = editor();
        assert_eq!(
            zone.toggle_vertex(0.0, 0.0).unwrap(),
            ToggleOutcome::Inserted(GridVertex::new(0, 0))
        );
        assert_eq!(
            zone.toggle_vertex(50.0, 0.0).unwrap(),
            ToggleOutcome::Inserted(GridVertex::new(2, 0))
        );
        assert_eq!(zone.vertices().len(), 2);

        assert_eq!(
            zone.toggle_vertex(0.0, 0.0).unwrap(),
            ToggleOutcome::Closed(GridVertex::new(0, 0))
        );
        assert!(!zone.is_edit_mode());
        assert_eq!(zone.vertices().len(), 3);
        assert_eq!(zone.vertices()[2], GridVertex::new(0, 0));
    }

    #[test]
    fn closed_zone_rejects_toggles_without_mutation() {
        let mut zone = editor();
        zone.toggle_vertex(0.0, 0.0).unwrap();
        zone.toggle_vertex(50.0, 50.0).unwrap();
        zone.toggle_vertex(0.0, 0.0).unwrap();
        let before = zone.vertices().to_vec();

        assert_eq!(zone.toggle_vertex(75.0, 25.0), Err(CoreError::ZoneClosed));
        assert_eq!(zone.toggle_vertex(50.0, 50.0), Err(CoreError::ZoneClosed));
        assert_eq!(zone.vertices(), before.as_slice());

        zone.set_edit_mode(false);
        assert!(zone.toggle_vertex(75.0, 25.0).is_err());
    }

    #[test]
    fn non_anchor_reselection_removes_vertex() {
        let mut zone = editor();
        zone.toggle_vertex(0.0, 0.0).unwrap();
        zone.toggle_vertex(50.0, 0.0).unwrap();
        zone.toggle_vertex(50.0, 50.0).unwrap();

        assert_eq!(
            zone.toggle_vertex(52.0, 3.0).unwrap(),
            ToggleOutcome::Removed(GridVertex::new(2, 0))
        );
        assert_eq!(
            zone.vertices(),
            &[GridVertex::new(0, 0), GridVertex::new(2, 2)]
        );
        assert!(zone.is_edit_mode());
    }

    #[test]
    fn lone_anchor_reselection_removes_it() {
        let mut zone = editor();
        zone.toggle_vertex(25.0, 25.0).unwrap();
        assert_eq!(
            zone.toggle_vertex(25.0, 25.0).unwrap(),
            ToggleOutcome::Removed(GridVertex::new(1, 1))
        );
        assert!(zone.vertices().is_empty());
        assert_eq!(zone.anchor(), None);
        assert_eq!(zone.center(), None);
    }

    #[test]
    fn center_is_bounding_box_midpoint() {
        let square = [
            GridVertex::new(0, 0),
            GridVertex::new(2, 0),
            GridVertex::new(2, 2),
            GridVertex::new(0, 2),
        ];
        assert_eq!(
            compute_center(&square).unwrap(),
            ZoneCenter { x: 1.0, y: 1.0 }
        );
        assert!(matches!(
            compute_center(&[]),
            Err(CoreError::InvalidArgument(_))
        ));

        let mut zone = editor();
        zone.toggle_vertex(0.0, 0.0).unwrap();
        zone.toggle_vertex(75.0, 0.0).unwrap();
        zone.toggle_vertex(75.0, 50.0).unwrap();
        assert_eq!(zone.center(), Some(ZoneCenter { x: 1.5, y: 1.0 }));
    }

    #[test]
    fn cursor_lookup_reports_indices() {
        let mut zone = editor();
        zone.toggle_vertex(0.0, 0.0).unwrap();
        zone.toggle_vertex(50.0, 0.0).unwrap();

        zone.move_cursor(90.0, 90.0);
        assert_eq!(zone.cursor_vertex_exists(), None);
        zone.move_cursor(4.0, 6.0);
        assert_eq!(zone.cursor_vertex_exists(), Some(0));
        zone.move_cursor(49.0, 1.0);
        assert_eq!(zone.cursor_vertex_exists(), Some(1));
        assert_eq!(zone.cursor(), Cursor { x: 49.0, y: 1.0 });
    }

    #[test]
    fn toggle_off_ignores_edit_mode() {
        let mut zone = editor();
        zone.toggle_vertex(0.0, 0.0).unwrap();
        zone.toggle_vertex(50.0, 0.0).unwrap();
        zone.toggle_vertex(50.0, 50.0).unwrap();
        zone.toggle_vertex(0.0, 0.0).unwrap();
        assert_eq!(zone.state(), ZoneState::Closed);

        assert_eq!(zone.toggle_vertex_off(50.0, 0.0), 1);
        assert_eq!(zone.vertices().len(), 3);
        // removing the anchor drops both copies and promotes the next vertex
        assert_eq!(zone.toggle_vertex_off(0.0, 0.0), 2);
        assert_eq!(zone.anchor(), Some(GridVertex::new(2, 2)));
        assert_eq!(zone.toggle_vertex_off(10.0, 90.0), 0);
        assert_eq!(zone.toggle_vertex_off(50.0, 50.0), 1);
        assert!(zone.vertices().is_empty());
        assert_eq!(zone.center(), None);
        // only clear() reopens
        assert_eq!(zone.state(), ZoneState::Closed);
    }

    #[test]
    fn toggle_off_keeps_frozen_state() {
        let mut zone = editor();
        zone.toggle_vertex(0.0, 0.0).unwrap();
        zone.set_edit_mode(false);

        assert_eq!(zone.toggle_vertex_off(0.0, 0.0), 1);
        assert!(zone.vertices().is_empty());
        assert!(!zone.is_edit_mode());
        assert_eq!(zone.toggle_vertex(25.0, 25.0), Err(CoreError::ZoneClosed));

        zone.clear();
        assert!(zone.is_edit_mode());
    }

    #[test]
    fn freeze_and_unfreeze_open_zone() {
        let mut zone = editor();
        zone.toggle_vertex(0.0, 0.0).unwrap();
        zone.toggle_vertex(50.0, 0.0).unwrap();

        zone.set_edit_mode(false);
        assert_eq!(zone.state(), ZoneState::Closed);
        assert_eq!(zone.toggle_vertex(75.0, 75.0), Err(CoreError::ZoneClosed));
        assert_eq!(zone.vertices().len(), 2);

        zone.set_edit_mode(true);
        assert_eq!(
            zone.toggle_vertex(75.0, 75.0).unwrap(),
            ToggleOutcome::Inserted(GridVertex::new(3, 3))
        );
        assert_eq!(zone.vertices().len(), 3);
    }

    #[test]
    fn reopened_zone_keeps_closing_copy_and_closes_again() {
        let mut zone = editor();
        zone.toggle_vertex(0.0, 0.0).unwrap();
        zone.toggle_vertex(50.0, 0.0).unwrap();
        zone.toggle_vertex(50.0, 50.0).unwrap();
        zone.toggle_vertex(0.0, 0.0).unwrap();

        zone.set_edit_mode(true);
        assert_eq!(zone.vertices().len(), 4);
        assert_eq!(zone.anchor(), Some(GridVertex::new(0, 0)));

        assert_eq!(
            zone.toggle_vertex(0.0, 0.0).unwrap(),
            ToggleOutcome::Closed(GridVertex::new(0, 0))
        );
        assert_eq!(zone.state(), ZoneState::Closed);
        assert_eq!(
            zone.vertices(),
            &[
                GridVertex::new(0, 0),
                GridVertex::new(2, 0),
                GridVertex::new(2, 2),
                GridVertex::new(0, 0),
                GridVertex::new(0, 0),
            ]
        );
    }

    #[test]
    fn clear_reopens_zone() {
        let mut zone = editor();
        zone.toggle_vertex(0.0, 0.0).unwrap();
        zone.toggle_vertex(50.0, 0.0).unwrap();
        zone.toggle_vertex(0.0, 0.0).unwrap();
        zone.clear();
        assert!(zone.vertices().is_empty());
        assert!(zone.is_edit_mode());
        assert!(zone.toggle_vertex(25.0, 25.0).is_ok());
    }

    #[test]
    fn record_round_trip_preserves_closure() {
        let mut zone = editor();
        zone.toggle_vertex(0.0, 0.0).unwrap();
        zone.toggle_vertex(50.0, 0.0).unwrap();
        zone.toggle_vertex(50.0, 50.0).unwrap();
        zone.toggle_vertex(0.0, 0.0).unwrap();

        let record = zone.to_record("loading bay");
        assert_eq!(record.corners, vec![[0, 0], [2, 0], [2, 2], [0, 0]]);

        let restored = ZoneEditor::from_record(*zone.grid(), &record);
        assert_eq!(restored.state(), ZoneState::Closed);
        assert_eq!(restored.vertices(), zone.vertices());
        assert_eq!(restored.center(), zone.center());
    }
}
