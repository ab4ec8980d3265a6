pub mod editor;
pub mod grid;
pub mod shared;

pub use editor::{compute_center, Cursor, ToggleOutcome, ZoneCenter, ZoneEditor, ZoneState};
pub use grid::{GridSpace, GridVertex};
pub use shared::SharedZoneEditor;
