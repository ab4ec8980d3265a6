use std::sync::Arc;

use tokio::sync::Mutex;

use crate::prelude::CoreResult;
use crate::zone::editor::{ToggleOutcome, ZoneEditor};

/// Cloneable handle that serializes pointer events from several tasks onto
/// one [`ZoneEditor`]. Events apply in lock-acquisition order.
#[derive(Clone)]
pub struct SharedZoneEditor {
    inner: Arc<Mutex<ZoneEditor>>,
}

impl SharedZoneEditor {
    pub fn new(editor: ZoneEditor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(editor)),
        }
    }

    pub async fn move_cursor(&self, px: f64, py: f64) {
        self.inner.lock().await.move_cursor(px, py);
    }

    pub async fn toggle_vertex(&self, px: f64, py: f64) -> CoreResult<ToggleOutcome> {
        self.inner.lock().await.toggle_vertex(px, py)
    }

    pub async fn toggle_vertex_off(&self, px: f64, py: f64) -> usize {
        self.inner.lock().await.toggle_vertex_off(px, py)
    }

    pub async fn cursor_vertex_exists(&self) -> Option<usize> {
        self.inner.lock().await.cursor_vertex_exists()
    }

    pub async fn clear(&self) {
        self.inner.lock().await.clear();
    }

    pub async fn set_edit_mode(&self, edit: bool) {
        self.inner.lock().await.set_edit_mode(edit);
    }

    /// Runs `f` against the editor while holding the lock.
    pub async fn read<R>(&self, f: impl FnOnce(&ZoneEditor) -> R) -> R {
        let guard = self.inner.lock().await;
        f(&guard)
    }

    pub async fn snapshot(&self) -> ZoneEditor {
        self.inner.lock().await.clone()
    }
}
