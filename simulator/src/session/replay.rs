use scopecore::telemetry::{LogManager, MetricsRecorder};
use scopecore::zone::{SharedZoneEditor, ZoneState};

use crate::session::model::{PointerEvent, SessionSummary, ZoneScript};

/// Applies `script` to `editor` in order and summarizes the resulting zone.
pub async fn replay(script: &ZoneScript, editor: &SharedZoneEditor) -> SessionSummary {
    let metrics = MetricsRecorder::new();
    let logger = LogManager::new("session");

    for event in &script.events {
        match *event {
            PointerEvent::Move { x, y } => editor.move_cursor(x, y).await,
            PointerEvent::Toggle { x, y } => match editor.toggle_vertex(x, y).await {
                Ok(outcome) => logger.trace_state(&format!("zone {}: {:?}", script.name, outcome)),
                Err(err) => {
                    logger.reject(&format!(
                        "zone {}: toggle at ({}, {}): {}",
                        script.name, x, y, err
                    ));
                    metrics.record_rejected();
                    continue;
                }
            },
            PointerEvent::ToggleOff { x, y } => {
                let removed = editor.toggle_vertex_off(x, y).await;
                logger.trace_state(&format!("zone {}: removed {} vertices", script.name, removed));
            }
            PointerEvent::Clear => editor.clear().await,
            PointerEvent::SetEditMode { edit } => editor.set_edit_mode(edit).await,
        }
        metrics.record_processed();
    }

    let cursor_vertex = editor.cursor_vertex_exists().await;
    editor
        .read(|zone| SessionSummary {
            record: zone.to_record(script.name.clone()),
            closed: zone.state() == ZoneState::Closed,
            center: zone.center(),
            cursor_vertex,
            events: metrics.snapshot(),
        })
        .await
}
