use anyhow::Context;
use scopecore::interface::ZoneRecord;
use scopecore::telemetry::Metrics;
use scopecore::zone::ZoneCenter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Pointer event as emitted by the dashboard's canvas handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Move { x: f64, y: f64 },
    Toggle { x: f64, y: f64 },
    ToggleOff { x: f64, y: f64 },
    Clear,
    SetEditMode { edit: bool },
}

/// Named sequence of pointer events for one zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneScript {
    pub name: String,
    pub events: Vec<PointerEvent>,
}

impl ZoneScript {
    /// Reads a YAML (or JSON) script.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading zone script {}", path_ref.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing zone script {}", path_ref.display()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub record: ZoneRecord,
    pub closed: bool,
    pub center: Option<ZoneCenter>,
    /// Vertex index under the final cursor position.
    pub cursor_vertex: Option<usize>,
    pub events: Metrics,
}
