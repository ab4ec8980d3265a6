use serde::{Deserialize, Serialize};

/// One receive channel of a telemetry frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelFrame {
    pub signal_i: Vec<f64>,
    pub signal_q: Vec<f64>,
    #[serde(default)]
    pub spectrum: Vec<f64>,
    #[serde(default)]
    pub frequencies: Vec<f64>,
    #[serde(default)]
    pub peaks: Vec<f64>,
}

impl ChannelFrame {
    pub fn from_iq(signal_i: Vec<f64>, signal_q: Vec<f64>) -> Self {
        Self {
            signal_i,
            signal_q,
            ..Default::default()
        }
    }
}

/// Device description attached to each unit frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitMetadata {
    pub name: String,
    pub mac: String,
    pub base: f64,
    pub window: f64,
    pub samples: usize,
    pub prf: f64,
    pub connected: bool,
    pub frequency: f64,
    pub chirp: f64,
}

/// Full telemetry frame for one sensing unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitFrame {
    pub channels: Vec<ChannelFrame>,
    pub metadata: UnitMetadata,
    pub rate: f64,
    #[serde(default)]
    pub phase: Vec<f64>,
    #[serde(default)]
    pub distance: Vec<f64>,
}
