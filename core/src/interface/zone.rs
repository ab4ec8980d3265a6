use serde::{Deserialize, Serialize};

/// Wire shape of a stored zone: each corner is a `[col, row]` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub name: String,
    pub corners: Vec<[i32; 2]>,
}
