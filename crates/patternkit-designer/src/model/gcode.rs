use serde::{Deserialize, Serialize};

/// Settings consumed by the G-code exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GCode {
    pub clear_height: f64,
    pub pause_height: f64,
    #[serde(default)]
    pub items: Vec<GCodeItem>,
}

impl Default for GCode {
    fn default() -> Self {
        Self {
            clear_height: 0.5,
            pause_height: 2.0,
            items: vec![],
        }
    }
}

/// One step of the cut order: every path stroked or filled with `color`, or
/// a pause for the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GCodeItem {
    Path {
        color: String,
        depth: f64,
        speed: f64,
        #[serde(default)]
        passes: Option<u32>,
        #[serde(default)]
        disabled: bool,
    },
    Pause {
        message: String,
    },
}
