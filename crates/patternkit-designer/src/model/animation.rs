use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Selection;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Animations {
    #[serde(default)]
    pub timeline: Timeline,
    #[serde(default)]
    pub scripts: BTreeMap<String, Script>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default)]
    pub lanes: Vec<TimelineLane>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLane {
    pub enabled: bool,
    /// Vertical positions of the lane's keyframe handles.
    #[serde(default)]
    pub ys: Vec<f64>,
    #[serde(default)]
    pub items: Vec<TimelineSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSlot {
    pub enabled: bool,
    pub weight: f64,
    pub contents: SlotContents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SlotContents {
    Spacer {
        #[serde(default)]
        left: Option<f64>,
        #[serde(default)]
        right: Option<f64>,
    },
    Script {
        script_id: String,
        #[serde(default)]
        custom: BTreeMap<String, serde_json::Value>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScriptPhase {
    #[default]
    PreTiling,
    PostTiling,
    PostMirror,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub code: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub phase: ScriptPhase,
    #[serde(default)]
    pub selection: Option<Selection>,
}
