use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity of one activity invocation, as scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityExecution {
    pub activity: String,
    pub id: String,
    pub input: Option<Value>,
}

impl ActivityExecution {
    pub fn new(activity: impl Into<String>, id: impl Into<String>, input: Option<Value>) -> Self {
        Self {
            activity: activity.into(),
            id: id.into(),
            input,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ActivityResult {
    Completed {
        result: Option<Value>,
    },
    Failed {
        reason: Option<String>,
        details: Option<String>,
    },
    Canceled {
        details: Option<String>,
    },
    TimedOut {
        details: Option<String>,
    },
}
