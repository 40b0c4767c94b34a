use crate::types::process::Process;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sw_wire::types::ChildPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    /// Seconds until the timer fires.
    pub delay: u64,
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Decision {
    ScheduleActivity {
        activity: String,
        id: String,
        input: Option<Value>,
        category: Option<String>,
    },
    CancelActivity {
        id: String,
    },
    CompleteProcess {
        result: Option<Value>,
    },
    CancelProcess {
        details: Option<String>,
    },
    StartChildProcess {
        process: Box<Process>,
        child_policy: Option<ChildPolicy>,
    },
    Timer(Timer),
}

impl Decision {
    pub fn schedule_activity(activity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::ScheduleActivity {
            activity: activity.into(),
            id: id.into(),
            input: None,
            category: None,
        }
    }

    pub fn start_child(process: Process) -> Self {
        Self::StartChildProcess {
            process: Box::new(process),
            child_policy: None,
        }
    }

    pub fn timer(delay: u64, data: Option<Value>) -> Self {
        Self::Timer(Timer { delay, data })
    }
}

/// Ordered decisions submitted together when completing a decision task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionBatch(Vec<Decision>);

impl DecisionBatch {
    pub fn decisions(&self) -> &[Decision] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Decision> for DecisionBatch {
    fn from(value: Decision) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<Decision>> for DecisionBatch {
    fn from(value: Vec<Decision>) -> Self {
        Self(value)
    }
}
