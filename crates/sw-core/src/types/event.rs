use crate::types::activity::{ActivityExecution, ActivityResult};
use crate::types::decision::{Decision, Timer};
use crate::types::ids::ProcessId;
use crate::types::process::ProcessResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    pub data: Option<Value>,
}

/// One entry of a reconstructed process history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEvent {
    pub at: DateTime<Utc>,
    pub body: EventBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum EventBody {
    ProcessStarted,
    DecisionStarted,
    Decision {
        decision: Decision,
    },
    ActivityStarted {
        execution: ActivityExecution,
    },
    Activity {
        execution: ActivityExecution,
        result: ActivityResult,
    },
    Signal {
        signal: Signal,
    },
    ChildProcess {
        process_id: ProcessId,
        workflow: String,
        tags: Vec<String>,
        result: ProcessResult,
    },
    Timer {
        timer: Timer,
    },
}
