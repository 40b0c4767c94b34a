use crate::types::event::DomainEvent;
use crate::types::ids::ProcessId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One execution of a workflow together with its reconstructed history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: Option<ProcessId>,
    pub workflow: String,
    pub input: Option<Value>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub parent: Option<ProcessId>,
    #[serde(default)]
    pub history: Vec<DomainEvent>,
}

impl Process {
    /// A process that has not been started yet.
    pub fn new(workflow: impl Into<String>) -> Self {
        Self {
            id: None,
            workflow: workflow.into(),
            input: None,
            tags: Vec::new(),
            parent: None,
            history: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// How a child process closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ProcessResult {
    Completed {
        result: Option<Value>,
    },
    Canceled {
        details: Option<String>,
    },
    TimedOut,
    Failed {
        reason: Option<String>,
        details: Option<String>,
    },
    Terminated,
}
