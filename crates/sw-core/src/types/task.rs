use crate::types::activity::ActivityExecution;
use crate::types::ids::ProcessId;
use crate::types::process::Process;
use serde::{Deserialize, Serialize};

/// A decision task handed out by the service; `token` answers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTask {
    pub process: Process,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTask {
    pub execution: ActivityExecution,
    pub process_id: ProcessId,
    pub token: String,
}
