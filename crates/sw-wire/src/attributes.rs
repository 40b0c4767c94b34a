//! Typed views of the attribute records carried by history events.
//!
//! Only the records the history reconstruction reads are modelled. Fields the
//! service may omit are optional; back-references (`*EventId`) are required.

use crate::types::{ActivityType, ChildPolicy, TaskList, WorkflowExecution, WorkflowType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecutionStartedAttributes {
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub tag_list: Vec<String>,
    #[serde(default)]
    pub parent_workflow_execution: Option<WorkflowExecution>,
    #[serde(default)]
    pub workflow_type: Option<WorkflowType>,
    #[serde(default)]
    pub child_policy: Option<ChildPolicy>,
    #[serde(default)]
    pub task_list: Option<TaskList>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionTaskCompletedAttributes {
    pub scheduled_event_id: i64,
    pub started_event_id: i64,
    #[serde(default)]
    pub execution_context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTaskScheduledAttributes {
    pub activity_id: String,
    pub activity_type: ActivityType,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub control: Option<String>,
    #[serde(default)]
    pub task_list: Option<TaskList>,
    pub decision_task_completed_event_id: i64,
}

/// Shared shape of `ActivityTaskStarted`, `...Completed`, `...Failed`,
/// `...Canceled` and `...TimedOut`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTaskLifecycleAttributes {
    pub scheduled_event_id: i64,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub timeout_type: Option<String>,
    #[serde(default)]
    pub identity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecutionSignaledAttributes {
    pub signal_name: String,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub external_workflow_execution: Option<WorkflowExecution>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartChildWorkflowExecutionInitiatedAttributes {
    pub workflow_id: String,
    pub workflow_type: WorkflowType,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub tag_list: Vec<String>,
    #[serde(default)]
    pub child_policy: Option<ChildPolicy>,
    #[serde(default)]
    pub control: Option<String>,
    #[serde(default)]
    pub task_list: Option<TaskList>,
    pub decision_task_completed_event_id: i64,
}

/// Shared shape of the child execution close events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildWorkflowExecutionClosedAttributes {
    pub initiated_event_id: i64,
    pub workflow_execution: WorkflowExecution,
    #[serde(default)]
    pub workflow_type: Option<WorkflowType>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub timeout_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStartedAttributes {
    pub timer_id: String,
    pub start_to_fire_timeout: String,
    #[serde(default)]
    pub control: Option<String>,
    pub decision_task_completed_event_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerFiredAttributes {
    pub timer_id: String,
    pub started_event_id: i64,
}
