use crate::types::{ActivityType, ChildPolicy, TaskList, WorkflowType};
use serde::{Deserialize, Serialize};

/// A decision in the form `RespondDecisionTaskCompleted` expects:
/// `{"decisionType": "...", "<decisionType>DecisionAttributes": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decisionType")]
pub enum DecisionDescription {
    ScheduleActivityTask {
        #[serde(rename = "scheduleActivityTaskDecisionAttributes")]
        attributes: ScheduleActivityTaskAttributes,
    },
    RequestCancelActivityTask {
        #[serde(rename = "requestCancelActivityTaskDecisionAttributes")]
        attributes: RequestCancelActivityTaskAttributes,
    },
    CompleteWorkflowExecution {
        #[serde(rename = "completeWorkflowExecutionDecisionAttributes")]
        attributes: CompleteWorkflowExecutionAttributes,
    },
    CancelWorkflowExecution {
        #[serde(rename = "cancelWorkflowExecutionDecisionAttributes")]
        attributes: CancelWorkflowExecutionAttributes,
    },
    StartChildWorkflowExecution {
        #[serde(rename = "startChildWorkflowExecutionDecisionAttributes")]
        attributes: StartChildWorkflowExecutionAttributes,
    },
    StartTimer {
        #[serde(rename = "startTimerDecisionAttributes")]
        attributes: StartTimerAttributes,
    },
}

impl DecisionDescription {
    pub fn decision_type(&self) -> &'static str {
        match self {
            Self::ScheduleActivityTask { .. } => "ScheduleActivityTask",
            Self::RequestCancelActivityTask { .. } => "RequestCancelActivityTask",
            Self::CompleteWorkflowExecution { .. } => "CompleteWorkflowExecution",
            Self::CancelWorkflowExecution { .. } => "CancelWorkflowExecution",
            Self::StartChildWorkflowExecution { .. } => "StartChildWorkflowExecution",
            Self::StartTimer { .. } => "StartTimer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleActivityTaskAttributes {
    pub activity_id: String,
    pub activity_type: ActivityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_list: Option<TaskList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_to_start_timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_to_close_timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_to_close_timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_timeout: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCancelActivityTaskAttributes {
    pub activity_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteWorkflowExecutionAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelWorkflowExecutionAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartChildWorkflowExecutionAttributes {
    pub workflow_type: WorkflowType,
    pub workflow_id: String,
    pub child_policy: ChildPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default)]
    pub tag_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_list: Option<TaskList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_start_to_close_timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_start_to_close_timeout: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTimerAttributes {
    pub timer_id: String,
    pub start_to_fire_timeout: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<String>,
}
