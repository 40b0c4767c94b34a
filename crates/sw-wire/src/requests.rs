//! Request and response records for the service calls the backend makes.

use crate::decisions::DecisionDescription;
use crate::types::{
    ActivityType, ChildPolicy, Page, RawEvent, TaskList, WorkflowExecution, WorkflowType,
};
use crate::util::{deserialize_timestamp, serialize_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterWorkflowType {
    pub domain: String,
    pub workflow_type: WorkflowType,
    pub default_task_list: TaskList,
    pub default_child_policy: ChildPolicy,
    pub default_execution_start_to_close_timeout: String,
    pub default_task_start_to_close_timeout: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterActivityType {
    pub domain: String,
    pub activity_type: ActivityType,
    pub default_task_list: TaskList,
    pub default_task_heartbeat_timeout: String,
    pub default_task_schedule_to_start_timeout: String,
    pub default_task_schedule_to_close_timeout: String,
    pub default_task_start_to_close_timeout: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartWorkflowExecution {
    pub domain: String,
    pub workflow_id: String,
    pub workflow_type: WorkflowType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default)]
    pub tag_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalWorkflowExecution {
    pub domain: String,
    pub workflow_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    pub signal_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminateWorkflowExecution {
    pub domain: String,
    pub workflow_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondDecisionTaskCompleted {
    pub task_token: String,
    pub decisions: Vec<DecisionDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_context: Option<String>,
}

/// The three ways an activity worker can close its task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum RespondActivityTask {
    #[serde(rename_all = "camelCase")]
    Completed {
        task_token: String,
        result: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Canceled {
        task_token: String,
        details: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Failed {
        task_token: String,
        details: Option<String>,
        reason: Option<String>,
    },
}

impl RespondActivityTask {
    pub fn task_token(&self) -> &str {
        match self {
            Self::Completed { task_token, .. }
            | Self::Canceled { task_token, .. }
            | Self::Failed { task_token, .. } => task_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOpenWorkflowExecutions {
    pub domain: String,
    #[serde(
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub oldest_start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// One page of a decision task poll. Only the first page carries meaning in
/// `task_token`; an absent token means the poll timed out without work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionTaskPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_execution: Option<WorkflowExecution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_type: Option<WorkflowType>,
    #[serde(default)]
    pub events: Vec<RawEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl DecisionTaskPage {
    pub fn into_page(self) -> Page<RawEvent> {
        Page::new(self.events, self.next_page_token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTaskDescription {
    pub task_token: String,
    pub activity_id: String,
    pub activity_type: ActivityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub workflow_execution: WorkflowExecution,
    #[serde(default)]
    pub started_event_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_request_sends_epoch_start_date() {
        let request = ListOpenWorkflowExecutions {
            domain: "d".to_string(),
            oldest_start_date: DateTime::from_timestamp(1_400_000_000, 0).unwrap(),
            workflow_name: Some("order".to_string()),
            tag: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"domain": "d", "oldestStartDate": 1_400_000_000.0, "workflowName": "order"})
        );
    }

    #[test]
    fn test_decision_page_splits_into_event_page() {
        let page: DecisionTaskPage = serde_json::from_value(json!({
            "taskToken": "tok",
            "workflowExecution": {"workflowId": "wf", "runId": "run"},
            "events": [{
                "eventId": 1,
                "eventType": "DecisionTaskScheduled",
                "eventTimestamp": 1_400_000_000,
                "decisionTaskScheduledEventAttributes": {}
            }],
            "nextPageToken": "p2"
        }))
        .unwrap();
        assert_eq!(page.task_token.as_deref(), Some("tok"));
        let events = page.into_page();
        assert_eq!(events.items.len(), 1);
        assert_eq!(events.continuation(), Some("p2"));
    }

    #[test]
    fn test_activity_response_carries_token() {
        let response = RespondActivityTask::Failed {
            task_token: "tok".to_string(),
            details: None,
            reason: Some("declined".to_string()),
        };
        assert_eq!(response.task_token(), "tok");
    }
}
