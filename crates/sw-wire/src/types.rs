use crate::util::{decode_enum, deserialize_timestamp, serialize_timestamp};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Every workflow and activity type is registered and addressed at this version.
pub const TYPE_VERSION: &str = "1.0";

/// Maximum number of tags the service accepts on one execution.
pub const MAX_TAGS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecution {
    pub workflow_id: String,
    pub run_id: String,
}

impl WorkflowExecution {
    pub fn new(workflow_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            run_id: run_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowType {
    pub name: String,
    pub version: String,
}

impl WorkflowType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: TYPE_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityType {
    pub name: String,
    pub version: String,
}

impl ActivityType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: TYPE_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub name: String,
}

impl TaskList {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChildPolicy {
    Terminate,
    RequestCancel,
    #[default]
    Abandon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    WorkflowExecutionStarted,
    WorkflowExecutionCompleted,
    WorkflowExecutionFailed,
    WorkflowExecutionTimedOut,
    WorkflowExecutionCanceled,
    WorkflowExecutionTerminated,
    WorkflowExecutionCancelRequested,
    WorkflowExecutionSignaled,
    DecisionTaskScheduled,
    DecisionTaskStarted,
    DecisionTaskCompleted,
    DecisionTaskTimedOut,
    ActivityTaskScheduled,
    ScheduleActivityTaskFailed,
    ActivityTaskStarted,
    ActivityTaskCompleted,
    ActivityTaskFailed,
    ActivityTaskTimedOut,
    ActivityTaskCanceled,
    ActivityTaskCancelRequested,
    TimerStarted,
    StartTimerFailed,
    TimerFired,
    TimerCanceled,
    StartChildWorkflowExecutionInitiated,
    StartChildWorkflowExecutionFailed,
    ChildWorkflowExecutionStarted,
    ChildWorkflowExecutionCompleted,
    ChildWorkflowExecutionFailed,
    ChildWorkflowExecutionTimedOut,
    ChildWorkflowExecutionCanceled,
    ChildWorkflowExecutionTerminated,
    MarkerRecorded,
    #[serde(other)]
    Unknown,
}

impl EventType {
    /// Parses a wire event type name; names this crate does not know become `Unknown`.
    pub fn parse(name: &str) -> Self {
        decode_enum(name).unwrap_or(Self::Unknown)
    }

    /// Key of the attribute record carried next to an event of type `name`.
    pub fn attributes_key(name: &str) -> String {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!(
                "{}{}EventAttributes",
                first.to_ascii_lowercase(),
                chars.as_str()
            ),
            None => String::new(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One entry of an execution history as delivered by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub event_id: i64,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub attributes: Value,
    type_name: String,
}

impl RawEvent {
    pub fn new(
        event_id: i64,
        event_type: EventType,
        timestamp: DateTime<Utc>,
        attributes: Value,
    ) -> Self {
        Self {
            event_id,
            type_name: event_type.to_string(),
            event_type,
            timestamp,
            attributes,
        }
    }

    /// Event type name as the service sent it, kept for `Unknown` events.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Decodes the attribute record into its typed form.
    pub fn attributes_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.attributes)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEventEnvelope {
    event_id: i64,
    event_type: String,
    #[serde(
        deserialize_with = "deserialize_timestamp",
        serialize_with = "serialize_timestamp"
    )]
    event_timestamp: DateTime<Utc>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl<'de> Deserialize<'de> for RawEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut envelope = RawEventEnvelope::deserialize(deserializer)?;
        let key = EventType::attributes_key(&envelope.event_type);
        let attributes = envelope
            .rest
            .remove(&key)
            .unwrap_or_else(|| Value::Object(Map::new()));
        Ok(Self {
            event_id: envelope.event_id,
            event_type: EventType::parse(&envelope.event_type),
            timestamp: envelope.event_timestamp,
            attributes,
            type_name: envelope.event_type,
        })
    }
}

impl Serialize for RawEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let event_type = match self.event_type {
            EventType::Unknown => self.type_name.clone(),
            known => known.to_string(),
        };
        let mut rest = Map::new();
        rest.insert(
            EventType::attributes_key(&event_type),
            self.attributes.clone(),
        );
        RawEventEnvelope {
            event_id: self.event_id,
            event_type,
            event_timestamp: self.timestamp,
            rest,
        }
        .serialize(serializer)
    }
}

/// One page of a paginated service response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token,
        }
    }

    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    /// Continuation token, treating an empty token as absent.
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

/// Describes one execution: its identity, type and tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionInfo {
    #[serde(alias = "workflowExecution")]
    pub execution: WorkflowExecution,
    pub workflow_type: WorkflowType,
    #[serde(default)]
    pub tag_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_status: Option<String>,
}

/// An execution description together with its complete event list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionHistory {
    #[serde(flatten)]
    pub info: ExecutionInfo,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_event_picks_attributes_by_type() {
        let event: RawEvent = serde_json::from_value(json!({
            "eventId": 5,
            "eventType": "ActivityTaskScheduled",
            "eventTimestamp": 1_400_000_000.5,
            "activityTaskScheduledEventAttributes": {"activityId": "A1"},
            "somethingElse": {"ignored": true}
        }))
        .unwrap();
        assert_eq!(event.event_id, 5);
        assert_eq!(event.event_type, EventType::ActivityTaskScheduled);
        assert_eq!(event.attributes, json!({"activityId": "A1"}));
        assert_eq!(event.timestamp.timestamp(), 1_400_000_000);
    }

    #[test]
    fn test_unknown_event_type_is_not_an_error() {
        let event: RawEvent = serde_json::from_value(json!({
            "eventId": 9,
            "eventType": "LambdaFunctionScheduled",
            "eventTimestamp": "2014-05-13T16:00:00Z"
        }))
        .unwrap();
        assert_eq!(event.event_type, EventType::Unknown);
        assert_eq!(event.attributes, json!({}));
    }

    #[test]
    fn test_unknown_event_keeps_type_name_on_serialize() {
        let wire = json!({
            "eventId": 9,
            "eventType": "LambdaFunctionScheduled",
            "eventTimestamp": 1_400_000_000,
            "lambdaFunctionScheduledEventAttributes": {"id": "L1"}
        });
        let event: RawEvent = serde_json::from_value(wire).unwrap();
        assert_eq!(event.type_name(), "LambdaFunctionScheduled");

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["eventType"], json!("LambdaFunctionScheduled"));
        assert_eq!(
            value["lambdaFunctionScheduledEventAttributes"],
            json!({"id": "L1"})
        );
        assert!(value.get("unknownEventAttributes").is_none());
    }

    #[test]
    fn test_raw_event_serializes_to_wire_shape() {
        let event = RawEvent::new(
            1,
            EventType::WorkflowExecutionStarted,
            DateTime::from_timestamp(1_400_000_000, 0).unwrap(),
            json!({"input": "{}"}),
        );
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["eventType"], json!("WorkflowExecutionStarted"));
        assert_eq!(
            value["workflowExecutionStartedEventAttributes"],
            json!({"input": "{}"})
        );
        let back: RawEvent = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_attributes_key() {
        assert_eq!(
            EventType::attributes_key("TimerFired"),
            "timerFiredEventAttributes"
        );
    }

    #[test]
    fn test_empty_continuation_token_counts_as_absent() {
        let page: Page<u8> = Page::new(vec![1], Some(String::new()));
        assert_eq!(page.continuation(), None);
    }
}
