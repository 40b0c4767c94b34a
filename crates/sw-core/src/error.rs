use crate::types::ids::IdError;
use sw_wire::error::TransportError;
use sw_wire::types::EventType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("process ids are assigned by the service; process.id must be empty")]
    AssignedId,
    #[error("too many tags: {count} (max {max})")]
    TooManyTags { count: usize, max: usize },
    #[error("child processes cannot be started directly; use a StartChildProcess decision")]
    ChildViaStart,
    #[error("workflow not registered: {name}")]
    UnregisteredWorkflow { name: String },
    #[error("activity not registered: {name}")]
    UnregisteredActivity { name: String },
    #[error("cannot filter on workflow and tag at the same time")]
    ConflictingFilters,
    #[error("invalid activity result: {message}")]
    InvalidResult { message: String },
    #[error(transparent)]
    Id(#[from] IdError),
}

#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("child process ids are assigned by the service; process.id must be empty")]
    AssignedChildId,
    #[error("too many tags on child process: {count} (max {max})")]
    TooManyTags { count: usize, max: usize },
    #[error("decision batch is empty")]
    EmptyBatch,
    #[error("encode failed: {message}")]
    Encode { message: String },
}

/// The supplied history is truncated or corrupted. Never recoverable for that fetch.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("event {event_id}: {field} references event {reference}, which is not in the history")]
    UnresolvedReference {
        event_id: i64,
        field: &'static str,
        reference: i64,
    },
    #[error("history has no WorkflowExecutionStarted event")]
    MissingStartEvent,
    #[error("event id {event_id} appears more than once")]
    DuplicateEvent { event_id: i64 },
    #[error("event {event_id} ({event_type}): {message}")]
    Malformed {
        event_id: i64,
        event_type: EventType,
        message: String,
    },
}

/// The service no longer knows the task token: the task timed out or was
/// already answered. Callers should skip the task rather than retry.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("unknown decision task")]
    UnknownDecisionTask,
    #[error("unknown activity task")]
    UnknownActivityTask,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {path}: {message}")]
    Read { path: String, message: String },
    #[error("parse config: {message}")]
    Parse { message: String },
}

#[derive(Debug, Error)]
pub enum SwfError {
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Decision(#[from] DecisionError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<IdError> for SwfError {
    fn from(value: IdError) -> Self {
        SwfError::Process(ProcessError::Id(value))
    }
}
