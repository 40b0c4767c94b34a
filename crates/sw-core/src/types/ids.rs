use crate::types::process::Process;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use sw_wire::types::WorkflowExecution;
use ulid::Ulid;

/// Separates workflow id and run id in the external process id form.
pub const SEPARATOR: char = ':';

/// Fresh client-chosen id for a workflow execution or timer.
pub fn generate_id() -> String {
    Ulid::new().to_string()
}

/// Identifies one execution: `"<workflow_id>:<run_id>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessId {
    workflow_id: String,
    run_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    MissingSeparator { value: String },
    EmptyComponent { value: String },
    Unassigned,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator { value } => {
                write!(f, "invalid process id: expected <workflow_id>:<run_id>, got {value}")
            }
            Self::EmptyComponent { value } => write!(f, "invalid process id: {value}"),
            Self::Unassigned => write!(f, "process has no id yet"),
        }
    }
}

impl std::error::Error for IdError {}

impl ProcessId {
    pub fn new(workflow_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            run_id: run_id.into(),
        }
    }

    pub fn parse(value: &str) -> Result<Self, IdError> {
        let Some((workflow_id, run_id)) = value.split_once(SEPARATOR) else {
            return Err(IdError::MissingSeparator {
                value: value.to_string(),
            });
        };
        if workflow_id.is_empty() || run_id.is_empty() {
            return Err(IdError::EmptyComponent {
                value: value.to_string(),
            });
        }
        Ok(Self::new(workflow_id, run_id))
    }

    pub fn workflow_id(&self) -> &str {
        &self.workflow_id
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn to_execution(&self) -> WorkflowExecution {
        WorkflowExecution::new(self.workflow_id.clone(), self.run_id.clone())
    }
}

impl From<&WorkflowExecution> for ProcessId {
    fn from(value: &WorkflowExecution) -> Self {
        Self::new(value.workflow_id.clone(), value.run_id.clone())
    }
}

impl From<WorkflowExecution> for ProcessId {
    fn from(value: WorkflowExecution) -> Self {
        Self::new(value.workflow_id, value.run_id)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.workflow_id, self.run_id)
    }
}

impl FromStr for ProcessId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ProcessId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProcessId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Anything that addresses an existing process: the composite id string,
/// a parsed `ProcessId`, or a `Process` carrying one.
pub trait ProcessHandle {
    fn process_id(&self) -> Result<ProcessId, IdError>;
}

impl ProcessHandle for ProcessId {
    fn process_id(&self) -> Result<ProcessId, IdError> {
        Ok(self.clone())
    }
}

impl ProcessHandle for str {
    fn process_id(&self) -> Result<ProcessId, IdError> {
        ProcessId::parse(self)
    }
}

impl ProcessHandle for String {
    fn process_id(&self) -> Result<ProcessId, IdError> {
        ProcessId::parse(self)
    }
}

impl ProcessHandle for Process {
    fn process_id(&self) -> Result<ProcessId, IdError> {
        self.id.clone().ok_or(IdError::Unassigned)
    }
}

impl<H: ProcessHandle + ?Sized> ProcessHandle for &H {
    fn process_id(&self) -> Result<ProcessId, IdError> {
        (**self).process_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id = ProcessId::parse("order-17:22Mq2mwDZqjnvhjw6").unwrap();
        assert_eq!(id.workflow_id(), "order-17");
        assert_eq!(id.run_id(), "22Mq2mwDZqjnvhjw6");
        assert_eq!(id.to_string(), "order-17:22Mq2mwDZqjnvhjw6");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            ProcessId::parse("no-separator"),
            Err(IdError::MissingSeparator { .. })
        ));
        assert!(matches!(
            ProcessId::parse(":run"),
            Err(IdError::EmptyComponent { .. })
        ));
    }

    #[test]
    fn test_handles_resolve_to_same_id() {
        let id = ProcessId::new("wf", "run");
        let mut process = Process::new("order");
        process.id = Some(id.clone());
        assert_eq!("wf:run".process_id().unwrap(), id);
        assert_eq!("wf:run".to_string().process_id().unwrap(), id);
        assert_eq!(process.process_id().unwrap(), id);
        assert_eq!(
            Process::new("order").process_id(),
            Err(IdError::Unassigned)
        );
    }

    #[test]
    fn test_generated_ids_are_unique_ulids() {
        let first = generate_id();
        let second = generate_id();
        assert_ne!(first, second);
        assert!(Ulid::from_string(&first).is_ok());
    }

    #[test]
    fn test_serde_uses_composite_string() {
        let id = ProcessId::new("wf", "run");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"wf:run\"");
        let back: ProcessId = serde_json::from_str("\"wf:run\"").unwrap();
        assert_eq!(back, id);
    }
}
