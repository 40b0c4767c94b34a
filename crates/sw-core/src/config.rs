//! Per-type service defaults.
//!
//! Values resolve in three layers: a value on the decision itself, then the
//! record for the workflow or activity name, then the global `[defaults]`.
//!
//! ```toml
//! [defaults]
//! child_policy = "TERMINATE"
//!
//! [workflow.order]
//! timeout_secs = 86400
//!
//! [activity.charge_card]
//! category = "payments"
//! execution_timeout_secs = 120
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sw_wire::types::ChildPolicy;

pub const DEFAULT_DECISION_TASK_LIST: &str = "decisions";
pub const DEFAULT_ACTIVITY_CATEGORY: &str = "default";
pub const DEFAULT_WORKFLOW_TIMEOUT_SECS: u64 = 60 * 60;
pub const DEFAULT_DECISION_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_ACTIVITY_SCHEDULED_TIMEOUT_SECS: u64 = 5 * 60;
pub const DEFAULT_ACTIVITY_EXECUTION_TIMEOUT_SECS: u64 = 5 * 60;
pub const DEFAULT_ACTIVITY_HEARTBEAT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub child_policy: ChildPolicy,
    pub decision_task_list: String,
    pub activity_category: String,
    pub workflow_timeout_secs: u64,
    pub decision_timeout_secs: u64,
    pub activity_scheduled_timeout_secs: u64,
    pub activity_execution_timeout_secs: u64,
    pub activity_heartbeat_timeout_secs: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            child_policy: ChildPolicy::Abandon,
            decision_task_list: DEFAULT_DECISION_TASK_LIST.to_string(),
            activity_category: DEFAULT_ACTIVITY_CATEGORY.to_string(),
            workflow_timeout_secs: DEFAULT_WORKFLOW_TIMEOUT_SECS,
            decision_timeout_secs: DEFAULT_DECISION_TIMEOUT_SECS,
            activity_scheduled_timeout_secs: DEFAULT_ACTIVITY_SCHEDULED_TIMEOUT_SECS,
            activity_execution_timeout_secs: DEFAULT_ACTIVITY_EXECUTION_TIMEOUT_SECS,
            activity_heartbeat_timeout_secs: DEFAULT_ACTIVITY_HEARTBEAT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub decision_task_list: Option<String>,
    pub timeout_secs: Option<u64>,
    pub decision_timeout_secs: Option<u64>,
    pub child_policy: Option<ChildPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityConfig {
    pub category: Option<String>,
    pub scheduled_timeout_secs: Option<u64>,
    pub execution_timeout_secs: Option<u64>,
    pub heartbeat_timeout_secs: Option<u64>,
}

/// Workflow settings with every layer applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWorkflow {
    pub decision_task_list: String,
    pub timeout_secs: u64,
    pub decision_timeout_secs: u64,
    pub child_policy: ChildPolicy,
}

/// Activity settings with every layer applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedActivity {
    pub category: String,
    pub scheduled_timeout_secs: u64,
    pub execution_timeout_secs: u64,
    pub heartbeat_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default, rename = "workflow")]
    workflows: HashMap<String, WorkflowConfig>,
    #[serde(default, rename = "activity")]
    activities: HashMap<String, ActivityConfig>,
}

impl Configuration {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse {
            message: err.to_string(),
        })
    }

    /// Loads a TOML file. A missing file yields an empty configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    message: err.to_string(),
                });
            }
        };
        let config = Self::from_toml(&content)?;
        tracing::debug!(
            path = %path.display(),
            workflows = config.workflows.len(),
            activities = config.activities.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Layers the per-type records of `other` on top of ours. Global defaults are kept.
    pub fn merge(&mut self, other: Configuration) {
        self.workflows.extend(other.workflows);
        self.activities.extend(other.activities);
    }

    pub fn workflow(&self, name: &str) -> Option<&WorkflowConfig> {
        self.workflows.get(name)
    }

    pub fn activity(&self, name: &str) -> Option<&ActivityConfig> {
        self.activities.get(name)
    }

    pub fn register_workflow(&mut self, name: impl Into<String>, config: WorkflowConfig) {
        self.workflows.insert(name.into(), config);
    }

    pub fn register_activity(&mut self, name: impl Into<String>, config: ActivityConfig) {
        self.activities.insert(name.into(), config);
    }

    pub fn resolve_workflow(&self, name: &str) -> ResolvedWorkflow {
        let record = self.workflow(name).cloned().unwrap_or_default();
        self.apply_workflow_defaults(record)
    }

    /// Fills the unset fields of `record` from the global defaults.
    pub fn apply_workflow_defaults(&self, record: WorkflowConfig) -> ResolvedWorkflow {
        ResolvedWorkflow {
            decision_task_list: record
                .decision_task_list
                .unwrap_or_else(|| self.defaults.decision_task_list.clone()),
            timeout_secs: record
                .timeout_secs
                .unwrap_or(self.defaults.workflow_timeout_secs),
            decision_timeout_secs: record
                .decision_timeout_secs
                .unwrap_or(self.defaults.decision_timeout_secs),
            child_policy: record.child_policy.unwrap_or(self.defaults.child_policy),
        }
    }

    pub fn resolve_activity(&self, name: &str) -> ResolvedActivity {
        let record = self.activity(name).cloned().unwrap_or_default();
        self.apply_activity_defaults(record)
    }

    pub fn apply_activity_defaults(&self, record: ActivityConfig) -> ResolvedActivity {
        ResolvedActivity {
            category: record
                .category
                .unwrap_or_else(|| self.defaults.activity_category.clone()),
            scheduled_timeout_secs: record
                .scheduled_timeout_secs
                .unwrap_or(self.defaults.activity_scheduled_timeout_secs),
            execution_timeout_secs: record
                .execution_timeout_secs
                .unwrap_or(self.defaults.activity_execution_timeout_secs),
            heartbeat_timeout_secs: record
                .heartbeat_timeout_secs
                .unwrap_or(self.defaults.activity_heartbeat_timeout_secs),
        }
    }
}
