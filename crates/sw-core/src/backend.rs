//! Process-level operations on top of a `Transport`.

use crate::config::{ActivityConfig, Configuration, WorkflowConfig};
use crate::decisions::encode_batch;
use crate::error::{ProcessError, SwfError, TaskError};
use crate::history::reconstruct;
use crate::transport::Transport;
use crate::types::{
    generate_id, ActivityExecution, ActivityResult, ActivityTask, DecisionBatch, DecisionTask,
    Process, ProcessHandle, ProcessId,
};
use crate::validation::{validate_batch_types, validate_new_process};
use chrono::{Duration, Utc};
use serde_json::Value;
use sw_wire::error::TransportError;
use sw_wire::pager::{consume_all, consume_remaining};
use sw_wire::requests::{
    DecisionTaskPage, ListOpenWorkflowExecutions, RegisterActivityType, RegisterWorkflowType,
    RespondActivityTask, RespondDecisionTaskCompleted, SignalWorkflowExecution,
    StartWorkflowExecution, TerminateWorkflowExecution,
};
use sw_wire::types::{ActivityType, ExecutionInfo, TaskList, WorkflowType};
use sw_wire::util::{decode_payload, encode_payload};

/// How far back `processes` looks for open executions.
pub const OPEN_EXECUTION_WINDOW_DAYS: i64 = 365;

pub struct Backend<T: Transport> {
    transport: T,
    domain: String,
    config: Configuration,
}

impl<T: Transport> Backend<T> {
    pub fn new(transport: T, domain: impl Into<String>, config: Configuration) -> Self {
        Self {
            transport,
            domain: domain.into(),
            config,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Makes sure the workflow type exists on the service, registering it
    /// with the resolved defaults when the service does not know it. The
    /// config is recorded only once the service has the type.
    pub async fn register_workflow(
        &mut self,
        name: impl Into<String>,
        config: WorkflowConfig,
    ) -> Result<(), SwfError> {
        let name = name.into();
        let workflow_type = WorkflowType::new(name.clone());

        match self
            .transport
            .describe_workflow_type(&self.domain, &workflow_type)
            .await
        {
            Ok(()) => {
                tracing::debug!(workflow = %name, "workflow type already registered");
            }
            Err(err) if err.is_unknown_resource() => {
                let resolved = self.config.apply_workflow_defaults(config.clone());
                self.transport
                    .register_workflow_type(RegisterWorkflowType {
                        domain: self.domain.clone(),
                        workflow_type,
                        default_task_list: TaskList::new(resolved.decision_task_list),
                        default_child_policy: resolved.child_policy,
                        default_execution_start_to_close_timeout: resolved.timeout_secs.to_string(),
                        default_task_start_to_close_timeout: resolved
                            .decision_timeout_secs
                            .to_string(),
                    })
                    .await?;
                tracing::info!(domain = %self.domain, workflow = %name, "workflow type registered");
            }
            Err(err) => return Err(err.into()),
        }
        self.config.register_workflow(name, config);
        Ok(())
    }

    pub async fn register_activity(
        &mut self,
        name: impl Into<String>,
        config: ActivityConfig,
    ) -> Result<(), SwfError> {
        let name = name.into();
        let activity_type = ActivityType::new(name.clone());

        match self
            .transport
            .describe_activity_type(&self.domain, &activity_type)
            .await
        {
            Ok(()) => {
                tracing::debug!(activity = %name, "activity type already registered");
            }
            Err(err) if err.is_unknown_resource() => {
                let resolved = self.config.apply_activity_defaults(config.clone());
                self.transport
                    .register_activity_type(RegisterActivityType {
                        domain: self.domain.clone(),
                        activity_type,
                        default_task_list: TaskList::new(resolved.category),
                        default_task_heartbeat_timeout: resolved.heartbeat_timeout_secs.to_string(),
                        default_task_schedule_to_start_timeout: resolved
                            .scheduled_timeout_secs
                            .to_string(),
                        default_task_schedule_to_close_timeout: (resolved.scheduled_timeout_secs
                            + resolved.execution_timeout_secs)
                            .to_string(),
                        default_task_start_to_close_timeout: resolved
                            .execution_timeout_secs
                            .to_string(),
                    })
                    .await?;
                tracing::info!(domain = %self.domain, activity = %name, "activity type registered");
            }
            Err(err) => return Err(err.into()),
        }
        self.config.register_activity(name, config);
        Ok(())
    }

    /// Starts a top-level process and returns the id the service assigned.
    pub async fn start_process(&self, process: &Process) -> Result<ProcessId, SwfError> {
        validate_new_process(process, &self.config)?;
        let workflow_id = generate_id();
        let run_id = self
            .transport
            .start_workflow_execution(StartWorkflowExecution {
                domain: self.domain.clone(),
                workflow_id: workflow_id.clone(),
                workflow_type: WorkflowType::new(process.workflow.clone()),
                input: encode_payload(process.input.as_ref()),
                tag_list: process.tags.clone(),
            })
            .await?;
        let id = ProcessId::new(workflow_id, run_id);
        tracing::info!(process_id = %id, workflow = %process.workflow, "process started");
        Ok(id)
    }

    pub async fn signal_process(
        &self,
        process: &(impl ProcessHandle + ?Sized),
        signal: &str,
        data: Option<&Value>,
    ) -> Result<(), SwfError> {
        let id = process.process_id()?;
        self.transport
            .signal_workflow_execution(SignalWorkflowExecution {
                domain: self.domain.clone(),
                workflow_id: id.workflow_id().to_string(),
                run_id: Some(id.run_id().to_string()),
                signal_name: signal.to_string(),
                input: encode_payload(data),
            })
            .await?;
        tracing::debug!(process_id = %id, signal, "process signaled");
        Ok(())
    }

    /// Terminates the process on the service.
    pub async fn cancel_process(
        &self,
        process: &(impl ProcessHandle + ?Sized),
        details: Option<&str>,
        reason: Option<&str>,
    ) -> Result<(), SwfError> {
        let id = process.process_id()?;
        self.transport
            .terminate_workflow_execution(TerminateWorkflowExecution {
                domain: self.domain.clone(),
                workflow_id: id.workflow_id().to_string(),
                run_id: Some(id.run_id().to_string()),
                details: details.map(str::to_string),
                reason: reason.map(str::to_string),
            })
            .await?;
        tracing::info!(process_id = %id, "process terminated");
        Ok(())
    }

    pub async fn heartbeat_activity_task(&self, task: &ActivityTask) -> Result<(), SwfError> {
        self.transport
            .record_activity_task_heartbeat(&task.token)
            .await
            .map_err(|err| task_fault(err, TaskError::UnknownActivityTask))
    }

    /// Answers a decision task with one decision or a batch.
    pub async fn complete_decision_task(
        &self,
        task: &DecisionTask,
        decisions: impl Into<DecisionBatch>,
    ) -> Result<(), SwfError> {
        let batch = decisions.into();
        validate_batch_types(&batch, &self.config)?;
        let decisions = encode_batch(&batch, &self.config)?;
        let count = batch.len();

        self.transport
            .respond_decision_task_completed(RespondDecisionTaskCompleted {
                task_token: task.token.clone(),
                decisions,
                execution_context: None,
            })
            .await
            .map_err(|err| task_fault(err, TaskError::UnknownDecisionTask))?;
        tracing::debug!(
            process_id = ?task.process.id,
            decisions = count,
            "decision task completed"
        );
        Ok(())
    }

    pub async fn complete_activity_task(
        &self,
        task: &ActivityTask,
        result: ActivityResult,
    ) -> Result<(), SwfError> {
        let task_token = task.token.clone();
        let response = match result {
            ActivityResult::Completed { result } => RespondActivityTask::Completed {
                task_token,
                result: encode_payload(result.as_ref()),
            },
            ActivityResult::Canceled { details } => RespondActivityTask::Canceled {
                task_token,
                details,
            },
            ActivityResult::Failed { reason, details } => RespondActivityTask::Failed {
                task_token,
                details,
                reason,
            },
            ActivityResult::TimedOut { .. } => {
                return Err(ProcessError::InvalidResult {
                    message: "an activity cannot report its own timeout".to_string(),
                }
                .into());
            }
        };

        self.transport
            .respond_activity_task(response)
            .await
            .map_err(|err| task_fault(err, TaskError::UnknownActivityTask))?;
        tracing::debug!(
            process_id = %task.process_id,
            activity_id = %task.execution.id,
            "activity task completed"
        );
        Ok(())
    }

    /// Fetches one process with its full history.
    pub async fn process_by_id(
        &self,
        process: &(impl ProcessHandle + ?Sized),
    ) -> Result<Process, SwfError> {
        let id = process.process_id()?;
        let info = self
            .transport
            .describe_workflow_execution(&self.domain, &id.to_execution())
            .await?;
        self.load_history(&info).await
    }

    /// Open processes started within the last year, optionally filtered by
    /// workflow name or by tag.
    pub async fn processes(
        &self,
        workflow: Option<&str>,
        tag: Option<&str>,
    ) -> Result<Vec<Process>, SwfError> {
        if workflow.is_some() && tag.is_some() {
            return Err(ProcessError::ConflictingFilters.into());
        }
        let request = ListOpenWorkflowExecutions {
            domain: self.domain.clone(),
            oldest_start_date: Utc::now() - Duration::days(OPEN_EXECUTION_WINDOW_DAYS),
            workflow_name: workflow.map(str::to_string),
            tag: tag.map(str::to_string),
        };
        let infos = consume_all(|token| {
            self.transport
                .list_open_workflow_executions(&request, token)
        })
        .await?;

        let mut processes = Vec::with_capacity(infos.len());
        for info in &infos {
            processes.push(self.load_history(info).await?);
        }
        Ok(processes)
    }

    /// Polls the default decision task list. `None` when the poll timed out.
    pub async fn poll_decision_task(
        &self,
        identity: Option<&str>,
    ) -> Result<Option<DecisionTask>, SwfError> {
        let task_list = TaskList::new(self.config.defaults.decision_task_list.clone());
        let first = self
            .transport
            .poll_for_decision_task(&self.domain, &task_list, identity, None)
            .await?;
        let token = match first.task_token.as_deref() {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => {
                tracing::debug!(task_list = %task_list.name, "decision poll returned no task");
                return Ok(None);
            }
        };
        let (Some(execution), Some(workflow_type)) =
            (first.workflow_execution.clone(), first.workflow_type.clone())
        else {
            return Err(TransportError::Failure {
                message: "decision task without workflow execution".to_string(),
            }
            .into());
        };

        let events = consume_remaining(first.into_page(), |next| {
            let page = self
                .transport
                .poll_for_decision_task(&self.domain, &task_list, identity, next);
            async move { page.await.map(DecisionTaskPage::into_page) }
        })
        .await?;

        let info = ExecutionInfo {
            execution,
            workflow_type,
            tag_list: Vec::new(),
            execution_status: None,
        };
        let process = reconstruct(&info, &events)?;
        Ok(Some(DecisionTask { process, token }))
    }

    /// Polls the task list of one activity category.
    pub async fn poll_activity_task(
        &self,
        category: &str,
        identity: Option<&str>,
    ) -> Result<Option<ActivityTask>, SwfError> {
        let task_list = TaskList::new(category);
        let Some(description) = self
            .transport
            .poll_for_activity_task(&self.domain, &task_list, identity)
            .await?
        else {
            return Ok(None);
        };
        if description.task_token.is_empty() {
            return Ok(None);
        }
        Ok(Some(ActivityTask {
            execution: ActivityExecution::new(
                description.activity_type.name,
                description.activity_id,
                decode_payload(description.input.as_deref()),
            ),
            process_id: ProcessId::from(description.workflow_execution),
            token: description.task_token,
        }))
    }

    async fn load_history(&self, info: &ExecutionInfo) -> Result<Process, SwfError> {
        let events = consume_all(|token| {
            self.transport
                .get_workflow_execution_history(&self.domain, &info.execution, token)
        })
        .await?;
        Ok(reconstruct(info, &events)?)
    }
}

fn task_fault(err: TransportError, unknown: TaskError) -> SwfError {
    if err.is_unknown_resource() {
        unknown.into()
    } else {
        err.into()
    }
}
