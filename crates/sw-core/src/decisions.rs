//! Turns domain decisions into the records `RespondDecisionTaskCompleted` accepts.

use crate::config::Configuration;
use crate::error::DecisionError;
use crate::types::{generate_id, Decision, DecisionBatch, Process, Timer};
use serde_json::Value;
use sw_wire::decisions::{
    CancelWorkflowExecutionAttributes, CompleteWorkflowExecutionAttributes, DecisionDescription,
    RequestCancelActivityTaskAttributes, ScheduleActivityTaskAttributes,
    StartChildWorkflowExecutionAttributes, StartTimerAttributes,
};
use sw_wire::types::{ActivityType, ChildPolicy, TaskList, WorkflowType, MAX_TAGS};
use sw_wire::util::encode_payload;

pub fn encode(decision: &Decision, config: &Configuration) -> Result<DecisionDescription, DecisionError> {
    match decision {
        Decision::ScheduleActivity {
            activity,
            id,
            input,
            category,
        } => schedule_activity(activity, id, input.as_ref(), category.as_deref(), config),
        Decision::CancelActivity { id } => {
            require_activity_id(id)?;
            Ok(DecisionDescription::RequestCancelActivityTask {
                attributes: RequestCancelActivityTaskAttributes {
                    activity_id: id.clone(),
                },
            })
        }
        Decision::CompleteProcess { result } => Ok(DecisionDescription::CompleteWorkflowExecution {
            attributes: CompleteWorkflowExecutionAttributes {
                result: encode_payload(result.as_ref()),
            },
        }),
        Decision::CancelProcess { details } => Ok(DecisionDescription::CancelWorkflowExecution {
            attributes: CancelWorkflowExecutionAttributes {
                details: details.clone(),
            },
        }),
        Decision::StartChildProcess {
            process,
            child_policy,
        } => start_child(process, *child_policy, config),
        Decision::Timer(timer) => Ok(start_timer(timer)),
    }
}

/// Encodes every decision of a batch, preserving order.
pub fn encode_batch(
    batch: &DecisionBatch,
    config: &Configuration,
) -> Result<Vec<DecisionDescription>, DecisionError> {
    if batch.is_empty() {
        return Err(DecisionError::EmptyBatch);
    }
    batch
        .decisions()
        .iter()
        .map(|decision| encode(decision, config))
        .collect()
}

fn schedule_activity(
    activity: &str,
    id: &str,
    input: Option<&Value>,
    category: Option<&str>,
    config: &Configuration,
) -> Result<DecisionDescription, DecisionError> {
    require_activity_id(id)?;
    // Unset values are omitted; the service applies the type's registered defaults.
    let record = config.activity(activity);
    let scheduled = record.and_then(|record| record.scheduled_timeout_secs);
    let execution = record.and_then(|record| record.execution_timeout_secs);
    let heartbeat = record.and_then(|record| record.heartbeat_timeout_secs);
    let task_list = category
        .map(str::to_string)
        .or_else(|| record.and_then(|record| record.category.clone()))
        .map(TaskList::new);

    Ok(DecisionDescription::ScheduleActivityTask {
        attributes: ScheduleActivityTaskAttributes {
            activity_id: id.to_string(),
            activity_type: ActivityType::new(activity),
            input: encode_payload(input),
            control: None,
            task_list,
            schedule_to_start_timeout: scheduled.map(|secs| secs.to_string()),
            start_to_close_timeout: execution.map(|secs| secs.to_string()),
            schedule_to_close_timeout: scheduled
                .zip(execution)
                .map(|(scheduled, execution)| (scheduled + execution).to_string()),
            heartbeat_timeout: heartbeat.map(|secs| secs.to_string()),
        },
    })
}

fn start_child(
    process: &Process,
    child_policy: Option<ChildPolicy>,
    config: &Configuration,
) -> Result<DecisionDescription, DecisionError> {
    if process.id.is_some() {
        return Err(DecisionError::AssignedChildId);
    }
    if process.tags.len() > MAX_TAGS {
        return Err(DecisionError::TooManyTags {
            count: process.tags.len(),
            max: MAX_TAGS,
        });
    }
    let record = config.workflow(&process.workflow);
    let child_policy = child_policy
        .or_else(|| record.and_then(|record| record.child_policy))
        .unwrap_or(config.defaults.child_policy);

    Ok(DecisionDescription::StartChildWorkflowExecution {
        attributes: StartChildWorkflowExecutionAttributes {
            workflow_type: WorkflowType::new(process.workflow.clone()),
            workflow_id: generate_id(),
            child_policy,
            input: encode_payload(process.input.as_ref()),
            tag_list: process.tags.clone(),
            task_list: record
                .and_then(|record| record.decision_task_list.clone())
                .map(TaskList::new),
            execution_start_to_close_timeout: record
                .and_then(|record| record.timeout_secs)
                .map(|secs| secs.to_string()),
            task_start_to_close_timeout: record
                .and_then(|record| record.decision_timeout_secs)
                .map(|secs| secs.to_string()),
        },
    })
}

fn start_timer(timer: &Timer) -> DecisionDescription {
    DecisionDescription::StartTimer {
        attributes: StartTimerAttributes {
            timer_id: generate_id(),
            start_to_fire_timeout: timer.delay.to_string(),
            control: encode_payload(timer.data.as_ref()),
        },
    }
}

fn require_activity_id(id: &str) -> Result<(), DecisionError> {
    if id.is_empty() {
        return Err(DecisionError::Encode {
            message: "activity id must not be empty".to_string(),
        });
    }
    Ok(())
}
