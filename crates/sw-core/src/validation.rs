use crate::config::Configuration;
use crate::error::ProcessError;
use crate::types::{Decision, DecisionBatch, Process};
use sw_wire::types::MAX_TAGS;

pub fn validate_tags(tags: &[String]) -> Result<(), ProcessError> {
    if tags.len() > MAX_TAGS {
        return Err(ProcessError::TooManyTags {
            count: tags.len(),
            max: MAX_TAGS,
        });
    }
    Ok(())
}

/// Checks a process handed to the top-level start operation.
pub fn validate_new_process(process: &Process, config: &Configuration) -> Result<(), ProcessError> {
    if process.id.is_some() {
        return Err(ProcessError::AssignedId);
    }
    validate_tags(&process.tags)?;
    if process.parent.is_some() {
        return Err(ProcessError::ChildViaStart);
    }
    if config.workflow(&process.workflow).is_none() {
        return Err(ProcessError::UnregisteredWorkflow {
            name: process.workflow.clone(),
        });
    }
    Ok(())
}

/// Every activity or child workflow a batch starts must be registered.
pub fn validate_batch_types(batch: &DecisionBatch, config: &Configuration) -> Result<(), ProcessError> {
    for decision in batch.decisions() {
        match decision {
            Decision::ScheduleActivity { activity, .. } if config.activity(activity).is_none() => {
                return Err(ProcessError::UnregisteredActivity {
                    name: activity.clone(),
                });
            }
            Decision::StartChildProcess { process, .. }
                if config.workflow(&process.workflow).is_none() =>
            {
                return Err(ProcessError::UnregisteredWorkflow {
                    name: process.workflow.clone(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}
