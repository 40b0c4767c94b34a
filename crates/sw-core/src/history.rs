//! Rebuilds a typed, causally ordered process history from raw service events.
//!
//! The service links events only through numeric back-references
//! (`scheduledEventId`, `initiatedEventId`, ...). Every reference is resolved
//! through one id index built per reconstruction; a reference that does not
//! resolve aborts the reconstruction.
//!
//! Events that originate from a decision (`ActivityTaskScheduled`,
//! `StartChildWorkflowExecutionInitiated`, `TimerStarted`) are recorded by the
//! service after the `DecisionTaskCompleted` marker of their round, possibly
//! behind unrelated events. They are ordered by the id of the
//! `DecisionTaskStarted` event of that round instead of their own id.

use crate::error::HistoryError;
use crate::types::{
    ActivityExecution, ActivityResult, Decision, DomainEvent, EventBody, Process, ProcessId,
    ProcessResult, Signal, Timer,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use sw_wire::attributes::{
    ActivityTaskLifecycleAttributes, ActivityTaskScheduledAttributes,
    ChildWorkflowExecutionClosedAttributes, DecisionTaskCompletedAttributes,
    StartChildWorkflowExecutionInitiatedAttributes, TimerFiredAttributes, TimerStartedAttributes,
    WorkflowExecutionSignaledAttributes, WorkflowExecutionStartedAttributes,
};
use sw_wire::types::{EventType, ExecutionInfo, RawEvent};
use sw_wire::util::decode_payload;

/// Builds the `Process` for one execution from its complete event list.
pub fn reconstruct(info: &ExecutionInfo, events: &[RawEvent]) -> Result<Process, HistoryError> {
    let index = EventIndex::build(events)?;

    let start = events
        .iter()
        .find(|event| event.event_type == EventType::WorkflowExecutionStarted)
        .ok_or(HistoryError::MissingStartEvent)?;
    let start_attrs: WorkflowExecutionStartedAttributes = attributes(start)?;

    let mut keyed = Vec::with_capacity(events.len());
    for event in events {
        match resolve(event, &index)? {
            Some((key, body)) => keyed.push((
                key,
                DomainEvent {
                    at: event.timestamp,
                    body,
                },
            )),
            None => {
                tracing::trace!(
                    event_id = event.event_id,
                    event_type = %event.event_type,
                    "event not part of domain history"
                );
            }
        }
    }
    // Stable: events sharing a round key keep arrival order.
    keyed.sort_by_key(|(key, _)| *key);
    let history: Vec<DomainEvent> = keyed.into_iter().map(|(_, event)| event).collect();

    let id = ProcessId::from(&info.execution);
    tracing::debug!(
        process_id = %id,
        raw_events = events.len(),
        history = history.len(),
        "history reconstructed"
    );

    let tags = if start_attrs.tag_list.is_empty() {
        info.tag_list.clone()
    } else {
        start_attrs.tag_list
    };

    Ok(Process {
        id: Some(id),
        workflow: info.workflow_type.name.clone(),
        input: decode_payload(start_attrs.input.as_deref()),
        tags,
        parent: start_attrs.parent_workflow_execution.map(ProcessId::from),
        history,
    })
}

/// Id-indexed view over one execution's raw events.
struct EventIndex<'a> {
    by_id: HashMap<i64, &'a RawEvent>,
}

impl<'a> EventIndex<'a> {
    fn build(events: &'a [RawEvent]) -> Result<Self, HistoryError> {
        let mut by_id = HashMap::with_capacity(events.len());
        for event in events {
            if by_id.insert(event.event_id, event).is_some() {
                return Err(HistoryError::DuplicateEvent {
                    event_id: event.event_id,
                });
            }
        }
        Ok(Self { by_id })
    }

    /// Follows `field` of `from` to an earlier event of the `expected` type.
    fn follow(
        &self,
        from: &RawEvent,
        field: &'static str,
        reference: i64,
        expected: EventType,
    ) -> Result<&'a RawEvent, HistoryError> {
        let target = self
            .by_id
            .get(&reference)
            .copied()
            .ok_or(HistoryError::UnresolvedReference {
                event_id: from.event_id,
                field,
                reference,
            })?;
        if reference >= from.event_id {
            return Err(malformed(
                from,
                format!("{field} {reference} does not precede the event"),
            ));
        }
        if target.event_type != expected {
            return Err(malformed(
                from,
                format!(
                    "{field} {reference} is a {}, expected {expected}",
                    target.event_type
                ),
            ));
        }
        Ok(target)
    }

    /// Order key of a decision-originating event: the id of the
    /// `DecisionTaskStarted` event of the round that emitted it.
    fn decision_round(&self, from: &RawEvent, completed_event_id: i64) -> Result<i64, HistoryError> {
        let completed = self.follow(
            from,
            "decisionTaskCompletedEventId",
            completed_event_id,
            EventType::DecisionTaskCompleted,
        )?;
        let attrs: DecisionTaskCompletedAttributes = attributes(completed)?;
        self.follow(
            completed,
            "startedEventId",
            attrs.started_event_id,
            EventType::DecisionTaskStarted,
        )?;
        Ok(attrs.started_event_id)
    }
}

fn resolve(
    event: &RawEvent,
    index: &EventIndex<'_>,
) -> Result<Option<(i64, EventBody)>, HistoryError> {
    let own = event.event_id;
    let resolved = match event.event_type {
        EventType::WorkflowExecutionStarted => Some((own, EventBody::ProcessStarted)),
        EventType::DecisionTaskStarted => Some((own, EventBody::DecisionStarted)),

        EventType::ActivityTaskScheduled => {
            let attrs: ActivityTaskScheduledAttributes = attributes(event)?;
            let key = index.decision_round(event, attrs.decision_task_completed_event_id)?;
            let decision = Decision::ScheduleActivity {
                activity: attrs.activity_type.name,
                id: attrs.activity_id,
                input: decode_payload(attrs.input.as_deref()),
                category: attrs.task_list.map(|list| list.name),
            };
            Some((key, EventBody::Decision { decision }))
        }
        EventType::StartChildWorkflowExecutionInitiated => {
            let attrs: StartChildWorkflowExecutionInitiatedAttributes = attributes(event)?;
            let key = index.decision_round(event, attrs.decision_task_completed_event_id)?;
            let mut process = Process::new(attrs.workflow_type.name);
            process.input = decode_payload(attrs.input.as_deref());
            process.tags = attrs.tag_list;
            let decision = Decision::StartChildProcess {
                process: Box::new(process),
                child_policy: attrs.child_policy,
            };
            Some((key, EventBody::Decision { decision }))
        }
        EventType::TimerStarted => {
            let attrs: TimerStartedAttributes = attributes(event)?;
            let key = index.decision_round(event, attrs.decision_task_completed_event_id)?;
            let decision = Decision::Timer(timer(event, attrs)?);
            Some((key, EventBody::Decision { decision }))
        }

        EventType::ActivityTaskStarted
        | EventType::ActivityTaskCompleted
        | EventType::ActivityTaskFailed
        | EventType::ActivityTaskCanceled
        | EventType::ActivityTaskTimedOut => Some((own, activity_lifecycle(event, index)?)),

        EventType::WorkflowExecutionSignaled => {
            let attrs: WorkflowExecutionSignaledAttributes = attributes(event)?;
            let signal = Signal {
                name: attrs.signal_name,
                data: decode_payload(attrs.input.as_deref()),
            };
            Some((own, EventBody::Signal { signal }))
        }

        EventType::ChildWorkflowExecutionCompleted
        | EventType::ChildWorkflowExecutionCanceled
        | EventType::ChildWorkflowExecutionTimedOut
        | EventType::ChildWorkflowExecutionFailed
        | EventType::ChildWorkflowExecutionTerminated => Some((own, child_closed(event, index)?)),

        EventType::TimerFired => {
            let attrs: TimerFiredAttributes = attributes(event)?;
            let started = index.follow(
                event,
                "startedEventId",
                attrs.started_event_id,
                EventType::TimerStarted,
            )?;
            let timer = timer(started, attributes(started)?)?;
            Some((own, EventBody::Timer { timer }))
        }

        _ => None,
    };
    Ok(resolved)
}

fn activity_lifecycle(event: &RawEvent, index: &EventIndex<'_>) -> Result<EventBody, HistoryError> {
    let attrs: ActivityTaskLifecycleAttributes = attributes(event)?;
    let scheduled = index.follow(
        event,
        "scheduledEventId",
        attrs.scheduled_event_id,
        EventType::ActivityTaskScheduled,
    )?;
    let scheduled_attrs: ActivityTaskScheduledAttributes = attributes(scheduled)?;
    let execution = ActivityExecution::new(
        scheduled_attrs.activity_type.name,
        scheduled_attrs.activity_id,
        decode_payload(scheduled_attrs.input.as_deref()),
    );

    let result = match event.event_type {
        EventType::ActivityTaskCompleted => ActivityResult::Completed {
            result: decode_payload(attrs.result.as_deref()),
        },
        EventType::ActivityTaskFailed => ActivityResult::Failed {
            reason: attrs.reason,
            details: attrs.details,
        },
        EventType::ActivityTaskCanceled => ActivityResult::Canceled {
            details: attrs.details,
        },
        EventType::ActivityTaskTimedOut => ActivityResult::TimedOut {
            details: attrs.details,
        },
        _ => return Ok(EventBody::ActivityStarted { execution }),
    };
    Ok(EventBody::Activity { execution, result })
}

fn child_closed(event: &RawEvent, index: &EventIndex<'_>) -> Result<EventBody, HistoryError> {
    let attrs: ChildWorkflowExecutionClosedAttributes = attributes(event)?;
    let initiated = index.follow(
        event,
        "initiatedEventId",
        attrs.initiated_event_id,
        EventType::StartChildWorkflowExecutionInitiated,
    )?;
    let initiated_attrs: StartChildWorkflowExecutionInitiatedAttributes = attributes(initiated)?;

    let result = match event.event_type {
        EventType::ChildWorkflowExecutionCompleted => ProcessResult::Completed {
            result: decode_payload(attrs.result.as_deref()),
        },
        EventType::ChildWorkflowExecutionCanceled => ProcessResult::Canceled {
            details: attrs.details,
        },
        EventType::ChildWorkflowExecutionFailed => ProcessResult::Failed {
            reason: attrs.reason,
            details: attrs.details,
        },
        EventType::ChildWorkflowExecutionTerminated => ProcessResult::Terminated,
        _ => ProcessResult::TimedOut,
    };
    Ok(EventBody::ChildProcess {
        process_id: ProcessId::from(&attrs.workflow_execution),
        workflow: initiated_attrs.workflow_type.name,
        tags: initiated_attrs.tag_list,
        result,
    })
}

fn timer(event: &RawEvent, attrs: TimerStartedAttributes) -> Result<Timer, HistoryError> {
    let delay = attrs.start_to_fire_timeout.parse().map_err(|_| {
        malformed(
            event,
            format!("invalid startToFireTimeout {:?}", attrs.start_to_fire_timeout),
        )
    })?;
    Ok(Timer {
        delay,
        data: decode_payload(attrs.control.as_deref()),
    })
}

fn attributes<T: DeserializeOwned>(event: &RawEvent) -> Result<T, HistoryError> {
    event
        .attributes_as()
        .map_err(|err| malformed(event, err.to_string()))
}

fn malformed(event: &RawEvent, message: String) -> HistoryError {
    HistoryError::Malformed {
        event_id: event.event_id,
        event_type: event.event_type,
        message,
    }
}
