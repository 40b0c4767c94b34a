use async_trait::async_trait;
use sw_wire::error::TransportError;
use sw_wire::requests::{
    ActivityTaskDescription, DecisionTaskPage, ListOpenWorkflowExecutions, RegisterActivityType,
    RegisterWorkflowType, RespondActivityTask, RespondDecisionTaskCompleted,
    SignalWorkflowExecution, StartWorkflowExecution, TerminateWorkflowExecution,
};
use sw_wire::types::{
    ActivityType, ExecutionInfo, Page, RawEvent, TaskList, WorkflowExecution, WorkflowType,
};

/// The remote workflow service, one method per call.
///
/// Paged calls take the continuation token of the previous page and return
/// one page. A fault the service reports for an unknown type, execution or
/// task token surfaces as `TransportError::Fault` with
/// `UNKNOWN_RESOURCE_FAULT`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn describe_workflow_type(
        &self,
        domain: &str,
        workflow_type: &WorkflowType,
    ) -> Result<(), TransportError>;

    async fn register_workflow_type(&self, request: RegisterWorkflowType) -> Result<(), TransportError>;

    async fn describe_activity_type(
        &self,
        domain: &str,
        activity_type: &ActivityType,
    ) -> Result<(), TransportError>;

    async fn register_activity_type(&self, request: RegisterActivityType) -> Result<(), TransportError>;

    /// Returns the run id the service assigned.
    async fn start_workflow_execution(
        &self,
        request: StartWorkflowExecution,
    ) -> Result<String, TransportError>;

    async fn signal_workflow_execution(
        &self,
        request: SignalWorkflowExecution,
    ) -> Result<(), TransportError>;

    async fn terminate_workflow_execution(
        &self,
        request: TerminateWorkflowExecution,
    ) -> Result<(), TransportError>;

    async fn record_activity_task_heartbeat(&self, task_token: &str) -> Result<(), TransportError>;

    async fn respond_decision_task_completed(
        &self,
        request: RespondDecisionTaskCompleted,
    ) -> Result<(), TransportError>;

    async fn respond_activity_task(&self, request: RespondActivityTask) -> Result<(), TransportError>;

    async fn describe_workflow_execution(
        &self,
        domain: &str,
        execution: &WorkflowExecution,
    ) -> Result<ExecutionInfo, TransportError>;

    async fn get_workflow_execution_history(
        &self,
        domain: &str,
        execution: &WorkflowExecution,
        next_page_token: Option<String>,
    ) -> Result<Page<RawEvent>, TransportError>;

    async fn list_open_workflow_executions(
        &self,
        request: &ListOpenWorkflowExecutions,
        next_page_token: Option<String>,
    ) -> Result<Page<ExecutionInfo>, TransportError>;

    /// Long-polls for a decision task. The first page carries the task
    /// token; follow-up pages are fetched with `next_page_token`.
    async fn poll_for_decision_task(
        &self,
        domain: &str,
        task_list: &TaskList,
        identity: Option<&str>,
        next_page_token: Option<String>,
    ) -> Result<DecisionTaskPage, TransportError>;

    /// Long-polls for an activity task; `None` when the poll timed out.
    async fn poll_for_activity_task(
        &self,
        domain: &str,
        task_list: &TaskList,
        identity: Option<&str>,
    ) -> Result<Option<ActivityTaskDescription>, TransportError>;
}
