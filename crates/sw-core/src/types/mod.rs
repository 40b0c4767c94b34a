pub mod activity;
pub mod decision;
pub mod event;
pub mod ids;
pub mod process;
pub mod task;

pub use activity::{ActivityExecution, ActivityResult};
pub use decision::{Decision, DecisionBatch, Timer};
pub use event::{DomainEvent, EventBody, Signal};
pub use ids::{generate_id, IdError, ProcessHandle, ProcessId};
pub use process::{Process, ProcessResult};
pub use task::{ActivityTask, DecisionTask};
