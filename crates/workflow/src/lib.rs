pub mod actor;
pub mod board;
pub mod budget;
pub mod error;
pub mod overview;
pub mod phase;
pub mod progress;
pub mod schedule;
pub mod service;
pub mod store;

pub use actor::{Actor, ActorRole};
pub use error::WorkflowError;
pub use service::{SongChange, WorkflowCommand, WorkflowOutcome, WorkflowService};
pub use store::{SeaOrmStore, StoreError, WorkflowStore};
