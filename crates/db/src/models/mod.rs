pub mod budget_item;
pub mod event_outbox;
pub mod ids;
pub mod project;
pub mod song;
pub mod task;
pub mod task_comment;
