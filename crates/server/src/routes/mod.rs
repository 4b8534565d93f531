pub mod budget_items;
pub mod comments;
pub mod health;
pub mod projects;
pub mod songs;
pub mod tasks;
