pub mod calendar_event;
pub mod query;
pub mod task;
