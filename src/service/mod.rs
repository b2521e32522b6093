pub mod calendar;
pub mod review;
pub mod task_store;
