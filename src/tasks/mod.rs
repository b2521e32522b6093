pub mod daily_loop;
pub mod daily_review;
pub mod task_sync;
