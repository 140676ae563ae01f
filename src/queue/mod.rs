pub mod pool;
pub mod task;

pub use pool::Pool;
pub use task::{Task, TaskResult};
