pub mod task;
pub mod task_list_store;

pub use task::Task;
pub use task_list_store::TaskListStore;
