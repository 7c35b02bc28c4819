//! Shared UI utilities.

pub mod task;
pub mod toasts;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use toasts::{Toast, ToastLevel, ToastQueue};
