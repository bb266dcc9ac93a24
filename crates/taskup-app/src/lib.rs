//! TaskUp Application
//!
//! Native shell: windowing, GPU surface and egui integration around a task
//! list screen that presents bottom sheets.

mod app;
mod config;
mod screen;

pub use app::{App, AppError};
pub use config::AppConfig;
pub use screen::{SheetIds, Task, TaskScreen, TaskStatus};
