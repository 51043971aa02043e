mod dispatch;
mod failures;
mod scheduler;
mod stats;
mod task;
mod walker;

pub use dispatch::*;
pub use failures::*;
pub use scheduler::*;
pub use stats::*;
pub use task::*;
pub use walker::*;
