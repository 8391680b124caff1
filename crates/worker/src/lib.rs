//! Worker primitives shared by the synonym resolver and the render pipeline.
//!
//! Everything async in haze goes through [`spawn`] or [`WorkerJoinSet`] so
//! spawned work is tagged with a [`TaskClass`] in traces, and render cycles
//! are ordered by [`GenerationClock`].

mod class;
mod join_set;
mod spawn;
mod token;

pub use class::TaskClass;
pub use join_set::WorkerJoinSet;
pub use spawn::spawn;
pub use token::{GenerationClock, GenerationToken};
pub use tokio::task::JoinHandle;
