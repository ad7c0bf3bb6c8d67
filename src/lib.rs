//! Personal reasoning pipeline ("PRS") with a flat-file log store.
//!
//! The `prs` binary runs a task description through four sequential
//! assistant phases (reasoning, evaluation, adaptation, synthesis) and
//! writes the transcript to a timestamped log file. The `prs-logs` binary
//! browses those files interactively. Both sides share only the on-disk
//! log convention in [`store`].

pub mod assistant;
pub mod browser;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod store;
pub mod task;
