//! Dispatcher module: parallel fan-out of the download phase.
//!
//! The collected entries are split round-robin across workers. Every worker
//! gets its own [`Transfer`](crate::transfer::Transfer) instance, polls its
//! progress once per second while it downloads, and verifies the archives on
//! disk afterwards. Workers never affect each other: a failing one is logged
//! and reported, the others run to completion.
//!
//! - `partition` - [`round_robin`] bucket assignment
//! - `reporter` - [`ProgressReporter`] log lines and the entry [`preview`]
//! - `worker` - one worker's lifecycle and its [`WorkerReport`]
//! - `dispatcher` - the [`Dispatcher`] joining all workers

pub mod dispatcher;
pub mod partition;
pub mod reporter;
pub mod worker;

pub use dispatcher::{DispatchReport, Dispatcher, DEFAULT_POLL_INTERVAL};
pub use partition::round_robin;
pub use reporter::{preview, ProgressReporter, PREVIEW_LIMIT};
pub use worker::WorkerReport;
