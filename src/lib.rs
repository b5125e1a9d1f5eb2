pub mod atomic_write;
pub mod document;
pub mod error;
pub mod poll_loop;
pub mod record_update;
pub mod run_config;

pub use error::TickerError;
pub use poll_loop::{LoopState, PassOutcome, PollLoop, RunSummary};
pub use run_config::{DEFAULT_FIELD, RunConfig};
