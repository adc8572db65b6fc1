// Tailing and structural parsing of PHP debug logs.

// Core infrastructure
pub mod config;
pub mod error;
pub mod reader;

// Domain modules
pub mod parser;
pub mod process;
pub mod debug_log;
pub mod watch;

pub use config::TailerConfig;
pub use debug_log::DebugLog;
pub use error::{DispatchError, TailError, TailResult};
pub use parser::{EntryCollection, EntryType, LogEntry, LogLine};
pub use process::PostProcessor;
pub use watch::{SseDispatcher, SseFrame, WatchState, Watcher};
