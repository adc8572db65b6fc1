mod clear;
mod file;
mod slice;

pub use clear::{backup_path, clear};
pub use file::{exists, Checkpoint, FileReader};
pub use slice::RawSlice;

pub(crate) use file::stat;
