//! File storage stages for snapshot matching
//!
//! `ReaderStage` loads the expected result from the snapshot file;
//! `WriterStage` persists the actual result as a snapshot or mismatch file.

pub mod errors;
pub mod files;
pub mod reader;
pub mod writer;

pub use reader::ReaderStage;
pub use writer::WriterStage;
