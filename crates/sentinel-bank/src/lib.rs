//! Moves dated snapshot artifacts from the transient working tree into the
//! central bank: `data/<category>/<YYYY-MM-DD>/*.json` →
//! `central_bank/<bank_path>/<YYYY-MM-DD>/*.json`.

pub mod fs;
pub mod mover;

pub use fs::{ArchiveFs, DirEntry, StdFs};
pub use mover::{
    ArchiveConfig, ArchiveMover, ArchiveReport, CategoryMapping, FileOutcome, FileStatus,
    PartitionOutcome, PartitionState, RelocationPolicy,
};
