// Bulk rename engine
pub mod rename;

// File input/output helpers
pub mod file;

// Digest computation
pub mod hash;

// JSON validation and formatting
pub mod json;

// Re-exports
pub use rename::{
    ActionStatus, RenameAction, RenameEngine, RenameError, RenameMode, RenamePlan,
    RenameReport, RenameRequest, SkippedDirectory, replace_name,
};
pub use file::{FileBytes, FileError, read_file, read_text_input, write_output};
pub use hash::{HashAlgorithm, HashError, hash_bytes, hash_file, hash_string};
pub use json::{JsonError, JsonStyle, format_json};
