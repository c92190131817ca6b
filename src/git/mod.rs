pub mod facade;
pub mod status;

// Re-export commonly used types
pub use facade::Git;
pub use status::{EntryKind, StatusEntry, parse_status_porcelain_v2};
