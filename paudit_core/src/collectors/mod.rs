//! Host and patch data collectors
//!
//! Each collector resolves live system state through the command runner
//! and owns the formatting of its own report section.

pub mod error;
pub mod host;
pub mod patch;

pub use error::{CollectError, DateParseError};
pub use host::{HostCollector, HostRecord};
pub use patch::{PatchCollector, PatchRecord};
