//! # Patch Audit Core
//!
//! Single-host patch compliance auditing for SUSE/Oracle-derived systems.

pub mod collectors;
pub mod command;
pub mod config;
pub mod report;

// Convenience re-exports
pub use collectors::{
    CollectError, DateParseError, HostCollector, HostRecord, PatchCollector, PatchRecord,
};
pub use command::{CommandError, CommandOutput, CommandRunner, SystemCommandRunner};
pub use config::{AuditConfig, ConfigError, HostConfig, PatchConfig};

pub mod prelude {
    pub use crate::collectors::host::UNKNOWN_OS_VERSION;
    pub use crate::collectors::patch::{SelectedPatch, NO_PATCHES_MESSAGE};
    pub use crate::collectors::{
        CollectError, DateParseError, HostCollector, HostRecord, PatchCollector, PatchRecord,
    };
    pub use crate::command::{CommandError, CommandOutput, CommandRunner, SystemCommandRunner};
    pub use crate::config::{AuditConfig, ConfigError, HostConfig, PatchConfig};
    pub use crate::report::{header_columns, render_table};
}
