//! Command implementations behind the `nesrom` binary.
//!
//! Everything that touches the filesystem lives here; `nesrom-core` only ever
//! sees byte slices.

pub mod args;
pub mod commands;
pub mod files;
pub mod sidecar;
