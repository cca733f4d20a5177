//! Application-level configuration.
//!
//! - [`RelayParams`]: server-side relay control
//! - [`ClientParams`]: client-side pacing and progress

pub mod client_params;
pub mod relay_params;

pub use client_params::ClientParams;
pub use relay_params::RelayParams;
