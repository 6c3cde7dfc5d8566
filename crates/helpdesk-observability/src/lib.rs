//! Helpdesk Observability
//!
//! Console logging for the help desk crates, built on `tracing-subscriber`.
//!
//! # Examples
//!
//! ```no_run
//! helpdesk_observability::init_console_logging();
//! tracing::info!("account store ready");
//! ```

pub mod basic_logging;

pub use basic_logging::{LogFormat, init_console_logging, try_init_console_logging};
