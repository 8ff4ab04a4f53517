//! Climate Planner API
//!
//! Transport boundary and session workflows for the climate planning backend.
//!
//! ```text
//! Session ──► PlannerClient ──► RetryPolicy ──► reqwest ──► backend
//!    │              │
//!    │              └── ApiError (validation / 4xx / 5xx / transport)
//!    ├──► climate_model adapters ──► SessionStore
//!    └──► Notifier
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod notify;
pub mod retry;
pub mod session;

pub use client::PlannerClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use notify::{LogNotifier, Notification, Notifier, RecordingNotifier};
pub use retry::RetryPolicy;
pub use session::Session;
