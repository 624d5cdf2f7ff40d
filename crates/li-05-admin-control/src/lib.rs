//! # LI-05 Administrative Controller
//!
//! Owner-gated operations over the registry and the metering engine, plus the
//! service-wide pause flag.
//!
//! **Component:** 5
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | `update_fees` | replace basic and premium query fees |
//! | `toggle_indexer` | flip an indexer's active flag |
//! | `withdraw_fees` | pay collected fees out of the treasury |
//! | `set_paused` | stop or resume ingestion and metered queries |
//! | `trigger_analytics_report` | record a report ticket |
//!
//! Every operation fails `NotAuthorized` unless the caller is the owner.

#![warn(clippy::all)]

pub mod domain;
pub mod service;

pub use domain::{AdminError, AnalyticsReportTicket};
pub use service::AdminController;
