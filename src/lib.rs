#![warn(missing_docs)]

//! This library implements the data layer behind the CollapseLoader website:
//! resolving release download links from GitHub, loading the client catalogs
//! from Atlas, and polling aggregate usage statistics. The stores here hold
//! shared state for the lifetime of a process the same way the site holds it
//! for the lifetime of a page.
//!
//! Note: The functions in this library expect the use of the Tokio runtime
//! and may panic if it is not used

pub use collapse_net as net;
pub use collapse_shared as shared;

/// Configuration for library functionality
pub mod config;
/// Shared session stores
pub mod store;

pub use config::Config;
pub use store::analytics::{AnalyticsStore, PollerHandle};
pub use store::clients::ClientStore;
pub use store::releases::{ReleaseLinks, ReleaseResolver};
