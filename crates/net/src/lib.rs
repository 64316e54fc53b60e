/// Interacting with the Atlas catalog API
pub mod atlas;
/// Download utilities
pub mod download;
/// Interacting with the GitHub releases API
pub mod github;
/// Interacting with the statistics API
pub mod statistics;
