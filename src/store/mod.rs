/// The statistics counters and their poller
pub mod analytics;
/// The client catalog store
pub mod clients;
/// The release download link resolver
pub mod releases;
