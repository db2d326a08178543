pub mod metrics;
pub mod owner;

pub use metrics::track_metrics;
pub use owner::OwnerId;
