//! framekit-timeline-core
//!
//! A frame-stepped scheduler that fires callbacks in fire-time order.
//! The timeline is generic over the stored action so the caller decides what a
//! callback receives when it runs.

pub mod config;
pub mod ids;
pub mod timeline;

pub use config::TimelineConfig;
pub use ids::RecordId;
pub use timeline::Timeline;
