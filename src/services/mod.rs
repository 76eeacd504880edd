pub mod monitor;
pub mod mrr_service;

// Re-export commonly used types
pub use monitor::MrrMonitor;
pub use mrr_service::{MrrResult, MrrService};
