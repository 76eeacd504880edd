//! MRR Monitor Library
//!
//! Computes Monthly Recurring Revenue from Stripe subscription data:
//! cursor-paginated retrieval of active subscriptions, monthly-equivalent
//! normalization across billing intervals, discount application, and
//! dominant-currency selection. The monitor binary is one consumer; the
//! engine itself makes no presentation decisions.

pub mod clients;
pub mod config;
pub mod error;
pub mod services;
pub mod stripe_types;
pub mod utils;

// Re-export commonly used types for convenience
pub use clients::{StripeClient, StripeError};
pub use config::AppSettings;
pub use error::{AppError, AppResult};
pub use services::{MrrMonitor, MrrResult, MrrService};
