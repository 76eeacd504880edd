pub mod settings;

pub use settings::{AppSettings, RefreshInterval, StripeConfig};
