pub mod stripe_client;

pub use stripe_client::*;
