use reqwest::Client;
use std::time::Duration;

pub fn new_api_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(30)) // list pages are small; fail fast and let the next tick retry
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .expect("Failed to build HTTP client")
}
