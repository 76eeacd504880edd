use dotenv::dotenv;
use std::env;

use mrr_monitor::clients::StripeClient;
use mrr_monitor::config::AppSettings;
use mrr_monitor::services::{MrrMonitor, MrrService};
use mrr_monitor::utils::format::format_mrr;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Load application settings
    let settings = match AppSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load application settings: {}", e);
            log::error!("Cannot start without a Stripe API key");
            std::process::exit(1);
        }
    };

    let service = MrrService::new(StripeClient::new(&settings));

    // `--once` computes a single figure and exits; the default keeps
    // refreshing on the configured interval.
    if env::args().any(|arg| arg == "--once") {
        match service.fetch_mrr().await {
            Ok(result) => println!("{}", format_mrr(&result)),
            Err(e) => {
                log::error!("MRR computation failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    log::info!(
        "Starting MRR monitor (refresh every {}s)",
        settings.refresh.interval.duration().as_secs()
    );

    let monitor = MrrMonitor::new(service, settings.refresh.interval.duration());
    if let Err(e) = monitor.run().await {
        log::error!("Monitor stopped: {}", e);
        std::process::exit(1);
    }
}
