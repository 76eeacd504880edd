use std::time::Duration;

use log::{error, info, warn};
use tokio::time::{self, MissedTickBehavior};

use crate::clients::StripeError;
use crate::services::mrr_service::MrrService;
use crate::utils::format::{MRR_PLACEHOLDER, format_mrr};

/// Periodically recomputes MRR and prints the formatted figure.
///
/// Invocations are serialized: ticks are consumed on this single task and
/// missed ticks are delayed rather than bursted, so a traversal that
/// outlives its interval never overlaps the next one.
pub struct MrrMonitor {
    service: MrrService,
    interval: Duration,
}

impl MrrMonitor {
    pub fn new(service: MrrService, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Refreshes immediately, then on every tick. Returns only when the
    /// credential is rejected, since no retry can fix that without a new
    /// key.
    pub async fn run(&self) -> Result<(), StripeError> {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match self.service.fetch_mrr().await {
                Ok(result) => {
                    info!("MRR refreshed: {} {}", result.cents, result.currency);
                    println!("{}", format_mrr(&result));
                }
                Err(StripeError::Unauthorized) => {
                    error!("Stripe rejected the configured API key; set STRIPE_SECRET_KEY to a valid key and restart");
                    println!("{}", MRR_PLACEHOLDER);
                    return Err(StripeError::Unauthorized);
                }
                Err(e) => {
                    warn!("MRR refresh failed, retrying on the next tick: {}", e);
                    println!("{}", MRR_PLACEHOLDER);
                }
            }
        }
    }
}
