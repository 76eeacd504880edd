use std::collections::HashMap;

use log::debug;

use crate::clients::{StripeClient, StripeError};
use crate::stripe_types::Subscription;

/// Final output of one traversal: the dominant currency's monthly total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MrrResult {
    pub cents: i64,
    pub currency: String,
}

pub struct MrrService {
    client: StripeClient,
}

impl MrrService {
    pub fn new(client: StripeClient) -> Self {
        Self { client }
    }

    /// Computes MRR across all currently active subscriptions.
    ///
    /// Pages are fetched strictly in sequence: the cursor for page N+1 is
    /// the id of the last record of page N. Any fetch or decode failure
    /// propagates immediately and the running totals are discarded; no
    /// partial figure is ever returned.
    pub async fn fetch_mrr(&self) -> Result<MrrResult, StripeError> {
        let mut mrr_by_currency: HashMap<String, i64> = HashMap::new();
        let mut starting_after: Option<String> = None;

        loop {
            let page = self
                .client
                .list_active_subscriptions(starting_after.as_deref())
                .await?;

            for subscription in &page.data {
                fold_subscription(&mut mrr_by_currency, subscription);
            }

            starting_after = match (page.has_more, page.data.last()) {
                (true, Some(last)) => Some(last.id.clone()),
                // has_more on an empty page would loop forever; treat it as end-of-data
                _ => None,
            };

            if starting_after.is_none() {
                break;
            }
        }

        Ok(dominant_currency(&mrr_by_currency))
    }
}

fn fold_subscription(totals: &mut HashMap<String, i64>, subscription: &Subscription) {
    let currency = subscription.currency.to_lowercase();
    let monthly = subscription.monthly_amount_cents();
    *totals.entry(currency.clone()).or_insert(0) += monthly;

    debug!(
        "SUB {} currency={} monthly={} cancel_at_period_end={} coupon={}",
        subscription.id,
        currency,
        monthly,
        subscription.cancel_at_period_end,
        subscription.coupon_id().unwrap_or("-"),
    );
}

/// Highest total wins. Equal totals go to the lexicographically smallest
/// currency code so repeated runs over the same data agree.
fn dominant_currency(totals: &HashMap<String, i64>) -> MrrResult {
    totals
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(currency, cents)| MrrResult {
            cents: *cents,
            currency: currency.clone(),
        })
        .unwrap_or_else(|| MrrResult {
            cents: 0,
            currency: "usd".to_string(),
        })
}
