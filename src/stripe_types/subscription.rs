use serde::{Deserialize, Serialize};

use super::discount::Discount;
use super::price::Price;

/// One page of the subscriptions listing endpoint.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SubscriptionList {
    pub data: Vec<Subscription>,
    pub has_more: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Subscription {
    pub id: String,
    /// ISO 4217 code as Stripe reports it; lowercased before grouping.
    pub currency: String,
    /// Cancelled-at-period-end subscriptions still count as active.
    pub cancel_at_period_end: bool,
    pub items: SubscriptionItemList,
    pub discount: Option<Discount>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SubscriptionItemList {
    pub data: Vec<SubscriptionItem>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SubscriptionItem {
    pub price: Price,
    pub quantity: Option<i64>,
}

impl SubscriptionItem {
    /// Monthly-equivalent amount in minor units.
    ///
    /// Yearly amounts divide by 12; weekly and daily amounts use the
    /// fixed-point factors 433/100 (~52.14 weeks/year over 12) and
    /// 3044/100 (~365.2 days/year over 12). Multiply-then-divide order
    /// and truncation must not change, or totals drift from reference
    /// output.
    pub fn monthly_amount_cents(&self) -> i64 {
        let quantity = self.quantity.unwrap_or(1);
        let unit_amount = self.price.unit_amount.unwrap_or(0);
        let effective = unit_amount * quantity;

        match self.price.recurring.as_ref().map(|r| r.interval.as_str()) {
            Some("year") => effective / 12,
            Some("week") => effective * 433 / 100,
            Some("day") => effective * 3044 / 100,
            // "month", unknown intervals, and non-recurring prices bill monthly
            _ => effective,
        }
    }
}

impl Subscription {
    /// Monthly-equivalent amount for the whole subscription: the sum over
    /// its items, with the subscription-level coupon applied once.
    pub fn monthly_amount_cents(&self) -> i64 {
        let raw: i64 = self
            .items
            .data
            .iter()
            .map(SubscriptionItem::monthly_amount_cents)
            .sum();

        match self.discount.as_ref().and_then(|d| d.coupon.as_ref()) {
            Some(coupon) => coupon.apply(raw),
            None => raw,
        }
    }

    /// Coupon identifier for diagnostics, when one is attached.
    pub fn coupon_id(&self) -> Option<&str> {
        self.discount
            .as_ref()
            .and_then(|d| d.coupon.as_ref())
            .and_then(|c| c.id.as_deref())
    }
}
