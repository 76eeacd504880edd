//! Custom Stripe types module
//!
//! Hand-rolled subset of the Stripe API objects the MRR computation
//! consumes. Optional fields carry documented defaults: a missing
//! `quantity` is 1, a missing `unit_amount` is 0, and a missing or
//! unknown billing interval bills monthly.

pub mod discount;
pub mod price;
pub mod subscription;

// Re-export all types for convenience
pub use discount::{Coupon, Discount};
pub use price::{Price, Recurring};
pub use subscription::{Subscription, SubscriptionItem, SubscriptionItemList, SubscriptionList};
