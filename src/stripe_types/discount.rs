use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Discount {
    pub coupon: Option<Coupon>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Coupon {
    pub id: Option<String>,
    /// Fractional percentage in 0..=100.
    pub percent_off: Option<f64>,
    /// Flat reduction in minor currency units.
    pub amount_off: Option<i64>,
}

impl Coupon {
    /// Applies at most one discount rule to `raw` minor units.
    ///
    /// `percent_off` takes precedence when both fields are set. The percent
    /// path is a floating multiply followed by a truncating cast; the
    /// amount path never goes below zero.
    pub fn apply(&self, raw: i64) -> i64 {
        if let Some(percent) = self.percent_off {
            raw - (raw as f64 * percent / 100.0) as i64
        } else if let Some(off) = self.amount_off {
            (raw - off).max(0)
        } else {
            raw
        }
    }
}
