use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Price {
    /// Amount in minor currency units (cents). Absent for free prices.
    pub unit_amount: Option<i64>,
    pub recurring: Option<Recurring>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Recurring {
    /// One of "day", "week", "month", "year". Anything else bills monthly.
    pub interval: String,
}
