use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppSettings {
    pub app: AppConfig,
    pub stripe: StripeConfig,
    pub refresh: RefreshConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub environment: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StripeConfig {
    pub secret_key: String,
    pub api_base: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshConfig {
    pub interval: RefreshInterval,
}

/// Supported refresh cadences for the monitor loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshInterval {
    FiveMin,
    FifteenMin,
    OneHour,
}

impl RefreshInterval {
    pub fn from_minutes(minutes: u64) -> Option<Self> {
        match minutes {
            5 => Some(Self::FiveMin),
            15 => Some(Self::FifteenMin),
            60 => Some(Self::OneHour),
            _ => None,
        }
    }

    pub fn duration(self) -> Duration {
        let minutes = match self {
            Self::FiveMin => 5,
            Self::FifteenMin => 15,
            Self::OneHour => 60,
        };
        Duration::from_secs(minutes * 60)
    }
}

impl AppSettings {
    pub fn from_env() -> Result<Self, AppError> {
        // App config
        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "mrr-monitor".to_string());
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        // Stripe configuration. The key is opaque credential material; the
        // only validation owned here is non-emptiness.
        let secret_key = env::var("STRIPE_SECRET_KEY")
            .map_err(|_| AppError::Configuration("STRIPE_SECRET_KEY must be set".to_string()))?;
        if secret_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "STRIPE_SECRET_KEY must not be empty".to_string(),
            ));
        }

        let api_base = env::var("STRIPE_API_BASE")
            .unwrap_or_else(|_| "https://api.stripe.com/v1".to_string());

        // Refresh cadence
        let interval_minutes = env::var("REFRESH_INTERVAL_MINUTES")
            .unwrap_or_else(|_| "15".to_string())
            .parse::<u64>()
            .map_err(|_| {
                AppError::Configuration(
                    "REFRESH_INTERVAL_MINUTES must be a valid number".to_string(),
                )
            })?;
        // Unsupported cadences fall back to the default instead of failing startup
        let interval =
            RefreshInterval::from_minutes(interval_minutes).unwrap_or(RefreshInterval::FifteenMin);

        Ok(Self {
            app: AppConfig {
                name: app_name,
                environment,
            },
            stripe: StripeConfig {
                secret_key,
                api_base,
            },
            refresh: RefreshConfig { interval },
        })
    }
}
