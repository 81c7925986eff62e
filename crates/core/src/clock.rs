//! Source of "today" for default anchors

use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::ProviderError;

/// Provides the current date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock, either local time or a named timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    timezone: Option<Tz>,
}

impl SystemClock {
    pub fn local() -> Self {
        Self { timezone: None }
    }

    /// Timezone ID (e.g., "America/New_York", "Europe/London", "Local")
    pub fn with_timezone(name: &str) -> Result<Self, ProviderError> {
        if name.is_empty() || name.eq_ignore_ascii_case("local") {
            return Ok(Self::local());
        }
        let timezone = name
            .parse::<Tz>()
            .map_err(|_| ProviderError::InvalidTimezone(name.to_string()))?;
        Ok(Self {
            timezone: Some(timezone),
        })
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.timezone {
            Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
            None => Local::now().date_naive(),
        }
    }
}

/// Clock frozen at one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
