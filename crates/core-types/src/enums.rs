use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The numeric field averaged by the reporting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Budget,
    Revenue,
    /// Derived as `revenue - budget`, never stored.
    Profit,
    Note,
    Popularity,
}

impl Metric {
    /// All recognized metrics, in the order the dashboard offers them.
    pub const ALL: [Metric; 5] = [
        Metric::Budget,
        Metric::Revenue,
        Metric::Profit,
        Metric::Note,
        Metric::Popularity,
    ];

    /// The metrics expressed in currency.
    pub const FINANCIAL: [Metric; 3] = [Metric::Budget, Metric::Revenue, Metric::Profit];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Budget => "Budget",
            Metric::Revenue => "Revenue",
            Metric::Profit => "Profit",
            Metric::Note => "Note",
            Metric::Popularity => "Popularity",
        }
    }

    /// Returns true for the currency metrics.
    pub fn is_financial(&self) -> bool {
        Self::FINANCIAL.contains(self)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Metric::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::InvalidMetric(s.to_string()))
    }
}

/// The key records are grouped by before averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    Country,
    CountryYear,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Country => f.write_str("country"),
            Dimension::CountryYear => f.write_str("country-year"),
        }
    }
}
