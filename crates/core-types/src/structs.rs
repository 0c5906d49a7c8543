use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The country label carried by movies whose production country is not known.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// One credited performer of a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastEntry {
    pub name: String,
    /// Empty when the source did not name the role.
    pub character: String,
    /// Path fragment appended to the image base URL, e.g. `/abc.jpg`.
    pub profile_path: Option<String>,
}

/// One row of the movie dataset, with its serialized columns already decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub release_date: Option<NaiveDate>,
    /// Runtime in minutes.
    pub runtime: u32,
    /// Rating on a 0-10 scale, `None` when the cell is blank.
    pub note: Option<f64>,
    pub popularity: Option<f64>,
    /// Zero means the budget is unknown.
    pub budget: Decimal,
    /// Zero means the revenue is unknown.
    pub revenue: Decimal,
    pub country: String,
    pub poster: String,
    pub cast: Vec<CastEntry>,
    pub actors: BTreeSet<String>,
}

impl MovieRecord {
    /// Revenue minus budget. Always derived, never stored.
    pub fn profit(&self) -> Decimal {
        self.revenue - self.budget
    }

    pub fn year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }

    pub fn is_unknown_country(&self) -> bool {
        self.country == UNKNOWN_COUNTRY
    }

    /// Returns the cast entry credited under `name`, if any.
    pub fn cast_member(&self, name: &str) -> Option<&CastEntry> {
        self.cast.iter().find(|entry| entry.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record() -> MovieRecord {
        MovieRecord {
            title: "Le Samouraï".to_string(),
            release_date: NaiveDate::from_ymd_opt(1967, 10, 25),
            runtime: 105,
            note: Some(7.9),
            popularity: Some(12.5),
            budget: dec!(200),
            revenue: dec!(100),
            country: "France".to_string(),
            poster: "https://image.tmdb.org/t/p/w500/poster.jpg".to_string(),
            cast: vec![CastEntry {
                name: "Alain Delon".to_string(),
                character: "Jef Costello".to_string(),
                profile_path: Some("/delon.jpg".to_string()),
            }],
            actors: BTreeSet::from(["Alain Delon".to_string()]),
        }
    }

    #[test]
    fn profit_is_revenue_minus_budget() {
        assert_eq!(record().profit(), dec!(-100));
    }

    #[test]
    fn year_comes_from_release_date() {
        let mut movie = record();
        assert_eq!(movie.year(), Some(1967));
        movie.release_date = None;
        assert_eq!(movie.year(), None);
    }

    #[test]
    fn cast_member_lookup_is_exact() {
        let movie = record();
        assert!(movie.cast_member("Alain Delon").is_some());
        assert!(movie.cast_member("alain delon").is_none());
    }

    #[test]
    fn serializes_decimals_for_json_output() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["title"], "Le Samouraï");
        assert_eq!(json["cast"][0]["character"], "Jef Costello");
    }
}
