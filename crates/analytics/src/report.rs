use chrono::NaiveDate;
use core_types::CastEntry;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// The key an aggregate row was grouped under.
///
/// Ordering is by country first, then year, which is the order rows are
/// returned in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupKey {
    Country { country: String },
    CountryYear { country: String, year: i32 },
}

impl GroupKey {
    pub fn country(&self) -> &str {
        match self {
            GroupKey::Country { country } | GroupKey::CountryYear { country, .. } => country,
        }
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            GroupKey::Country { .. } => None,
            GroupKey::CountryYear { year, .. } => Some(*year),
        }
    }
}

/// One chartable output row of the reporting engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    #[serde(flatten)]
    pub key: GroupKey,
    /// Arithmetic mean of the metric over the group.
    pub value: f64,
    /// Number of records the mean was computed over.
    pub count: usize,
}

/// Regroups country-year rows into one `(year, value)` series per country,
/// the shape a line chart with one line per country wants.
pub fn series_by_country(rows: &[AggregateRow]) -> BTreeMap<String, Vec<(i32, f64)>> {
    let mut series: BTreeMap<String, Vec<(i32, f64)>> = BTreeMap::new();
    for row in rows {
        if let Some(year) = row.key.year() {
            series
                .entry(row.key.country().to_string())
                .or_default()
                .push((year, row.value));
        }
    }
    series
}

/// Whether a movie made or lost money. Break-even counts as a gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProfitTone {
    Gain,
    Loss,
}

impl ProfitTone {
    pub fn of(profit: Decimal) -> Self {
        if profit.is_sign_negative() && !profit.is_zero() {
            ProfitTone::Loss
        } else {
            ProfitTone::Gain
        }
    }
}

/// Everything the movie details page shows about one title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetails {
    pub title: String,
    pub poster: String,
    pub note: Option<f64>,
    pub release_date: Option<NaiveDate>,
    pub runtime: u32,
    pub budget: Decimal,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub tone: ProfitTone,
    pub cast: Vec<CastEntry>,
}

/// An actor's card on the actors page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorProfile {
    pub name: String,
    /// Taken from the actor's credit in their first listed film.
    pub profile_path: Option<String>,
    pub films: Vec<String>,
}

/// Headline numbers for the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub movies: usize,
    pub countries: usize,
    pub actors: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn keys_order_by_country_then_year() {
        let mut keys = vec![
            GroupKey::CountryYear { country: "France".into(), year: 2001 },
            GroupKey::CountryYear { country: "Allemagne".into(), year: 2010 },
            GroupKey::CountryYear { country: "France".into(), year: 1999 },
        ];
        keys.sort();
        let flat: Vec<_> = keys.iter().map(|k| (k.country(), k.year())).collect();
        assert_eq!(
            flat,
            vec![
                ("Allemagne", Some(2010)),
                ("France", Some(1999)),
                ("France", Some(2001)),
            ]
        );
    }

    #[test]
    fn rows_serialize_flat() {
        let row = AggregateRow {
            key: GroupKey::CountryYear { country: "France".into(), year: 2001 },
            value: 1.5,
            count: 2,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"country": "France", "year": 2001, "value": 1.5, "count": 2})
        );

        let row = AggregateRow {
            key: GroupKey::Country { country: "Japon".into() },
            value: 3.0,
            count: 1,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, serde_json::json!({"country": "Japon", "value": 3.0, "count": 1}));
    }

    #[test]
    fn series_follow_row_order() {
        let point = |country: &str, year: i32, value: f64| AggregateRow {
            key: GroupKey::CountryYear {
                country: country.into(),
                year,
            },
            value,
            count: 1,
        };
        let rows = vec![
            point("France", 2000, 1.0),
            point("France", 2001, 2.0),
            point("Japon", 2000, 3.0),
        ];
        let series = series_by_country(&rows);
        assert_eq!(series["France"], vec![(2000, 1.0), (2001, 2.0)]);
        assert_eq!(series["Japon"], vec![(2000, 3.0)]);
    }

    #[test]
    fn break_even_is_a_gain() {
        assert_eq!(ProfitTone::of(dec!(0)), ProfitTone::Gain);
        assert_eq!(ProfitTone::of(dec!(10)), ProfitTone::Gain);
        assert_eq!(ProfitTone::of(dec!(-1)), ProfitTone::Loss);
    }
}
