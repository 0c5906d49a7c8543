use crate::normalize::normalize_label;
use crate::report::{AggregateRow, GroupKey};
use core_types::{Dimension, Metric, MovieRecord, UNKNOWN_COUNTRY};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

/// Selects which records take part in an aggregation.
///
/// Country labels are folded with [`normalize_label`] on the way in, so the
/// allow-set matches records regardless of how their labels are encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationFilter {
    countries: BTreeSet<String>,
    years: Option<(i32, i32)>,
}

impl AggregationFilter {
    pub fn new<I, S>(countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            countries: countries
                .into_iter()
                .map(|c| normalize_label(c.as_ref()))
                .collect(),
            years: None,
        }
    }

    /// Restricts the filter to release years in `range`, bounds included.
    /// A reversed range is read with its bounds swapped.
    pub fn with_years(mut self, range: RangeInclusive<i32>) -> Self {
        let (start, end) = range.into_inner();
        self.years = Some((start.min(end), start.max(end)));
        self
    }

    pub fn countries(&self) -> &BTreeSet<String> {
        &self.countries
    }

    pub fn years(&self) -> Option<RangeInclusive<i32>> {
        self.years.map(|(start, end)| start..=end)
    }

    /// An empty allow-set admits nothing.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    fn admits(&self, country: &str, year: Option<i32>) -> bool {
        if !self.countries.contains(country) {
            return false;
        }
        match (self.years, year) {
            (None, _) => true,
            (Some((start, end)), Some(year)) => (start..=end).contains(&year),
            (Some(_), None) => false,
        }
    }
}

/// Running sum for one group.
#[derive(Debug, Default)]
struct Accumulator {
    sum: Decimal,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: Decimal) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        (self.sum / Decimal::from(self.count)).to_f64()
    }
}

/// A stateless calculator turning movie records into chartable averages.
#[derive(Debug, Clone, Default)]
pub struct ReportingEngine {}

impl ReportingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Averages `metric` over the records admitted by `filter`, grouped by `dimension`.
    ///
    /// Records labelled `Unknown` never take part. Rows come back sorted by
    /// country, then year, one per non-empty group. An empty allow-set yields
    /// an empty result.
    ///
    /// Profit is derived per record (`revenue - budget`) and those values are
    /// averaged; it is never computed as a difference of two means.
    pub fn aggregate(
        &self,
        records: &[MovieRecord],
        dimension: Dimension,
        metric: Metric,
        filter: &AggregationFilter,
    ) -> Vec<AggregateRow> {
        if filter.is_empty() {
            tracing::debug!(%metric, "Empty country selection, nothing to aggregate.");
            return Vec::new();
        }

        let mut groups: BTreeMap<GroupKey, Accumulator> = BTreeMap::new();
        for record in records {
            let country = normalize_label(&record.country);
            if country == UNKNOWN_COUNTRY {
                continue;
            }
            let year = record.year();
            if !filter.admits(&country, year) {
                continue;
            }

            let key = match (dimension, year) {
                (Dimension::Country, _) => GroupKey::Country { country },
                (Dimension::CountryYear, Some(year)) => GroupKey::CountryYear { country, year },
                (Dimension::CountryYear, None) => continue,
            };
            let Some(value) = metric_value(record, metric) else {
                continue;
            };
            groups.entry(key).or_default().push(value);
        }

        let rows: Vec<AggregateRow> = groups
            .into_iter()
            .filter_map(|(key, acc)| {
                acc.mean().map(|value| AggregateRow {
                    key,
                    value,
                    count: acc.count,
                })
            })
            .collect();

        tracing::debug!(
            %dimension,
            %metric,
            groups = rows.len(),
            "Aggregation complete."
        );
        rows
    }
}

/// The value of `metric` for one record, or `None` when the record has none.
pub fn metric_value(record: &MovieRecord, metric: Metric) -> Option<Decimal> {
    match metric {
        Metric::Budget => Some(record.budget),
        Metric::Revenue => Some(record.revenue),
        Metric::Profit => Some(record.profit()),
        Metric::Note => record.note.and_then(Decimal::from_f64),
        Metric::Popularity => record.popularity.and_then(Decimal::from_f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet as Set;

    fn movie(country: &str, year: Option<i32>, budget: Decimal, revenue: Decimal) -> MovieRecord {
        MovieRecord {
            title: format!("{country} {year:?}"),
            release_date: year.and_then(|y| NaiveDate::from_ymd_opt(y, 6, 1)),
            runtime: 100,
            note: Some(6.0),
            popularity: Some(10.0),
            budget,
            revenue,
            country: country.to_string(),
            poster: String::new(),
            cast: Vec::new(),
            actors: Set::new(),
        }
    }

    fn countries(rows: &[AggregateRow]) -> Vec<&str> {
        rows.iter().map(|r| r.key.country()).collect()
    }

    #[test]
    fn averages_profit_per_country() {
        let records = vec![
            movie("France", Some(2000), dec!(100), dec!(150)),
            movie("France", Some(2001), dec!(200), dec!(100)),
        ];
        let rows = ReportingEngine::new().aggregate(
            &records,
            Dimension::Country,
            Metric::Profit,
            &AggregationFilter::new(["France"]),
        );
        assert_eq!(
            rows,
            vec![AggregateRow {
                key: GroupKey::Country { country: "France".into() },
                value: -25.0,
                count: 2,
            }]
        );
    }

    #[test]
    fn excludes_unknown_even_when_selected() {
        let records = vec![
            movie("Unknown", Some(2000), dec!(1), dec!(1)),
            movie("Japon", Some(2000), dec!(10), dec!(20)),
        ];
        let rows = ReportingEngine::new().aggregate(
            &records,
            Dimension::Country,
            Metric::Budget,
            &AggregationFilter::new(["Unknown", "Japon"]),
        );
        assert_eq!(countries(&rows), vec!["Japon"]);
    }

    #[test]
    fn unselected_countries_never_leak_into_means() {
        let records = vec![
            movie("France", Some(2000), dec!(100), dec!(0)),
            movie("Italie", Some(2000), dec!(900), dec!(0)),
        ];
        let rows = ReportingEngine::new().aggregate(
            &records,
            Dimension::Country,
            Metric::Budget,
            &AggregationFilter::new(["France"]),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, 100.0);
    }

    #[test]
    fn groups_by_country_and_year_in_order() {
        let records = vec![
            movie("France", Some(2002), dec!(30), dec!(0)),
            movie("Allemagne", Some(2001), dec!(10), dec!(0)),
            movie("France", Some(2001), dec!(20), dec!(0)),
            movie("France", Some(2001), dec!(40), dec!(0)),
        ];
        let rows = ReportingEngine::new().aggregate(
            &records,
            Dimension::CountryYear,
            Metric::Budget,
            &AggregationFilter::new(["France", "Allemagne"]),
        );
        let keys: Vec<_> = rows.iter().map(|r| (r.key.country(), r.key.year(), r.value)).collect();
        assert_eq!(
            keys,
            vec![
                ("Allemagne", Some(2001), 10.0),
                ("France", Some(2001), 30.0),
                ("France", Some(2002), 30.0),
            ]
        );
    }

    #[test]
    fn year_range_is_inclusive() {
        let records = vec![
            movie("France", Some(1999), dec!(1), dec!(0)),
            movie("France", Some(2000), dec!(2), dec!(0)),
            movie("France", Some(2005), dec!(3), dec!(0)),
            movie("France", Some(2006), dec!(4), dec!(0)),
            movie("France", None, dec!(5), dec!(0)),
        ];
        let filter = AggregationFilter::new(["France"]).with_years(2000..=2005);
        let engine = ReportingEngine::new();
        let rows = engine.aggregate(&records, Dimension::CountryYear, Metric::Budget, &filter);
        let years: Vec<_> = rows.iter().filter_map(|r| r.key.year()).collect();
        assert_eq!(years, vec![2000, 2005]);

        // Undated records are dropped as soon as a year range applies.
        let rows = engine.aggregate(&records, Dimension::Country, Metric::Budget, &filter);
        assert_eq!(rows[0].count, 2);
    }

    #[test]
    fn reversed_year_range_is_swapped() {
        let filter = AggregationFilter::new(["France"]).with_years(2005..=2000);
        assert_eq!(filter.years(), Some(2000..=2005));
    }

    #[test]
    fn empty_selection_yields_no_rows() {
        let records = vec![movie("France", Some(2000), dec!(1), dec!(2))];
        let filter = AggregationFilter::new(Vec::<String>::new());
        assert!(filter.is_empty());
        let engine = ReportingEngine::new();
        let rows = engine.aggregate(&records, Dimension::Country, Metric::Revenue, &filter);
        assert!(rows.is_empty());
    }

    #[test]
    fn labels_are_folded_before_grouping() {
        let records = vec![
            movie("C\u{f4}te d'Ivoire", Some(2000), dec!(10), dec!(0)),
            movie("Co\u{302}te d'Ivoire", Some(2000), dec!(30), dec!(0)),
        ];
        let rows = ReportingEngine::new().aggregate(
            &records,
            Dimension::Country,
            Metric::Budget,
            &AggregationFilter::new(["Côte d'Ivoire"]),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key.country(), "Cote d'Ivoire");
        assert_eq!(rows[0].value, 20.0);
    }

    #[test]
    fn records_without_popularity_are_skipped() {
        let mut silent = movie("France", Some(2000), dec!(0), dec!(0));
        silent.popularity = None;
        let mut only_silent = movie("Japon", Some(2000), dec!(0), dec!(0));
        only_silent.popularity = None;
        let records = vec![silent, movie("France", Some(2000), dec!(0), dec!(0)), only_silent];

        let rows = ReportingEngine::new().aggregate(
            &records,
            Dimension::Country,
            Metric::Popularity,
            &AggregationFilter::new(["France", "Japon"]),
        );
        // Japon has no value at all, so its group is omitted rather than zeroed.
        assert_eq!(countries(&rows), vec!["France"]);
        assert_eq!(rows[0].count, 1);
        assert_eq!(rows[0].value, 10.0);
    }

    #[test]
    fn note_is_averaged() {
        let mut a = movie("France", Some(2000), dec!(0), dec!(0));
        a.note = Some(7.5);
        let mut b = movie("France", Some(2000), dec!(0), dec!(0));
        b.note = Some(6.5);
        let rows = ReportingEngine::new().aggregate(
            &[a, b],
            Dimension::Country,
            Metric::Note,
            &AggregationFilter::new(["France"]),
        );
        assert_eq!(rows[0].value, 7.0);
    }

    #[test]
    fn records_without_a_note_are_skipped() {
        let rated = movie("France", Some(2000), dec!(0), dec!(0));
        let mut unrated = movie("France", Some(2001), dec!(0), dec!(0));
        unrated.note = None;
        let mut only_unrated = movie("Japon", Some(2000), dec!(0), dec!(0));
        only_unrated.note = None;

        let rows = ReportingEngine::new().aggregate(
            &[rated, unrated, only_unrated],
            Dimension::Country,
            Metric::Note,
            &AggregationFilter::new(["France", "Japon"]),
        );
        assert_eq!(countries(&rows), vec!["France"]);
        assert_eq!(rows[0].count, 1);
        assert_eq!(rows[0].value, 6.0);
    }
}
