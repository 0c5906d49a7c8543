use crate::actors::actor_index;
use crate::error::AnalyticsError;
use crate::normalize::{normalize_label, search_key};
use crate::report::{DatasetSummary, MovieDetails, ProfitTone};
use core_types::{MovieRecord, UNKNOWN_COUNTRY};
use std::collections::{BTreeSet, HashSet};

/// Titles in first-seen order, without duplicates.
pub fn unique_titles(records: &[MovieRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|record| record.title.as_str())
        .filter(|title| seen.insert(*title))
        .collect()
}

/// Titles containing `query`, ignoring case and accents, first-seen order.
pub fn search_titles<'a>(records: &'a [MovieRecord], query: &str, limit: usize) -> Vec<&'a str> {
    let needle = search_key(query.trim());
    unique_titles(records)
        .into_iter()
        .filter(|title| needle.is_empty() || search_key(title).contains(&needle))
        .take(limit)
        .collect()
}

/// Folded country labels that can be selected on the chart pages, sorted.
pub fn countries(records: &[MovieRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| normalize_label(&record.country))
        .filter(|country| country != UNKNOWN_COUNTRY)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct release years, ascending.
pub fn years(records: &[MovieRecord]) -> Vec<i32> {
    records
        .iter()
        .filter_map(MovieRecord::year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn summarize(records: &[MovieRecord]) -> DatasetSummary {
    let years = years(records);
    DatasetSummary {
        movies: records.len(),
        countries: countries(records).len(),
        actors: actor_index(records).len(),
        first_year: years.first().copied(),
        last_year: years.last().copied(),
    }
}

/// The details page for the first movie titled `title`.
pub fn movie_details(records: &[MovieRecord], title: &str) -> Result<MovieDetails, AnalyticsError> {
    let record = records
        .iter()
        .find(|record| record.title == title)
        .ok_or_else(|| AnalyticsError::TitleNotFound(title.to_string()))?;

    let profit = record.profit();
    Ok(MovieDetails {
        title: record.title.clone(),
        poster: record.poster.clone(),
        note: record.note,
        release_date: record.release_date,
        runtime: record.runtime,
        budget: record.budget,
        revenue: record.revenue,
        profit,
        tone: ProfitTone::of(profit),
        cast: record.cast.clone(),
    })
}
