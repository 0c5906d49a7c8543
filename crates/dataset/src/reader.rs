use crate::cast::{parse_actor_set, parse_cast};
use crate::error::DatasetError;
use chrono::NaiveDate;
use core_types::{MovieRecord, UNKNOWN_COUNTRY};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;

/// One row of the exported table, before any decoding.
///
/// Every column but `Title` may be absent; extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Date", default)]
    date: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "Note", default)]
    note: String,
    #[serde(rename = "Popularity", default)]
    popularity: Option<String>,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Budget", default)]
    budget: String,
    #[serde(rename = "Revenue", default)]
    revenue: String,
    #[serde(rename = "Country_lisible", default)]
    country: String,
    #[serde(rename = "Actor_Set", default)]
    actor_set: Option<String>,
    #[serde(rename = "Cast", default)]
    cast: String,
}

/// Turns raw CSV rows into fully decoded `MovieRecord`s.
#[derive(Debug, Clone, Default)]
pub struct RowDecoder {
    unknown_country_aliases: Vec<String>,
}

impl RowDecoder {
    pub fn new(unknown_country_aliases: Vec<String>) -> Self {
        Self {
            unknown_country_aliases,
        }
    }

    /// Reads every row of a CSV table. The first malformed row aborts the read.
    pub fn read_records<R: Read>(&self, reader: R) -> Result<Vec<MovieRecord>, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut records = Vec::new();
        for (index, row) in csv_reader.deserialize::<RawRow>().enumerate() {
            let row = row?;
            let title = row.title.clone();
            let record = self.decode(row).map_err(|source| DatasetError::Record {
                record: index + 1,
                title,
                source: Box::new(source),
            })?;
            records.push(record);
        }

        tracing::debug!(count = records.len(), "Decoded movie records.");
        Ok(records)
    }

    fn decode(&self, row: RawRow) -> Result<MovieRecord, DatasetError> {
        let cast = parse_cast(&row.cast)?;
        let actors = match row.actor_set.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_actor_set(raw)?,
            _ => cast.iter().map(|entry| entry.name.clone()).collect(),
        };

        Ok(MovieRecord {
            title: row.title,
            release_date: parse_date(&row.date)?,
            runtime: parse_runtime(&row.runtime)?,
            note: parse_float("Note", &row.note)?,
            popularity: match row.popularity.as_deref() {
                Some(raw) => parse_float("Popularity", raw)?,
                None => None,
            },
            budget: parse_amount("Budget", &row.budget)?,
            revenue: parse_amount("Revenue", &row.revenue)?,
            country: self.country_label(&row.country),
            poster: row.poster.trim().to_string(),
            cast,
            actors,
        })
    }

    fn country_label(&self, raw: &str) -> String {
        let label = raw.trim();
        if label.is_empty() || self.unknown_country_aliases.iter().any(|alias| alias == label) {
            UNKNOWN_COUNTRY.to_string()
        } else {
            label.to_string()
        }
    }
}

fn invalid(column: &'static str, value: &str, reason: impl Into<String>) -> DatasetError {
    DatasetError::InvalidField {
        column,
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time component.
fn parse_date(raw: &str) -> Result<Option<NaiveDate>, DatasetError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| invalid("Date", raw, e.to_string()))
}

fn parse_float(column: &'static str, raw: &str) -> Result<Option<f64>, DatasetError> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let value = raw
        .parse::<f64>()
        .map_err(|e| invalid(column, raw, e.to_string()))?;
    if !value.is_finite() {
        return Err(invalid(column, raw, "not a finite number"));
    }
    Ok(Some(value))
}

/// Runtimes are written either as `120` or `120.0`.
fn parse_runtime(raw: &str) -> Result<u32, DatasetError> {
    match parse_float("Runtime", raw)? {
        None => Ok(0),
        Some(minutes) if (0.0..=f64::from(u32::MAX)).contains(&minutes) => {
            Ok(minutes.round() as u32)
        }
        Some(_) => Err(invalid("Runtime", raw, "out of range")),
    }
}

/// Currency cells: plain, decimal or scientific notation. Blank means unknown (0).
fn parse_amount(column: &'static str, raw: &str) -> Result<Decimal, DatasetError> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map(|amount| amount.normalize())
        .map_err(|e| invalid(column, raw, e.to_string()))
}
