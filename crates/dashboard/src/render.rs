//! Terminal rendering of the dashboard pages.
//!
//! Every function returns the page as a `String` so callers decide where it goes.

use crate::error::DashboardError;
use crate::pages::{ActorListing, AveragesPage, EvolutionPage, HomePage};
use analytics::{
    ActorProfile, MovieDetails, ProfitTone, format_amount, image_url, series_by_country,
};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use core_types::Metric;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Serialize;
use std::collections::BTreeSet;

/// Width of the longest bar in a bar chart, in characters.
const BAR_WIDTH: usize = 40;

fn table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Serializes any page for `--json` output.
pub fn to_json<T: Serialize + ?Sized>(page: &T) -> Result<String, DashboardError> {
    Ok(serde_json::to_string_pretty(page)?)
}

/// Renders `page` as JSON or with its table renderer.
pub fn emit<T: Serialize + ?Sized>(
    page: &T,
    json: bool,
    table: impl FnOnce(&T) -> String,
) -> Result<String, DashboardError> {
    if json {
        to_json(page)
    } else {
        Ok(table(page))
    }
}

/// Formats an averaged value the way its metric is read: whole currency
/// units for money, two decimals otherwise.
pub fn format_metric_value(metric: Metric, value: f64) -> String {
    if metric.is_financial() {
        match Decimal::from_f64(value) {
            Some(amount) => format!("$ {}", format_amount(amount)),
            None => value.to_string(),
        }
    } else {
        format!("{value:.2}")
    }
}

/// A horizontal bar proportional to `value / max`. Negative values are drawn
/// with a lighter shade.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let len = ((value.abs() / max) * width as f64).round() as usize;
    let glyph = if value < 0.0 { "░" } else { "█" };
    glyph.repeat(len.min(width))
}

pub fn render_home(page: &HomePage) -> String {
    let summary = &page.summary;
    let mut table = table();
    table.set_header(vec!["Dataset", "Value"]);
    table.add_row(vec!["Source".to_string(), page.source.clone()]);
    table.add_row(vec!["Movies".to_string(), summary.movies.to_string()]);
    table.add_row(vec!["Countries".to_string(), summary.countries.to_string()]);
    table.add_row(vec!["Actors".to_string(), summary.actors.to_string()]);
    if let (Some(first), Some(last)) = (summary.first_year, summary.last_year) {
        table.add_row(vec!["Years".to_string(), format!("{first} - {last}")]);
    }

    format!(
        "Welcome to marquee\nA few charts about the movies of the TMDb database.\n\n{table}"
    )
}

pub fn render_movie(details: &MovieDetails, image_base_url: &str) -> String {
    let mut facts = table();
    facts.set_header(vec!["Movie", details.title.as_str()]);
    facts.add_row(vec!["Poster", details.poster.as_str()]);
    facts.add_row(vec![
        "Note".to_string(),
        details
            .note
            .map(|note| format!("{note}/10"))
            .unwrap_or_else(|| "unknown".to_string()),
    ]);
    facts.add_row(vec![
        "Release date".to_string(),
        details
            .release_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    ]);
    facts.add_row(vec!["Runtime".to_string(), format!("{} minutes", details.runtime)]);
    facts.add_row(vec!["Budget".to_string(), format!("$ {}", format_amount(details.budget))]);
    facts.add_row(vec!["Revenue".to_string(), format!("$ {}", format_amount(details.revenue))]);

    let profit_color = match details.tone {
        ProfitTone::Gain => Color::Green,
        ProfitTone::Loss => Color::Red,
    };
    facts.add_row(vec![
        Cell::new("Profit"),
        Cell::new(format!("$ {}", format_amount(details.profit)))
            .fg(profit_color)
            .add_attribute(Attribute::Bold),
    ]);

    let mut cast = table();
    cast.set_header(vec!["Actor", "Role", "Picture"]);
    for entry in &details.cast {
        cast.add_row(vec![
            entry.name.clone(),
            entry.character.clone(),
            entry
                .profile_path
                .as_deref()
                .map(|path| image_url(image_base_url, path))
                .unwrap_or_default(),
        ]);
    }

    format!("{facts}\n\nCast\n{cast}")
}

pub fn render_titles(titles: &[&str]) -> String {
    let mut table = table();
    table.set_header(vec!["Title"]);
    for title in titles {
        table.add_row(vec![*title]);
    }
    table.to_string()
}

pub fn render_actor_listing(listing: &ActorListing) -> String {
    let mut table = table();
    table.set_header(vec!["Actor"]);
    for name in &listing.matches {
        table.add_row(vec![name.as_str()]);
    }
    format!(
        "There are {} actors in the database.\n{} match(es) for '{}'\n{table}",
        format_amount(Decimal::from(listing.total)),
        listing.matches.len(),
        listing.query
    )
}

pub fn render_actor(profile: &ActorProfile, image_base_url: &str) -> String {
    let mut card = table();
    card.set_header(vec!["Name", profile.name.as_str()]);
    card.add_row(vec![
        "Picture".to_string(),
        profile
            .profile_path
            .as_deref()
            .map(|path| image_url(image_base_url, path))
            .unwrap_or_else(|| "none".to_string()),
    ]);

    let mut films = table();
    films.set_header(vec!["Film"]);
    for title in &profile.films {
        films.add_row(vec![title.as_str()]);
    }

    format!(
        "{card}\n\n{} played in {} film(s):\n{films}",
        profile.name,
        profile.films.len()
    )
}

/// Bar chart of the average per country.
pub fn render_averages(page: &AveragesPage) -> String {
    if page.rows.is_empty() {
        return format!("Average {} by country: select at least one country.", page.metric);
    }

    let max = page.rows.iter().map(|r| r.value.abs()).fold(0.0, f64::max);
    let mut table = table();
    table.set_header(vec!["Country", page.metric.name(), "Movies", ""]);
    for row in &page.rows {
        table.add_row(vec![
            Cell::new(row.key.country()),
            Cell::new(format_metric_value(page.metric, row.value))
                .set_alignment(CellAlignment::Right),
            Cell::new(row.count).set_alignment(CellAlignment::Right),
            Cell::new(bar(row.value, max, BAR_WIDTH)),
        ]);
    }

    format!("Average {} by country\n{table}", page.metric)
}

/// One column per country, one row per year: the data behind the line chart.
pub fn render_evolution(page: &EvolutionPage) -> String {
    let title = format!(
        "Average {} per year, {} - {}",
        page.metric, page.years.from, page.years.to
    );
    if page.rows.is_empty() {
        return format!("{title}: no data for the selected countries.");
    }

    let series = series_by_country(&page.rows);
    let years: BTreeSet<i32> = page.rows.iter().filter_map(|r| r.key.year()).collect();

    let mut table = table();
    let mut header = vec![Cell::new("Year")];
    header.extend(series.keys().map(Cell::new));
    table.set_header(header);

    for year in years {
        let mut row = vec![Cell::new(year)];
        for points in series.values() {
            let value = points
                .iter()
                .find(|(y, _)| *y == year)
                .map(|(_, v)| format_metric_value(page.metric, *v))
                .unwrap_or_else(|| "-".to_string());
            row.push(Cell::new(value).set_alignment(CellAlignment::Right));
        }
        table.add_row(row);
    }

    format!("{title}\n{table}")
}
