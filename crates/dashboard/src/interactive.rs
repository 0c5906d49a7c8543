//! The `browse` mode: a menu-driven terminal session over the dashboard pages.

use crate::error::DashboardError;
use crate::navigation::{NavEvent, Navigation, View, next};
use crate::pages::{Dashboard, EvolutionRequest};
use crate::render;
use core_types::Metric;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};

/// Runs the interactive session until the user leaves the menu.
pub fn browse(dashboard: &Dashboard) -> Result<(), DashboardError> {
    let theme = ColorfulTheme::default();
    let mut current = View::Home;
    show(dashboard, &theme, current)?;

    loop {
        let event = menu(&theme, current)?;
        match next(current, event) {
            Navigation::Exit => break,
            Navigation::Show(view) => {
                current = view;
                tracing::debug!(page = view.title(), "Opening page.");
                if let Err(e) = show(dashboard, &theme, view) {
                    match e {
                        DashboardError::Dialog(_) => return Err(e),
                        other => println!("{other}"),
                    }
                }
            }
        }
    }
    Ok(())
}

fn menu(theme: &ColorfulTheme, current: View) -> Result<NavEvent, DashboardError> {
    let mut items: Vec<&str> = View::ALL.iter().map(|v| v.title()).collect();
    items.push("Quit");

    let choice = Select::with_theme(theme)
        .with_prompt("Menu")
        .items(&items)
        .default(current.index())
        .interact_opt()?;

    Ok(match choice {
        Some(index) if index < View::ALL.len() => NavEvent::MenuIndex(index),
        _ => NavEvent::Quit,
    })
}

fn show(dashboard: &Dashboard, theme: &ColorfulTheme, view: View) -> Result<(), DashboardError> {
    let image_base = dashboard.settings().image_base_url.as_str();
    match view {
        View::Home => println!("{}", render::render_home(&dashboard.home())),
        View::MovieDetails => {
            if let Some(title) = pick_title(dashboard, theme)? {
                println!("{}", render::render_movie(&dashboard.movie(&title)?, image_base));
            }
        }
        View::Actors => {
            if let Some(name) = pick_actor(dashboard, theme)? {
                println!("{}", render::render_actor(&dashboard.actor(&name)?, image_base));
            }
        }
        View::Averages => {
            let countries = pick_countries(dashboard, theme, &[])?;
            let metric = pick_metric(theme, &Metric::ALL, dashboard.settings().default_metric)?;
            println!("{}", render::render_averages(&dashboard.averages(&countries, metric)?));
        }
        View::BudgetEvolution => {
            let span = dashboard.year_span().ok_or(DashboardError::NoYears)?;
            let years: Vec<i32> = (span.from..=span.to).collect();
            let from = pick_year(theme, "First year", &years, 0)?;
            let to = pick_year(theme, "Last year", &years, years.len() - 1)?;
            let countries = pick_countries(dashboard, theme, &dashboard.default_countries())?;
            let metric = pick_metric(theme, &Metric::FINANCIAL, Metric::Budget)?;

            let page = dashboard.evolution(EvolutionRequest {
                countries: Some(countries),
                metric: Some(metric),
                from: Some(from),
                to: Some(to),
            })?;
            println!("{}", render::render_evolution(&page));
        }
    }
    Ok(())
}

fn pick_title(
    dashboard: &Dashboard,
    theme: &ColorfulTheme,
) -> Result<Option<String>, DashboardError> {
    let query: String = Input::with_theme(theme)
        .with_prompt("Search a movie")
        .allow_empty(true)
        .interact_text()?;

    let titles = dashboard.titles(&query);
    if titles.is_empty() {
        println!("No movie matches '{query}'.");
        return Ok(None);
    }
    let choice = Select::with_theme(theme)
        .with_prompt("Choose a movie")
        .items(&titles)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| titles[i].to_string()))
}

fn pick_actor(
    dashboard: &Dashboard,
    theme: &ColorfulTheme,
) -> Result<Option<String>, DashboardError> {
    let query: String = Input::with_theme(theme)
        .with_prompt("Search an actor")
        .allow_empty(true)
        .interact_text()?;

    let listing = dashboard.actor_listing(&query, None);
    println!("There are {} actors in the database.", listing.total);
    if listing.matches.is_empty() {
        println!("No actor matches '{query}'.");
        return Ok(None);
    }
    let choice = Select::with_theme(theme)
        .with_prompt("Choose an actor")
        .items(&listing.matches)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| listing.matches[i].clone()))
}

/// Asks for countries until the selection fits the configured limit.
fn pick_countries(
    dashboard: &Dashboard,
    theme: &ColorfulTheme,
    preselected: &[String],
) -> Result<Vec<String>, DashboardError> {
    let countries = dashboard.countries();
    let defaults: Vec<bool> = countries.iter().map(|c| preselected.contains(c)).collect();
    let max = dashboard.settings().max_selections;

    loop {
        let chosen = MultiSelect::with_theme(theme)
            .with_prompt(format!("Choose up to {max} countries"))
            .items(&countries)
            .defaults(&defaults)
            .interact()?;
        if chosen.len() <= max {
            return Ok(chosen.into_iter().map(|i| countries[i].clone()).collect());
        }
        println!("You can select at most {max} countries, got {}.", chosen.len());
    }
}

fn pick_metric(
    theme: &ColorfulTheme,
    offered: &[Metric],
    default: Metric,
) -> Result<Metric, DashboardError> {
    let names: Vec<&str> = offered.iter().map(|m| m.name()).collect();
    let start = offered.iter().position(|m| *m == default).unwrap_or(0);
    let choice = Select::with_theme(theme)
        .with_prompt("Metric")
        .items(&names)
        .default(start)
        .interact()?;
    Ok(offered[choice])
}

fn pick_year(
    theme: &ColorfulTheme,
    prompt: &str,
    years: &[i32],
    default: usize,
) -> Result<i32, DashboardError> {
    let choice = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(years)
        .default(default)
        .max_length(15)
        .interact()?;
    Ok(years[choice])
}
