use crate::error::DashboardError;
use analytics::{
    ActorProfile, AggregateRow, AggregationFilter, DatasetSummary, MovieDetails, ReportingEngine,
    normalize_label,
};
use configuration::DashboardSettings;
use core_types::{Dimension, Metric};
use dataset::Dataset;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub source: String,
    pub summary: DatasetSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActorListing {
    /// Number of distinct actors in the dataset.
    pub total: usize,
    pub query: String,
    pub matches: Vec<String>,
}

/// An inclusive range of release years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearSpan {
    pub from: i32,
    pub to: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AveragesPage {
    pub metric: Metric,
    pub countries: Vec<String>,
    pub rows: Vec<AggregateRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvolutionPage {
    pub metric: Metric,
    pub years: YearSpan,
    pub countries: Vec<String>,
    pub rows: Vec<AggregateRow>,
}

/// Parameters of the budget evolution page. `None` fields take their defaults.
#[derive(Debug, Clone, Default)]
pub struct EvolutionRequest {
    pub countries: Option<Vec<String>>,
    pub metric: Option<Metric>,
    pub from: Option<i32>,
    pub to: Option<i32>,
}

/// The pages of the dashboard, computed over one shared dataset.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    settings: DashboardSettings,
    engine: ReportingEngine,
}

impl Dashboard {
    pub fn new(dataset: Dataset, settings: DashboardSettings) -> Self {
        Self {
            dataset,
            settings,
            engine: ReportingEngine::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn home(&self) -> HomePage {
        HomePage {
            source: self.dataset.source().to_string(),
            summary: analytics::summarize(self.dataset.records()),
        }
    }

    pub fn movie(&self, title: &str) -> Result<MovieDetails, DashboardError> {
        Ok(analytics::movie_details(self.dataset.records(), title)?)
    }

    pub fn titles(&self, query: &str) -> Vec<&str> {
        analytics::search_titles(self.dataset.records(), query, self.settings.search_limit)
    }

    /// Actors matching `query`, at most `limit` of them (the configured
    /// search limit when `None`).
    pub fn actor_listing(&self, query: &str, limit: Option<usize>) -> ActorListing {
        let index = analytics::actor_index(self.dataset.records());
        let limit = limit.unwrap_or(self.settings.search_limit);
        let matches = analytics::search_actors(&index, query, limit)
            .into_iter()
            .map(str::to_string)
            .collect();
        ActorListing {
            total: index.len(),
            query: query.to_string(),
            matches,
        }
    }

    pub fn actor(&self, name: &str) -> Result<ActorProfile, DashboardError> {
        Ok(analytics::actor_profile(self.dataset.records(), name)?)
    }

    /// Countries selectable on the chart pages.
    pub fn countries(&self) -> Vec<String> {
        analytics::countries(self.dataset.records())
    }

    /// First and last release year of the dataset.
    pub fn year_span(&self) -> Option<YearSpan> {
        let years = analytics::years(self.dataset.records());
        Some(YearSpan {
            from: *years.first()?,
            to: *years.last()?,
        })
    }

    /// The configured default countries that exist in the dataset.
    pub fn default_countries(&self) -> Vec<String> {
        let known: BTreeSet<String> = self.countries().into_iter().collect();
        self.settings
            .default_countries
            .iter()
            .map(|c| normalize_label(c))
            .filter(|c| known.contains(c))
            .collect()
    }

    /// Average of `metric` per selected country.
    pub fn averages(
        &self,
        countries: &[String],
        metric: Metric,
    ) -> Result<AveragesPage, DashboardError> {
        let countries = self.validate_selection(countries)?;
        let filter = AggregationFilter::new(&countries);
        let rows = self
            .engine
            .aggregate(self.dataset.records(), Dimension::Country, metric, &filter);
        Ok(AveragesPage {
            metric,
            countries,
            rows,
        })
    }

    /// Yearly average of a currency metric per selected country.
    pub fn evolution(&self, request: EvolutionRequest) -> Result<EvolutionPage, DashboardError> {
        let metric = request.metric.unwrap_or(if self.settings.default_metric.is_financial() {
            self.settings.default_metric
        } else {
            Metric::Budget
        });
        if !metric.is_financial() {
            return Err(DashboardError::MetricNotAllowed {
                page: "budget evolution",
                metric,
                allowed: Metric::FINANCIAL.map(|m| m.name()).join(", "),
            });
        }

        let span = self.year_span().ok_or(DashboardError::NoYears)?;
        let from = request.from.unwrap_or(span.from);
        let to = request.to.unwrap_or(span.to);
        let years = YearSpan {
            from: from.min(to),
            to: from.max(to),
        };

        let countries = match request.countries {
            Some(countries) => self.validate_selection(&countries)?,
            None => self.validate_selection(&self.default_countries())?,
        };

        let filter = AggregationFilter::new(&countries).with_years(years.from..=years.to);
        let rows = self
            .engine
            .aggregate(self.dataset.records(), Dimension::CountryYear, metric, &filter);
        Ok(EvolutionPage {
            metric,
            years,
            countries,
            rows,
        })
    }

    /// Folds, deduplicates and checks a country selection against the catalog
    /// and the selection limit.
    pub fn validate_selection(&self, countries: &[String]) -> Result<Vec<String>, DashboardError> {
        let known: BTreeSet<String> = self.countries().into_iter().collect();
        let mut selected = BTreeSet::new();
        for country in countries {
            let folded = normalize_label(country.trim());
            if !known.contains(&folded) {
                return Err(DashboardError::UnknownCountry(country.clone()));
            }
            selected.insert(folded);
        }

        if selected.len() > self.settings.max_selections {
            return Err(DashboardError::TooManySelections {
                selected: selected.len(),
                max: self.settings.max_selections,
            });
        }
        if selected.is_empty() {
            tracing::debug!("No country selected; the chart will be empty.");
        }
        Ok(selected.into_iter().collect())
    }
}
