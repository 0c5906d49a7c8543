use crate::error::AnalyticsError;
use crate::normalize::search_key;
use crate::report::ActorProfile;
use core_types::MovieRecord;
use std::collections::BTreeSet;

/// Every movie whose cast credits `actor_name`, in dataset order.
///
/// Fails with `ActorNotFound` rather than returning an empty list.
pub fn films_for_actor<'a>(
    records: &'a [MovieRecord],
    actor_name: &str,
) -> Result<Vec<&'a MovieRecord>, AnalyticsError> {
    let films: Vec<&MovieRecord> = records
        .iter()
        .filter(|record| record.cast_member(actor_name).is_some())
        .collect();

    if films.is_empty() {
        return Err(AnalyticsError::ActorNotFound(actor_name.to_string()));
    }
    Ok(films)
}

/// The actor's card: profile image from their first credited film, then every title.
pub fn actor_profile(
    records: &[MovieRecord],
    actor_name: &str,
) -> Result<ActorProfile, AnalyticsError> {
    let films = films_for_actor(records, actor_name)?;
    let profile_path = films
        .first()
        .and_then(|film| film.cast_member(actor_name))
        .and_then(|entry| entry.profile_path.clone());

    Ok(ActorProfile {
        name: actor_name.to_string(),
        profile_path,
        films: films.iter().map(|film| film.title.clone()).collect(),
    })
}

/// All actor names in the dataset, sorted and deduplicated.
pub fn actor_index(records: &[MovieRecord]) -> BTreeSet<&str> {
    records
        .iter()
        .flat_map(|record| record.actors.iter().map(String::as_str))
        .collect()
}

/// Names containing `query`, ignoring case and accents, in index order.
///
/// An empty query lists the first `limit` names.
pub fn search_actors<'a>(index: &BTreeSet<&'a str>, query: &str, limit: usize) -> Vec<&'a str> {
    let needle = search_key(query.trim());
    index
        .iter()
        .copied()
        .filter(|name| needle.is_empty() || search_key(name).contains(&needle))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::CastEntry;
    use rust_decimal::Decimal;

    fn movie(title: &str, cast: &[(&str, Option<&str>)]) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            release_date: None,
            runtime: 90,
            note: Some(5.0),
            popularity: None,
            budget: Decimal::ZERO,
            revenue: Decimal::ZERO,
            country: "France".to_string(),
            poster: String::new(),
            cast: cast
                .iter()
                .map(|(name, path)| CastEntry {
                    name: name.to_string(),
                    character: String::new(),
                    profile_path: path.map(str::to_string),
                })
                .collect(),
            actors: cast.iter().map(|(name, _)| name.to_string()).collect(),
        }
    }

    fn records() -> Vec<MovieRecord> {
        vec![
            movie("Léon", &[("Jean Reno", Some("/reno.jpg")), ("Natalie Portman", None)]),
            movie("Amélie", &[("Audrey Tautou", Some("/tautou.jpg"))]),
            movie("Ronin", &[("Robert De Niro", None), ("Jean Reno", Some("/reno2.jpg"))]),
        ]
    }

    #[test]
    fn films_keep_dataset_order() {
        let records = records();
        let films = films_for_actor(&records, "Jean Reno").unwrap();
        let titles: Vec<_> = films.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Léon", "Ronin"]);
    }

    #[test]
    fn unknown_actor_is_an_error() {
        let records = records();
        assert_eq!(
            films_for_actor(&records, "Jean Gabin").unwrap_err(),
            AnalyticsError::ActorNotFound("Jean Gabin".to_string())
        );
    }

    #[test]
    fn profile_uses_the_first_film_credit() {
        let records = records();
        let profile = actor_profile(&records, "Jean Reno").unwrap();
        assert_eq!(profile.profile_path.as_deref(), Some("/reno.jpg"));
        assert_eq!(profile.films, vec!["Léon", "Ronin"]);

        let profile = actor_profile(&records, "Natalie Portman").unwrap();
        assert_eq!(profile.profile_path, None);
    }

    #[test]
    fn index_is_sorted_and_unique() {
        let records = records();
        let index = actor_index(&records);
        assert_eq!(
            index.into_iter().collect::<Vec<_>>(),
            vec!["Audrey Tautou", "Jean Reno", "Natalie Portman", "Robert De Niro"]
        );
    }

    #[test]
    fn search_ignores_case_and_accents() {
        let mut records = records();
        records.push(movie("Les Choristes", &[("Gérard Jugnot", None)]));
        let index = actor_index(&records);

        assert_eq!(search_actors(&index, "gerard", 10), vec!["Gérard Jugnot"]);
        assert_eq!(search_actors(&index, "AN", 10), vec!["Jean Reno", "Natalie Portman"]);
        assert_eq!(search_actors(&index, "AN", 1), vec!["Jean Reno"]);
        assert_eq!(search_actors(&index, "", 2), vec!["Audrey Tautou", "Gérard Jugnot"]);
        assert!(search_actors(&index, "zzz", 10).is_empty());
    }
}
