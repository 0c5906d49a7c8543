use crate::error::DatasetError;
use crate::literal::{Literal, parse_literal};
use core_types::CastEntry;
use std::collections::BTreeSet;

/// Decodes a serialized cast column into ordered `CastEntry` values.
///
/// The text must be a list (or tuple) of dicts, each with a string `name`.
/// `character` defaults to an empty string and `profile_path` to `None`.
/// Any other key is ignored. A blank cell decodes to an empty cast.
pub fn parse_cast(raw: &str) -> Result<Vec<CastEntry>, DatasetError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value = parse_literal(raw).map_err(DatasetError::cast)?;
    let items = match &value {
        Literal::List(items) | Literal::Tuple(items) => items,
        other => {
            return Err(DatasetError::MalformedCastData(format!(
                "expected a list of records, found a {}",
                other.type_name()
            )));
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| cast_entry(index, item))
        .collect()
}

fn cast_entry(index: usize, item: &Literal) -> Result<CastEntry, DatasetError> {
    if !matches!(item, Literal::Dict(_)) {
        return Err(DatasetError::MalformedCastData(format!(
            "entry {index} is a {}, not a record",
            item.type_name()
        )));
    }

    let name = match item.get("name") {
        Some(Literal::Str(name)) => name.clone(),
        Some(other) => {
            return Err(DatasetError::MalformedCastData(format!(
                "entry {index} has a {} name",
                other.type_name()
            )));
        }
        None => {
            return Err(DatasetError::MalformedCastData(format!(
                "entry {index} is missing the 'name' field"
            )));
        }
    };

    let character = item
        .get("character")
        .and_then(Literal::as_str)
        .unwrap_or_default()
        .to_string();
    let profile_path = item
        .get("profile_path")
        .and_then(Literal::as_str)
        .map(str::to_string);

    Ok(CastEntry {
        name,
        character,
        profile_path,
    })
}

/// Decodes a serialized set of actor names (`{'A', 'B'}`, `set()`, or a list).
pub fn parse_actor_set(raw: &str) -> Result<BTreeSet<String>, DatasetError> {
    if raw.trim().is_empty() {
        return Ok(BTreeSet::new());
    }

    let value = parse_literal(raw).map_err(DatasetError::actor_set)?;
    let items = value.as_sequence().ok_or_else(|| {
        DatasetError::MalformedActorSet(format!(
            "expected a set of names, found a {}",
            value.type_name()
        ))
    })?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                DatasetError::MalformedActorSet(format!(
                    "expected a name, found a {}",
                    item.type_name()
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_single_entry() {
        let cast = parse_cast("[{'name': 'A', 'character': 'B', 'profile_path': 'x'}]").unwrap();
        assert_eq!(
            cast,
            vec![CastEntry {
                name: "A".to_string(),
                character: "B".to_string(),
                profile_path: Some("x".to_string()),
            }]
        );
    }

    #[test]
    fn keeps_cast_order_and_ignores_extra_keys() {
        let raw = "[{'cast_id': 4, 'name': 'Zoe', 'character': 'Lead', 'profile_path': None}, \
                   {'name': 'Adam', 'gender': 2}]";
        let cast = parse_cast(raw).unwrap();
        assert_eq!(cast.len(), 2);
        assert_eq!(cast[0].name, "Zoe");
        assert_eq!(cast[0].profile_path, None);
        assert_eq!(cast[1].name, "Adam");
        assert_eq!(cast[1].character, "");
    }

    #[test]
    fn rejects_text_that_is_not_a_list() {
        let err = parse_cast("not a list").unwrap_err();
        assert!(matches!(err, DatasetError::MalformedCastData(_)));

        let err = parse_cast("{'name': 'A'}").unwrap_err();
        assert!(matches!(err, DatasetError::MalformedCastData(_)));
    }

    #[test]
    fn rejects_entries_without_a_name() {
        let err = parse_cast("[{'name': 'A'}, {'character': 'B'}]").unwrap_err();
        match err {
            DatasetError::MalformedCastData(reason) => assert!(reason.contains("entry 1")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_record_entries() {
        assert!(parse_cast("['A', 'B']").is_err());
        assert!(parse_cast("[{'name': None}]").is_err());
    }

    #[test]
    fn blank_cast_cell_is_empty() {
        assert!(parse_cast("  ").unwrap().is_empty());
        assert!(parse_cast("[]").unwrap().is_empty());
    }

    #[test]
    fn parses_actor_sets() {
        let actors = parse_actor_set(r#"{'Jean Reno', "Conan O'Brien"}"#).unwrap();
        assert_eq!(
            actors.into_iter().collect::<Vec<_>>(),
            vec!["Conan O'Brien".to_string(), "Jean Reno".to_string()]
        );
        assert!(parse_actor_set("set()").unwrap().is_empty());
        assert_eq!(parse_actor_set("['A', 'A']").unwrap().len(), 1);
    }

    #[test]
    fn rejects_malformed_actor_sets() {
        assert!(matches!(
            parse_actor_set("{'A': 1}"),
            Err(DatasetError::MalformedActorSet(_))
        ));
        assert!(matches!(
            parse_actor_set("{1, 2}"),
            Err(DatasetError::MalformedActorSet(_))
        ));
    }

    #[test]
    fn deeply_nested_cells_are_malformed() {
        let err = parse_cast(&"[".repeat(100_000)).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedCastData(_)));

        let err = parse_actor_set(&"{".repeat(100_000)).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedActorSet(_)));
    }
}
