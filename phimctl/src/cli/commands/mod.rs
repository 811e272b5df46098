pub mod episodes;
pub mod movies;
pub mod references;

use std::path::Path;

use anyhow::{Context, Result, bail};
use dialoguer::{Confirm, console::Term};
use phim_admin::AdminError;
use phim_model::{RecordId, Reference};
use serde_json::Value;

/// Asks before a destructive step unless `--yes` was given.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact_on(&Term::stderr())?;
    Ok(confirmed)
}

pub fn read_json(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Finds the id in `records` that the operator typed. Ids are matched on
/// their printed form, so `3` selects a numeric `3` as well as a text `"3"`.
pub fn resolve_reference<R: Reference>(
    records: &[R],
    input: &str,
) -> Result<RecordId> {
    let input = input.trim();
    match records.iter().find(|r| r.id().to_string() == input) {
        Some(record) => Ok(record.id().clone()),
        None => bail!("unknown {} id `{input}`", R::KIND),
    }
}

/// Surfaces form errors collected during a failed submit.
pub fn form_failure(errors: &[String], err: AdminError) -> anyhow::Error {
    match errors.first() {
        Some(message) => anyhow::Error::new(err).context(message.clone()),
        None => err.into(),
    }
}

/// Ids listed under `key` in a JSON object, as the operator would type them.
pub fn id_inputs(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .map(|id| match id {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use phim_model::Category;
    use serde_json::json;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: RecordId::from(3),
                name: "Hai".into(),
                slug: None,
            },
            Category {
                id: RecordId::from("kinh-di"),
                name: "Kinh di".into(),
                slug: None,
            },
        ]
    }

    #[test]
    fn typed_ids_resolve_against_the_list() {
        assert_eq!(
            resolve_reference(&categories(), "3").unwrap(),
            RecordId::from(3)
        );
        assert_eq!(
            resolve_reference(&categories(), " kinh-di ").unwrap(),
            RecordId::from("kinh-di")
        );
        assert!(resolve_reference(&categories(), "9").is_err());
    }

    #[test]
    fn id_inputs_accept_numbers_and_text() {
        let value = json!({"categoryIds": [3, "kinh-di"]});
        assert_eq!(id_inputs(&value, "categoryIds"), ["3", "kinh-di"]);
        assert!(id_inputs(&value, "countryIds").is_empty());
    }
}
