use anyhow::{Context, Result, anyhow, bail};
use phim_admin::CatalogApi;
use phim_admin::domains::editor::{DraftAction, MovieEditor, ReferenceLists};
use phim_admin::domains::forms::MovieForm;
use phim_admin::domains::library::MovieListState;
use phim_model::{RecordId, payload};
use serde_json::Value;
use tracing::{info, warn};

use super::{confirm, form_failure, id_inputs, read_json, resolve_reference};
use crate::cli::MovieAction;
use crate::cli::output::{print_movie, print_movie_page, print_save_report};

pub async fn run<A>(api: &A, action: MovieAction) -> Result<()>
where
    A: CatalogApi + ?Sized,
{
    match action {
        MovieAction::List { page } => {
            let mut state = MovieListState::default();
            if !state.load(api, page).await? {
                bail!("the catalog reported page {page} as unsuccessful");
            }
            print_movie_page(&state);
        }
        MovieAction::Show { slug, json } => {
            let mut editor = MovieEditor::new(ReferenceLists::default());
            editor.load(api.get_movie(&slug).await?);
            if json {
                println!("{}", serde_json::to_string_pretty(editor.draft())?);
            } else {
                print_movie(editor.draft(), editor.activity());
            }
        }
        MovieAction::Create { file } => {
            let value = read_json(&file)?;
            let value = single_draft(value)?;
            let draft = payload::movie_draft(&value).with_context(|| {
                format!("invalid movie in {}", file.display())
            })?;

            let mut form = MovieForm::open(api).await?;
            form.apply(DraftAction::Load(draft));
            let toggles = reference_toggles(form.references(), &value)?;
            form.apply_all(toggles);

            if let Err(err) = form.submit(api).await {
                return Err(form_failure(&form.errors, err));
            }
            if let Some(message) = form.success {
                println!("{message}");
            }
        }
        MovieAction::Edit {
            slug,
            actions,
            toggle_category,
            toggle_country,
            dry_run,
        } => {
            let mut editor = MovieEditor::open(api, &slug).await?;

            let mut script: Vec<DraftAction> = match actions {
                Some(path) => serde_json::from_value(read_json(&path)?)
                    .with_context(|| {
                        format!("invalid draft actions in {}", path.display())
                    })?,
                None => Vec::new(),
            };
            let refs = editor.references();
            for input in &toggle_category {
                let id = resolve_reference(&refs.categories, input)?;
                script.push(DraftAction::ToggleCategory(id));
            }
            for input in &toggle_country {
                let id = resolve_reference(&refs.countries, input)?;
                script.push(DraftAction::ToggleCountry(id));
            }
            editor.apply_all(script);

            if dry_run {
                println!("{}", serde_json::to_string_pretty(editor.draft())?);
                return Ok(());
            }

            info!(
                slug = %slug,
                unsaved = editor.draft().unsaved_episode_count(),
                "saving movie"
            );
            match editor.save(api).await {
                Ok(report) => print_save_report(&report),
                Err(err) => {
                    for episode in &err.created {
                        if let Some(id) = &episode.id {
                            warn!(
                                episode_id = %id,
                                slug = %episode.slug,
                                "episode was created before the save failed"
                            );
                        }
                    }
                    return Err(anyhow!(err).context(format!(
                        "failed to update movie `{slug}`"
                    )));
                }
            }
        }
        MovieAction::Delete { id, yes } => {
            let id: RecordId = id.parse().map_err(|e: String| anyhow!(e))?;
            if !confirm(&format!("Delete movie {id}?"), yes)? {
                println!("Aborted");
                return Ok(());
            }
            api.delete_movie(&id).await?;
            println!("Movie {id} deleted");
        }
    }
    Ok(())
}

/// The create endpoint takes an array; a file may hold the bare object or a
/// one-element array.
fn single_draft(value: Value) -> Result<Value> {
    match value {
        Value::Array(mut items) if items.len() == 1 => Ok(items.remove(0)),
        Value::Array(items) => {
            bail!("expected exactly one movie, found {}", items.len())
        }
        other => Ok(other),
    }
}

/// `categoryIds` / `countryIds` of a create file, resolved into toggles.
fn reference_toggles(
    refs: &ReferenceLists,
    value: &Value,
) -> Result<Vec<DraftAction>> {
    let mut toggles = Vec::new();
    for input in id_inputs(value, "categoryIds") {
        let id = resolve_reference(&refs.categories, &input)?;
        toggles.push(DraftAction::ToggleCategory(id));
    }
    for input in id_inputs(value, "countryIds") {
        let id = resolve_reference(&refs.countries, &input)?;
        toggles.push(DraftAction::ToggleCountry(id));
    }
    Ok(toggles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_draft_unwraps_one_element_arrays() {
        let value = single_draft(json!([{"name": "x"}])).unwrap();
        assert_eq!(value, json!({"name": "x"}));
        assert!(single_draft(json!([{}, {}])).is_err());
        assert_eq!(single_draft(json!({"a": 1})).unwrap(), json!({"a": 1}));
    }
}
