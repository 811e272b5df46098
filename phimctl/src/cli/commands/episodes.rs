use anyhow::{Result, bail};
use phim_admin::CatalogApi;
use phim_admin::domains::editor::{DraftAction, MovieEditor, ReferenceLists};
use phim_admin::domains::episodes::RowOutcome;
use phim_model::EpisodeField;

use super::confirm;
use crate::cli::EpisodeAction;
use crate::cli::output::print_episodes;

pub async fn run<A>(api: &A, action: EpisodeAction) -> Result<()>
where
    A: CatalogApi + ?Sized,
{
    match action {
        EpisodeAction::List { slug } => {
            let mut editor = MovieEditor::new(ReferenceLists::default());
            editor.load(api.get_movie(&slug).await?);
            print_episodes(&editor.draft().episodes);
        }
        EpisodeAction::Add {
            slug,
            name,
            episode_slug,
            filename,
            link_embed,
            link_m3u8,
        } => {
            let mut editor = MovieEditor::new(ReferenceLists::default());
            editor.load(api.get_movie(&slug).await?);
            editor.apply(DraftAction::AddEpisode);
            let index = editor.draft().episodes.len() - 1;
            editor.apply_all(
                [
                    (EpisodeField::Name, name),
                    (EpisodeField::Slug, episode_slug),
                    (EpisodeField::Filename, filename),
                    (EpisodeField::LinkEmbed, link_embed),
                    (EpisodeField::LinkM3u8, link_m3u8),
                ]
                .into_iter()
                .map(|(field, value)| {
                    DraftAction::SetEpisodeField(index, field, value)
                }),
            );

            editor.create_episode(api, index).await?;
            println!("Episode added");
            print_episodes(&editor.draft().episodes);
        }
        EpisodeAction::Remove { slug, id, yes } => {
            let mut editor = MovieEditor::new(ReferenceLists::default());
            editor.load(api.get_movie(&slug).await?);
            let Some(index) = editor.draft().episodes.iter().position(|ep| {
                ep.id.as_ref().is_some_and(|ep_id| ep_id.to_string() == id)
            }) else {
                bail!("movie `{slug}` has no episode with id `{id}`");
            };

            if !confirm(&format!("Delete episode {id} of `{slug}`?"), yes)? {
                println!("Aborted");
                return Ok(());
            }
            match editor.remove_episode(api, index).await? {
                RowOutcome::NoSuchRow => bail!("episode `{id}` disappeared"),
                _ => println!("Episode {id} deleted"),
            }
        }
    }
    Ok(())
}
