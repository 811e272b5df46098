use phim_model::{Episode, MovieDraft};

use super::messages::{DraftAction, ReferenceLists};
use crate::domains::associations::toggle;

/// Applies `action` to `draft` and returns the next draft.
///
/// Index-based actions pointing past the end of their list leave the draft
/// unchanged.
pub fn update(
    draft: MovieDraft,
    action: DraftAction,
    refs: &ReferenceLists,
) -> MovieDraft {
    let mut draft = draft;
    match action {
        DraftAction::SetName(value) => draft.name = value,
        DraftAction::SetSlug(value) => draft.slug = value,
        DraftAction::SetOriginName(value) => draft.origin_name = value,
        DraftAction::SetPosterUrl(value) => draft.poster_url = value,
        DraftAction::SetThumbUrl(value) => draft.thumb_url = value,
        DraftAction::SetYear(value) => draft.year = value,
        DraftAction::SetType(value) => draft.kind = value,
        DraftAction::SetStatus(value) => draft.status = value,
        DraftAction::SetTime(value) => draft.time = value,
        DraftAction::SetEpisodeCurrent(value) => draft.episode_current = value,
        DraftAction::SetEpisodeTotal(value) => draft.episode_total = value,
        DraftAction::SetView(value) => draft.view = value,
        DraftAction::SetContent(value) => draft.content = value,

        DraftAction::AddActor => draft.actor.push(String::new()),
        DraftAction::SetActor(index, value) => {
            set_at(&mut draft.actor, index, value)
        }
        DraftAction::RemoveActor(index) => remove_at(&mut draft.actor, index),
        DraftAction::AddDirector => draft.director.push(String::new()),
        DraftAction::SetDirector(index, value) => {
            set_at(&mut draft.director, index, value)
        }
        DraftAction::RemoveDirector(index) => {
            remove_at(&mut draft.director, index)
        }

        DraftAction::AddEpisode => draft.episodes.push(Episode::blank()),
        DraftAction::SetEpisodeField(index, field, value) => {
            if let Some(episode) = draft.episodes.get_mut(index) {
                episode.set_field(field, value);
            }
        }
        DraftAction::RemoveEpisode(index) => {
            remove_at(&mut draft.episodes, index)
        }
        DraftAction::ReplaceEpisodes(episodes) => draft.episodes = episodes,

        DraftAction::ToggleCategory(id) => {
            draft.categories = toggle(&draft.categories, &id, &refs.categories)
        }
        DraftAction::ToggleCountry(id) => {
            draft.countries = toggle(&draft.countries, &id, &refs.countries)
        }

        DraftAction::Load(next) => draft = next,
        DraftAction::Reset => draft = MovieDraft::new_form(),
    }
    draft
}

fn set_at<T>(list: &mut [T], index: usize, value: T) {
    if let Some(slot) = list.get_mut(index) {
        *slot = value;
    }
}

fn remove_at<T>(list: &mut Vec<T>, index: usize) {
    if index < list.len() {
        list.remove(index);
    }
}
