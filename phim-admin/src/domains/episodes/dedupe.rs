use std::collections::HashMap;

use phim_model::{Episode, RecordId};

/// Identity of an episode for collapsing duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum EpisodeKey {
    Slug(String),
    Id(RecordId),
    /// Neither slug nor id: unique per input position.
    Position(usize),
}

impl EpisodeKey {
    fn of(episode: &Episode, position: usize) -> Self {
        if let Some(slug) = episode.slug_key() {
            EpisodeKey::Slug(slug.to_string())
        } else if let Some(id) = &episode.id {
            EpisodeKey::Id(id.clone())
        } else {
            EpisodeKey::Position(position)
        }
    }
}

/// Keeps one episode per identity key (slug, else id).
///
/// When a key repeats, the later record replaces the earlier one in the
/// earlier one's slot, so the output keeps first-seen order. Rows with
/// neither slug nor id are never merged.
pub fn dedupe_episodes(episodes: Vec<Episode>) -> Vec<Episode> {
    let mut slots: HashMap<EpisodeKey, usize> =
        HashMap::with_capacity(episodes.len());
    let mut kept: Vec<Episode> = Vec::with_capacity(episodes.len());

    for (position, episode) in episodes.into_iter().enumerate() {
        let key = EpisodeKey::of(&episode, position);
        match slots.get(&key) {
            Some(&slot) => kept[slot] = episode,
            None => {
                slots.insert(key, kept.len());
                kept.push(episode);
            }
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(slug: &str, id: Option<i64>, name: &str) -> Episode {
        Episode {
            id: id.map(RecordId::from),
            name: name.into(),
            slug: slug.into(),
            ..Episode::blank()
        }
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(dedupe_episodes(Vec::new()).is_empty());
    }

    #[test]
    fn later_record_wins_for_same_slug() {
        let out = dedupe_episodes(vec![ep("a", None, "x"), ep("a", None, "y")]);
        assert_eq!(out, vec![ep("a", None, "y")]);
    }

    #[test]
    fn winner_keeps_first_slot() {
        let out = dedupe_episodes(vec![
            ep("a", Some(1), "first"),
            ep("b", Some(2), "b"),
            ep("a", Some(3), "second"),
        ]);
        let names: Vec<_> = out.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["second", "b"]);
        assert_eq!(out[0].id, Some(RecordId::from(3)));
    }

    #[test]
    fn distinct_keys_preserve_length_and_order() {
        let input = vec![
            ep("tap-1", Some(1), "1"),
            ep("tap-2", None, "2"),
            ep("", Some(9), "3"),
        ];
        assert_eq!(dedupe_episodes(input.clone()), input);
    }

    #[test]
    fn id_is_the_key_when_slug_is_empty() {
        let out = dedupe_episodes(vec![ep("", Some(4), "old"), ep("", Some(4), "new")]);
        assert_eq!(out, vec![ep("", Some(4), "new")]);
    }

    #[test]
    fn keyless_rows_never_collapse() {
        let out = dedupe_episodes(vec![Episode::blank(), Episode::blank()]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn slug_key_and_id_key_do_not_collide() {
        let numeric_slug = ep("7", None, "slug");
        let text_id = Episode {
            id: Some(RecordId::from("7")),
            ..Episode::blank()
        };
        let out = dedupe_episodes(vec![numeric_slug, text_id]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn is_idempotent() {
        let input = vec![
            ep("a", Some(1), "1"),
            Episode::blank(),
            ep("a", None, "2"),
            ep("", Some(1), "3"),
            Episode::blank(),
            ep("", Some(1), "4"),
        ];
        let once = dedupe_episodes(input);
        let twice = dedupe_episodes(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 4);
    }
}
