//! Normalization boundary for backend payloads.
//!
//! The catalog API does not guarantee the shape of what it returns, so every
//! response is walked here as a [`serde_json::Value`] and turned into the
//! strong model types. Anything that does not fit fails with a
//! [`PayloadError`] naming the field path instead of being defaulted deep
//! inside the editor.
//!
//! Free-text fields accept strings and numbers (numbers are rendered as
//! text); absent or `null` text becomes empty. Identifiers must be an
//! integer or a non-empty string.

use chrono::{DateTime, NaiveDateTime};
use serde_json::{Map, Value};

use crate::episode::Episode;
use crate::error::PayloadError;
use crate::ids::RecordId;
use crate::movie::{
    ActivityEntry, MovieActivity, MovieDetail, MovieDraft, MoviePage,
    MovieSummary,
};
use crate::reference::{Category, Country};

type Result<T> = std::result::Result<T, PayloadError>;

/// `GET /categories`
pub fn category_list(value: &Value) -> Result<Vec<Category>> {
    list(value, "categories", |item, path| {
        let obj = Obj::new(item, path)?;
        Ok(Category {
            id: obj.required_id("id")?,
            name: obj.required_text("name")?,
            slug: obj.optional_text("slug")?,
        })
    })
}

/// `GET /country`
pub fn country_list(value: &Value) -> Result<Vec<Country>> {
    list(value, "countries", |item, path| {
        let obj = Obj::new(item, path)?;
        Ok(Country {
            id: obj.required_id("id")?,
            name: obj.required_text("name")?,
            slug: obj.optional_text("slug")?,
        })
    })
}

/// `GET /films/{movieId}/episodes` and the body returned when episodes are
/// created.
pub fn episode_list(value: &Value) -> Result<Vec<Episode>> {
    list(value, "episodes", episode)
}

/// Movie list page. A page with `status: false` carries nothing else the
/// client relies on and is returned empty.
pub fn movie_page(value: &Value) -> Result<MoviePage> {
    let obj = Obj::new(value, "page")?;
    let status = match obj.get("status") {
        Some(Value::Bool(flag)) => *flag,
        Some(other) => {
            return Err(unexpected(obj.child("status"), "a boolean", other));
        }
        None => return Err(missing(obj.child("status"))),
    };

    if !status {
        return Ok(MoviePage {
            status,
            items: Vec::new(),
            total_pages: 0,
        });
    }

    let items_path = obj.child("items");
    let items = match obj.get("items") {
        Some(items) => list(items, &items_path, summary)?,
        None => return Err(missing(items_path)),
    };

    let pagination = match obj.get("pagination") {
        Some(p) => Obj::new(p, obj.child("pagination"))?,
        None => return Err(missing(obj.child("pagination"))),
    };
    let total_pages = match pagination.get("totalPages") {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                unexpected(
                    pagination.child("totalPages"),
                    "a non-negative integer",
                    &Value::Number(n.clone()),
                )
            })?,
        Some(other) => {
            return Err(unexpected(
                pagination.child("totalPages"),
                "a non-negative integer",
                other,
            ));
        }
        None => return Err(missing(pagination.child("totalPages"))),
    };

    Ok(MoviePage {
        status,
        items,
        total_pages,
    })
}

/// `GET /<movies-path>/{slug}`: the full record, which must carry its
/// identifier and episode list.
pub fn movie_detail(value: &Value) -> Result<MovieDetail> {
    let obj = Obj::new(value, "movie")?;
    let id = obj.required_id("id")?;
    if obj.get("episodes").is_none() {
        return Err(missing(obj.child("episodes")));
    }

    let mut draft = draft_fields(&obj)?;
    draft.id = Some(id);

    Ok(MovieDetail {
        draft,
        activity: activity(&obj)?,
    })
}

/// A draft authored outside the backend (e.g. a JSON file handed to the
/// CLI). Identifier and lists are optional.
pub fn movie_draft(value: &Value) -> Result<MovieDraft> {
    let obj = Obj::new(value, "movie")?;
    let mut draft = draft_fields(&obj)?;
    draft.id = obj.optional_id("id")?;
    Ok(draft)
}

fn draft_fields(obj: &Obj<'_>) -> Result<MovieDraft> {
    let episodes = match obj.get("episodes") {
        Some(value) => list(value, &obj.child("episodes"), episode)?,
        None => Vec::new(),
    };
    let categories = match obj.get("categories") {
        Some(value) => list(value, &obj.child("categories"), |item, path| {
            let c = Obj::new(item, path)?;
            Ok(Category {
                id: c.required_id("id")?,
                name: c.text("name")?,
                slug: c.optional_text("slug")?,
            })
        })?,
        None => Vec::new(),
    };
    let countries = match obj.get("countries") {
        Some(value) => list(value, &obj.child("countries"), |item, path| {
            let c = Obj::new(item, path)?;
            Ok(Country {
                id: c.required_id("id")?,
                name: c.text("name")?,
                slug: c.optional_text("slug")?,
            })
        })?,
        None => Vec::new(),
    };

    Ok(MovieDraft {
        id: None,
        name: obj.text("name")?,
        slug: obj.text("slug")?,
        origin_name: obj.text("origin_name")?,
        poster_url: obj.text("poster_url")?,
        thumb_url: obj.text("thumb_url")?,
        year: obj.year("year")?,
        kind: obj.text("type")?,
        status: obj.text("status")?,
        time: obj.text("time")?,
        episode_current: obj.text("episode_current")?,
        episode_total: obj.text("episode_total")?,
        view: obj.count("view")?,
        content: obj.text("content")?,
        actor: obj.string_list("actor")?,
        director: obj.string_list("director")?,
        categories,
        countries,
        episodes,
    })
}

fn episode(value: &Value, path: String) -> Result<Episode> {
    let obj = Obj::new(value, path)?;
    Ok(Episode {
        id: obj.optional_id("id")?,
        name: obj.text("name")?,
        slug: obj.text("slug")?,
        filename: obj.text("filename")?,
        link_embed: obj.text("link_embed")?,
        link_m3u8: obj.text("link_m3u8")?,
    })
}

fn summary(value: &Value, path: String) -> Result<MovieSummary> {
    let obj = Obj::new(value, path)?;
    Ok(MovieSummary {
        id: obj.required_id("id")?,
        name: obj.required_text("name")?,
        slug: obj.required_text("slug")?,
        origin_name: obj.text("origin_name")?,
        poster_url: obj.text("poster_url")?,
        thumb_url: obj.text("thumb_url")?,
        year: obj.year("year")?,
        view: obj.count("view")?,
    })
}

fn activity(obj: &Obj<'_>) -> Result<MovieActivity> {
    let entries = |key: &str| -> Result<Vec<ActivityEntry>> {
        match obj.get(key) {
            Some(value) => list(value, &obj.child(key), |item, path| {
                let entry = Obj::new(item, path)?;
                Ok(ActivityEntry {
                    username: entry.text("username")?,
                    created_at: entry.timestamp("createdAt")?,
                })
            }),
            None => Ok(Vec::new()),
        }
    };

    let modified = match obj.get("modified") {
        Some(value) => {
            Obj::new(value, obj.child("modified"))?.optional_text("time")?
        }
        None => None,
    };

    Ok(MovieActivity {
        comments: entries("comments")?,
        favorites: entries("favorites")?,
        modified,
    })
}

fn list<T>(
    value: &Value,
    path: &str,
    mut item: impl FnMut(&Value, String) -> Result<T>,
) -> Result<Vec<T>> {
    let Value::Array(items) = value else {
        return Err(unexpected(path.to_string(), "an array", value));
    };
    items
        .iter()
        .enumerate()
        .map(|(index, value)| item(value, format!("{path}[{index}]")))
        .collect()
}

/// Object cursor that remembers where it sits in the payload.
struct Obj<'a> {
    path: String,
    map: &'a Map<String, Value>,
}

impl<'a> Obj<'a> {
    fn new(value: &'a Value, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        match value {
            Value::Object(map) => Ok(Self { path, map }),
            other => Err(unexpected(path, "an object", other)),
        }
    }

    fn child(&self, key: &str) -> String {
        format!("{}.{}", self.path, key)
    }

    /// Present and not `null`.
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    fn required_id(&self, key: &str) -> Result<RecordId> {
        self.optional_id(key)?
            .ok_or_else(|| missing(self.child(key)))
    }

    fn optional_id(&self, key: &str) -> Result<Option<RecordId>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        match value {
            Value::Number(n) => {
                n.as_i64().map(|n| Some(RecordId::Number(n))).ok_or_else(|| {
                    unexpected(self.child(key), "an integer or string id", value)
                })
            }
            Value::String(s) if !s.trim().is_empty() => {
                Ok(Some(RecordId::Text(s.clone())))
            }
            other => Err(unexpected(
                self.child(key),
                "an integer or string id",
                other,
            )),
        }
    }

    fn optional_text(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(unexpected(self.child(key), "text", other)),
        }
    }

    fn text(&self, key: &str) -> Result<String> {
        Ok(self.optional_text(key)?.unwrap_or_default())
    }

    fn required_text(&self, key: &str) -> Result<String> {
        self.optional_text(key)?
            .ok_or_else(|| missing(self.child(key)))
    }

    fn year(&self, key: &str) -> Result<Option<i32>> {
        let expected = "an integer year";
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(value @ Value::String(s)) => s
                .trim()
                .parse::<i32>()
                .map(Some)
                .map_err(|_| unexpected(self.child(key), expected, value)),
            Some(value @ Value::Number(n)) => n
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| unexpected(self.child(key), expected, value)),
            Some(other) => Err(unexpected(self.child(key), expected, other)),
        }
    }

    fn count(&self, key: &str) -> Result<u64> {
        let expected = "a non-negative integer";
        match self.get(key) {
            None => Ok(0),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(0),
            Some(value @ Value::String(s)) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| unexpected(self.child(key), expected, value)),
            Some(value @ Value::Number(n)) => n
                .as_u64()
                .ok_or_else(|| unexpected(self.child(key), expected, value)),
            Some(other) => Err(unexpected(self.child(key), expected, other)),
        }
    }

    fn string_list(&self, key: &str) -> Result<Vec<String>> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(value) => list(value, &self.child(key), |item, path| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(unexpected(path, "a string", other)),
            }),
        }
    }

    /// RFC 3339, a zone-less ISO timestamp, or epoch milliseconds.
    fn timestamp(&self, key: &str) -> Result<Option<NaiveDateTime>> {
        let expected = "a timestamp";
        match self.get(key) {
            None => Ok(None),
            Some(value @ Value::String(s)) => {
                if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
                    return Ok(Some(parsed.naive_utc()));
                }
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(Some)
                    .map_err(|_| unexpected(self.child(key), expected, value))
            }
            Some(value @ Value::Number(n)) => n
                .as_i64()
                .and_then(DateTime::from_timestamp_millis)
                .map(|dt| Some(dt.naive_utc()))
                .ok_or_else(|| unexpected(self.child(key), expected, value)),
            Some(other) => Err(unexpected(self.child(key), expected, other)),
        }
    }
}

fn missing(path: String) -> PayloadError {
    PayloadError::Missing { path }
}

fn unexpected(
    path: String,
    expected: &'static str,
    found: &Value,
) -> PayloadError {
    PayloadError::Unexpected {
        path,
        expected,
        found: describe(found),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("array of {}", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail_json() -> Value {
        json!({
            "id": 12,
            "name": "Song Long",
            "slug": "song-long",
            "origin_name": "Twin Dragons",
            "year": "2021",
            "type": "series",
            "view": 300,
            "actor": ["A", "B"],
            "director": [],
            "categories": [{"id": 1, "name": "Action"}],
            "countries": [{"id": "vn", "name": "Viet Nam"}],
            "episodes": [
                {"id": 5, "name": "Tap 1", "slug": "tap-1"},
                {"name": "Tap 2", "slug": "tap-2", "link_m3u8": null}
            ],
            "comments": [
                {"username": "lan", "createdAt": "2024-03-01T10:00:00"}
            ],
            "favorites": [],
            "modified": {"time": "2024-03-02 08:00"}
        })
    }

    #[test]
    fn movie_detail_normalizes_loose_scalars() {
        let detail = movie_detail(&detail_json()).unwrap();
        let draft = detail.draft;

        assert_eq!(draft.id, Some(RecordId::Number(12)));
        assert_eq!(draft.year, Some(2021));
        assert_eq!(draft.kind, "series");
        assert_eq!(draft.status, "");
        assert_eq!(draft.view, 300);
        assert_eq!(draft.countries[0].id, RecordId::from("vn"));
        assert_eq!(draft.episodes.len(), 2);
        assert_eq!(draft.episodes[1].id, None);
        assert_eq!(draft.episodes[1].link_m3u8, "");

        assert_eq!(detail.activity.comments[0].username, "lan");
        assert!(detail.activity.comments[0].created_at.is_some());
        assert_eq!(detail.activity.modified.as_deref(), Some("2024-03-02 08:00"));
    }

    #[test]
    fn movie_detail_requires_episode_list() {
        let mut value = detail_json();
        value.as_object_mut().unwrap().remove("episodes");
        let err = movie_detail(&value).unwrap_err();
        assert_eq!(
            err,
            PayloadError::Missing {
                path: "movie.episodes".into()
            }
        );
    }

    #[test]
    fn malformed_episode_reports_its_path() {
        let mut value = detail_json();
        value["episodes"][1]["slug"] = json!({"nested": true});
        let err = movie_detail(&value).unwrap_err();
        assert_eq!(err.path(), "movie.episodes[1].slug");
        assert_eq!(
            err.to_string(),
            "field `movie.episodes[1].slug`: expected text, found object"
        );
    }

    #[test]
    fn blank_string_id_is_rejected() {
        let err = episode_list(&json!([{"id": "  ", "slug": "x"}])).unwrap_err();
        assert_eq!(err.path(), "episodes[0].id");
    }

    #[test]
    fn non_numeric_year_fails_fast() {
        let mut value = detail_json();
        value["year"] = json!("soon");
        let err = movie_detail(&value).unwrap_err();
        assert_eq!(err.path(), "movie.year");
    }

    #[test]
    fn movie_page_parses_items_and_total() {
        let page = movie_page(&json!({
            "status": true,
            "items": [
                {"id": 1, "name": "A", "slug": "a", "year": 2020, "view": "7"}
            ],
            "pagination": {"totalPages": 4}
        }))
        .unwrap();

        assert!(page.status);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.items[0].view, 7);
    }

    #[test]
    fn unsuccessful_page_is_empty() {
        let page = movie_page(&json!({"status": false})).unwrap();
        assert!(!page.status);
        assert!(page.items.is_empty());
    }

    #[test]
    fn movie_page_without_pagination_is_rejected() {
        let err =
            movie_page(&json!({"status": true, "items": []})).unwrap_err();
        assert_eq!(err.path(), "page.pagination");
    }

    #[test]
    fn reference_lists_must_be_arrays() {
        let err = category_list(&json!({"id": 1})).unwrap_err();
        assert_eq!(err.path(), "categories");
        let countries =
            country_list(&json!([{"id": 2, "name": "Japan"}])).unwrap();
        assert_eq!(countries[0].name, "Japan");
    }

    #[test]
    fn authored_draft_may_omit_id_and_lists() {
        let draft = movie_draft(&json!({
            "name": "N", "slug": "n", "type": "single"
        }))
        .unwrap();
        assert_eq!(draft.id, None);
        assert!(draft.episodes.is_empty());
        assert!(draft.validate_for_submit().is_ok());
    }
}
