//! Tag-style selection of categories and countries.

use phim_model::{RecordId, Reference};
use tracing::debug;

/// Flips the selection of `candidate`.
///
/// A selected candidate is removed. Otherwise the full record is copied from
/// `authoritative` and appended; a candidate the authoritative list does not
/// know leaves the selection as it is.
pub fn toggle<R: Reference>(
    current: &[R],
    candidate: &RecordId,
    authoritative: &[R],
) -> Vec<R> {
    if current.iter().any(|r| r.id() == candidate) {
        return current
            .iter()
            .filter(|r| r.id() != candidate)
            .cloned()
            .collect();
    }

    match authoritative.iter().find(|r| r.id() == candidate) {
        Some(record) => {
            let mut next = current.to_vec();
            next.push(record.clone());
            next
        }
        None => {
            debug!(kind = %R::KIND, id = %candidate, "ignoring unknown reference");
            current.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phim_model::{Category, Country};

    fn category(id: i64, name: &str) -> Category {
        Category {
            id: RecordId::from(id),
            name: name.into(),
            slug: None,
        }
    }

    fn all() -> Vec<Category> {
        vec![category(1, "Hanh dong"), category(2, "Hai"), category(3, "Tinh cam")]
    }

    #[test]
    fn selects_full_record_from_authoritative_list() {
        let next = toggle(&[], &RecordId::from(2), &all());
        assert_eq!(next, vec![category(2, "Hai")]);
    }

    #[test]
    fn deselects_present_candidate() {
        let current = vec![category(1, "Hanh dong"), category(3, "Tinh cam")];
        let next = toggle(&current, &RecordId::from(1), &all());
        assert_eq!(next, vec![category(3, "Tinh cam")]);
    }

    #[test]
    fn is_self_inverse() {
        let current = vec![category(3, "Tinh cam")];
        for id in 1..=3 {
            let id = RecordId::from(id);
            let twice = toggle(&toggle(&current, &id, &all()), &id, &all());
            assert_eq!(twice, current);
        }
    }

    #[test]
    fn unknown_candidate_is_a_no_op() {
        let current = vec![category(1, "Hanh dong")];
        assert_eq!(toggle(&current, &RecordId::from(42), &all()), current);
        assert_eq!(toggle(&current, &RecordId::from("1"), &all()), current);
    }

    #[test]
    fn works_for_countries() {
        let countries = vec![Country {
            id: RecordId::from("vn"),
            name: "Viet Nam".into(),
            slug: Some("viet-nam".into()),
        }];
        let next = toggle(&[], &RecordId::from("vn"), &countries);
        assert_eq!(next, countries);
    }
}
