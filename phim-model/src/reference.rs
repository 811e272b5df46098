//! Category and country reference entities.
//!
//! Both are owned by the backend; a movie draft only carries copies of the
//! `{id, name}` records it is associated with.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Category,
    Country,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Category => f.write_str("category"),
            ReferenceKind::Country => f.write_str("country"),
        }
    }
}

/// Shared surface of reference records, keyed by identifier.
pub trait Reference: Clone {
    const KIND: ReferenceKind;

    fn id(&self) -> &RecordId;
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl Reference for Category {
    const KIND: ReferenceKind = ReferenceKind::Category;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Reference for Country {
    const KIND: ReferenceKind = ReferenceKind::Country;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Body of `POST /categories`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
}

/// Body of `POST /country`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCountry {
    pub name: String,
    pub slug: String,
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check(&[("name", &self.name), ("slug", &self.slug)])
    }
}

impl NewCountry {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check(&[("name", &self.name), ("slug", &self.slug)])
    }
}
