/// Raised when a backend payload does not have the shape the client needs.
///
/// `path` names the offending field the way it appears in the payload, e.g.
/// `movie.episodes[2].slug`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("missing field `{path}`")]
    Missing { path: String },

    #[error("field `{path}`: expected {expected}, found {found}")]
    Unexpected {
        path: String,
        expected: &'static str,
        found: String,
    },
}

impl PayloadError {
    pub fn path(&self) -> &str {
        match self {
            PayloadError::Missing { path } => path,
            PayloadError::Unexpected { path, .. } => path,
        }
    }
}

/// Required fields that were blank when a record was submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("please fill all required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl ValidationError {
    /// Collects the names whose value is blank. Returns `Ok(())` when none
    /// are.
    pub fn check(fields: &[(&'static str, &str)]) -> Result<(), Self> {
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}
