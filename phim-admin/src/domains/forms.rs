//! Creation forms for movies, categories and countries.
//!
//! Each form keeps its input until a submit succeeds, then starts over.
//! Errors and the last success message are kept for display.

use async_trait::async_trait;
use phim_model::{
    MovieDraft, NewCategory, NewCountry, ReferenceKind, ValidationError,
};
use tracing::{error, info};

use crate::domains::editor::{DraftAction, ReferenceLists, update};
use crate::error::{AdminError, Result};
use crate::infrastructure::services::api::CatalogApi;

#[derive(Debug, Clone)]
pub struct MovieForm {
    draft: MovieDraft,
    refs: ReferenceLists,
    pub errors: Vec<String>,
    pub success: Option<String>,
}

impl MovieForm {
    pub fn new(refs: ReferenceLists) -> Self {
        Self {
            draft: MovieDraft::new_form(),
            refs,
            errors: Vec::new(),
            success: None,
        }
    }

    /// Fetches the category and country lists the form selects from.
    pub async fn open<A>(api: &A) -> Result<Self>
    where
        A: CatalogApi + ?Sized,
    {
        Ok(Self::new(ReferenceLists {
            categories: api.list_categories().await?,
            countries: api.list_countries().await?,
        }))
    }

    pub fn draft(&self) -> &MovieDraft {
        &self.draft
    }

    pub fn references(&self) -> &ReferenceLists {
        &self.refs
    }

    pub fn apply(&mut self, action: DraftAction) {
        let current = std::mem::take(&mut self.draft);
        self.draft = update(current, action, &self.refs);
    }

    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = DraftAction>) {
        for action in actions {
            self.apply(action);
        }
    }

    /// Sends the draft. On success the form is reset to a blank one.
    pub async fn submit<A>(&mut self, api: &A) -> Result<()>
    where
        A: CatalogApi + ?Sized,
    {
        self.errors.clear();
        self.success = None;

        let outcome = match self.draft.validate_for_submit() {
            Ok(()) => api.create_movie(&self.draft).await,
            Err(err) => Err(err.into()),
        };

        match outcome {
            Ok(()) => {
                info!(slug = %self.draft.slug, "movie created");
                self.draft = MovieDraft::new_form();
                self.success = Some("Movie added successfully!".to_string());
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to add movie");
                self.errors.push(err.operator_message("Failed to add movie."));
                Err(err)
            }
        }
    }
}

/// Input of a reference creation form.
#[async_trait]
pub trait NewReference: Default + Send + Sync {
    const KIND: ReferenceKind;

    fn slug(&self) -> &str;

    fn validate(&self) -> std::result::Result<(), ValidationError>;

    async fn create<A>(&self, api: &A) -> Result<()>
    where
        A: CatalogApi + ?Sized;
}

#[async_trait]
impl NewReference for NewCategory {
    const KIND: ReferenceKind = ReferenceKind::Category;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        NewCategory::validate(self)
    }

    async fn create<A>(&self, api: &A) -> Result<()>
    where
        A: CatalogApi + ?Sized,
    {
        api.create_category(self).await
    }
}

#[async_trait]
impl NewReference for NewCountry {
    const KIND: ReferenceKind = ReferenceKind::Country;

    fn slug(&self) -> &str {
        &self.slug
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        NewCountry::validate(self)
    }

    async fn create<A>(&self, api: &A) -> Result<()>
    where
        A: CatalogApi + ?Sized,
    {
        api.create_country(self).await
    }
}

/// `{name, slug}` form shared by categories and countries.
#[derive(Debug, Clone, Default)]
pub struct ReferenceForm<N> {
    pub input: N,
    pub errors: Vec<String>,
    pub success: Option<String>,
}

pub type CategoryForm = ReferenceForm<NewCategory>;
pub type CountryForm = ReferenceForm<NewCountry>;

impl<N: NewReference> ReferenceForm<N> {
    pub fn with_input(input: N) -> Self {
        Self {
            input,
            errors: Vec::new(),
            success: None,
        }
    }

    pub async fn submit<A>(&mut self, api: &A) -> Result<()>
    where
        A: CatalogApi + ?Sized,
    {
        self.errors.clear();
        self.success = None;

        let outcome = match self.input.validate() {
            Ok(()) => self.input.create(api).await,
            Err(err) => Err(AdminError::from(err)),
        };

        match outcome {
            Ok(()) => {
                info!(
                    kind = %N::KIND,
                    slug = %self.input.slug(),
                    "reference created"
                );
                self.input = N::default();
                self.success =
                    Some(format!("{} added successfully!", capitalized(N::KIND)));
                Ok(())
            }
            Err(err) => {
                error!(kind = %N::KIND, error = %err, "failed to add reference");
                let fallback = format!("Failed to add {}.", N::KIND);
                self.errors.push(err.operator_message(&fallback));
                Err(err)
            }
        }
    }
}

fn capitalized(kind: ReferenceKind) -> &'static str {
    match kind {
        ReferenceKind::Category => "Category",
        ReferenceKind::Country => "Country",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::{ApiCall, Operation, TestCatalogApi};
    use phim_model::{Category, RecordId};

    #[test]
    fn movie_form_starts_with_one_row_each() {
        let form = MovieForm::new(ReferenceLists::default());
        assert_eq!(form.draft().actor, [""]);
        assert_eq!(form.draft().director, [""]);
        assert_eq!(form.draft().episodes.len(), 1);
    }

    #[tokio::test]
    async fn movie_form_requires_name_slug_and_type() {
        let api = TestCatalogApi::new();
        let mut form = MovieForm::new(ReferenceLists::default());
        form.apply(DraftAction::SetName("Phim".into()));

        assert!(form.submit(&api).await.is_err());
        assert_eq!(form.errors, ["please fill all required fields: slug, type"]);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn movie_form_resets_after_success() {
        let api = TestCatalogApi::new();
        let refs = ReferenceLists {
            categories: vec![Category {
                id: RecordId::from(2),
                name: "Hai".into(),
                slug: None,
            }],
            countries: Vec::new(),
        };
        let mut form = MovieForm::new(refs);
        form.apply_all([
            DraftAction::SetName("Phim".into()),
            DraftAction::SetSlug("phim".into()),
            DraftAction::SetType("single".into()),
            DraftAction::ToggleCategory(RecordId::from(2)),
        ]);

        form.submit(&api).await.unwrap();

        assert_eq!(form.draft(), &MovieDraft::new_form());
        assert!(form.success.is_some());
        match api.calls().as_slice() {
            [ApiCall::CreateMovie(sent)] => {
                assert_eq!(sent.category_ids(), vec![RecordId::from(2)]);
            }
            other => panic!("unexpected calls {other:?}"),
        }
    }

    #[tokio::test]
    async fn backend_message_is_surfaced_and_input_kept() {
        let api = TestCatalogApi::new();
        api.fail(Operation::CreateCategory, 409, Some("Slug already exists"));
        let mut form = CategoryForm::with_input(NewCategory {
            name: "Hai".into(),
            slug: "hai".into(),
        });

        assert!(form.submit(&api).await.is_err());
        assert_eq!(form.errors, ["Slug already exists"]);
        assert_eq!(form.input.slug, "hai");
    }

    #[tokio::test]
    async fn generic_message_without_backend_text() {
        let api = TestCatalogApi::new();
        api.fail(Operation::CreateCountry, 500, None);
        let mut form = CountryForm::with_input(NewCountry {
            name: "Viet Nam".into(),
            slug: "viet-nam".into(),
        });

        assert!(form.submit(&api).await.is_err());
        assert_eq!(form.errors, ["Failed to add country."]);
    }

    #[tokio::test]
    async fn reference_form_resets_after_success() {
        let api = TestCatalogApi::new();
        let mut form = CountryForm::with_input(NewCountry {
            name: "Han Quoc".into(),
            slug: "han-quoc".into(),
        });

        form.submit(&api).await.unwrap();

        assert_eq!(form.input, NewCountry::default());
        assert_eq!(form.success.as_deref(), Some("Country added successfully!"));
        assert_eq!(api.countries().len(), 1);
    }
}
