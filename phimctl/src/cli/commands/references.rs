use anyhow::Result;
use phim_admin::CatalogApi;
use phim_admin::domains::forms::{CategoryForm, CountryForm};
use phim_model::{NewCategory, NewCountry};

use super::form_failure;
use crate::cli::ReferenceAction;
use crate::cli::output::print_references;

pub async fn categories<A>(api: &A, action: ReferenceAction) -> Result<()>
where
    A: CatalogApi + ?Sized,
{
    match action {
        ReferenceAction::List => {
            print_references(&api.list_categories().await?);
        }
        ReferenceAction::Add { name, slug } => {
            let mut form = CategoryForm::with_input(NewCategory { name, slug });
            if let Err(err) = form.submit(api).await {
                return Err(form_failure(&form.errors, err));
            }
            if let Some(message) = form.success {
                println!("{message}");
            }
        }
    }
    Ok(())
}

pub async fn countries<A>(api: &A, action: ReferenceAction) -> Result<()>
where
    A: CatalogApi + ?Sized,
{
    match action {
        ReferenceAction::List => {
            print_references(&api.list_countries().await?);
        }
        ReferenceAction::Add { name, slug } => {
            let mut form = CountryForm::with_input(NewCountry { name, slug });
            if let Err(err) = form.submit(api).await {
                return Err(form_failure(&form.errors, err));
            }
            if let Some(message) = form.success {
                println!("{message}");
            }
        }
    }
    Ok(())
}
