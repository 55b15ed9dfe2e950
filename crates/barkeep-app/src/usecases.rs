//! Use-case layer.
//!
//! Thin, named delegations to the repository. The view-models depend on
//! this seam rather than on the repository directly, which keeps screen
//! tests to a single fake.

use std::sync::Arc;

use futures::Stream;

use barkeep_shared::model::CocktailRecord;

use crate::repository::CocktailRepository;
use crate::Result;

/// All cocktail-facing use cases, cheaply clonable.
#[derive(Clone)]
pub struct UseCases {
    repo: Arc<CocktailRepository>,
}

impl UseCases {
    pub fn new(repo: Arc<CocktailRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all_cocktails(&self) -> Result<impl Stream<Item = Vec<CocktailRecord>>> {
        self.repo.all_cocktails().await
    }

    pub async fn search_cocktails(
        &self,
        query: &str,
    ) -> Result<impl Stream<Item = Vec<CocktailRecord>>> {
        self.repo.search_cocktails(query).await
    }

    pub async fn get_favorite_cocktails(
        &self,
    ) -> Result<impl Stream<Item = Vec<CocktailRecord>>> {
        self.repo.favorite_cocktails().await
    }

    pub async fn get_cocktails_by_category(
        &self,
        category_key: &str,
    ) -> Result<impl Stream<Item = Vec<CocktailRecord>>> {
        self.repo.cocktails_by_category(category_key).await
    }

    pub async fn get_cocktail_by_id(&self, id: &str) -> Result<Option<CocktailRecord>> {
        self.repo.cocktail_by_id(id).await
    }

    pub async fn get_categories(&self) -> Result<Vec<String>> {
        self.repo.categories().await
    }

    pub async fn toggle_favorite(&self, id: &str) -> Result<Option<bool>> {
        self.repo.toggle_favorite(id).await
    }

    pub async fn remove_from_favorites(&self, id: &str) -> Result<bool> {
        self.repo.remove_favorite(id).await
    }
}
