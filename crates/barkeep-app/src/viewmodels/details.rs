//! Cocktail details screen.

use std::sync::Arc;

use tokio::sync::watch;

use barkeep_shared::model::CocktailRecord;

use crate::usecases::UseCases;

use super::LoadPhase;

#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsUiState {
    pub phase: LoadPhase,
    /// `None` after a completed load means the id was unknown.
    pub cocktail: Option<CocktailRecord>,
}

pub struct DetailsViewModel {
    state: Arc<watch::Sender<DetailsUiState>>,
    use_cases: UseCases,
}

impl DetailsViewModel {
    pub fn new(use_cases: UseCases) -> Self {
        let (tx, _) = watch::channel(DetailsUiState::default());
        Self {
            state: Arc::new(tx),
            use_cases,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailsUiState> {
        self.state.subscribe()
    }

    /// Load one cocktail. An unknown id completes with no cocktail; it is
    /// not an error.
    pub async fn load(&self, id: &str) {
        self.state.send_modify(|s| s.phase = LoadPhase::Loading);

        match self.use_cases.get_cocktail_by_id(id).await {
            Ok(cocktail) => self.state.send_modify(|s| {
                s.phase = LoadPhase::Ready;
                s.cocktail = cocktail;
            }),
            Err(e) => {
                tracing::warn!(error = %e, id, "details load failed");
                self.state
                    .send_modify(|s| s.phase = LoadPhase::Error(e.to_string()));
            }
        }
    }

    /// Flip the favorite flag of the loaded cocktail and refresh it.
    pub async fn toggle_favorite(&self) {
        let Some(id) = self.state.borrow().cocktail.as_ref().map(|c| c.id.clone()) else {
            return;
        };

        match self.use_cases.toggle_favorite(&id).await {
            Ok(Some(is_favorite)) => self.state.send_modify(|s| {
                if let Some(cocktail) = s.cocktail.as_mut() {
                    cocktail.is_favorite = is_favorite;
                }
            }),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, id, "favorite toggle failed"),
        }
    }
}
