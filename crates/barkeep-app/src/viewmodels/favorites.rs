//! Favorites screen: a live view over the favorited cocktails.

use std::sync::{Arc, Mutex};

use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use barkeep_shared::model::CocktailRecord;

use crate::usecases::UseCases;

use super::LoadPhase;

#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesUiState {
    pub phase: LoadPhase,
    pub favorites: Vec<CocktailRecord>,
}

pub struct FavoritesViewModel {
    state: Arc<watch::Sender<FavoritesUiState>>,
    use_cases: UseCases,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl FavoritesViewModel {
    pub fn new(use_cases: UseCases) -> Self {
        let (tx, _) = watch::channel(FavoritesUiState::default());
        Self {
            state: Arc::new(tx),
            use_cases,
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FavoritesUiState> {
        self.state.subscribe()
    }

    pub fn start(&self) {
        let state = Arc::clone(&self.state);
        let use_cases = self.use_cases.clone();

        let handle = tokio::spawn(async move {
            let stream = match use_cases.get_favorite_cocktails().await {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::warn!(error = %e, "favorites load failed");
                    state.send_modify(|s| s.phase = LoadPhase::Error(e.to_string()));
                    return;
                }
            };
            futures::pin_mut!(stream);

            while let Some(favorites) = stream.next().await {
                state.send_modify(|s| {
                    s.phase = LoadPhase::Ready;
                    s.favorites = favorites;
                });
            }
        });

        self.tasks.lock().unwrap().push(handle);
    }

    /// Remove one cocktail from the favorites; the stream refreshes the
    /// list.
    pub async fn remove(&self, id: &str) {
        if let Err(e) = self.use_cases.remove_from_favorites(id).await {
            tracing::warn!(error = %e, id, "failed to remove favorite");
        }
    }

    /// Abort all screen-scoped work.
    pub fn close(&self) {
        for task in self.tasks.lock().unwrap().drain(..) {
            task.abort();
        }
    }
}

impl Drop for FavoritesViewModel {
    fn drop(&mut self) {
        self.close();
    }
}
