//! Search screen: debounced, cancellable catalog search.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use barkeep_shared::constants::SEARCH_DEBOUNCE_MS;
use barkeep_shared::model::CocktailRecord;

use crate::usecases::UseCases;

use super::LoadPhase;

#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUiState {
    pub query: String,
    pub phase: LoadPhase,
    pub results: Vec<CocktailRecord>,
}

pub struct SearchViewModel {
    state: Arc<watch::Sender<SearchUiState>>,
    use_cases: UseCases,
    debounce: Duration,
    /// The pending debounce/search task; superseded input aborts it.
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl SearchViewModel {
    pub fn new(use_cases: UseCases) -> Self {
        Self::with_debounce(use_cases, Duration::from_millis(SEARCH_DEBOUNCE_MS))
    }

    /// Constructor with an explicit debounce (tests).
    pub fn with_debounce(use_cases: UseCases, debounce: Duration) -> Self {
        let (tx, _) = watch::channel(SearchUiState {
            phase: LoadPhase::Ready,
            ..SearchUiState::default()
        });
        Self {
            state: Arc::new(tx),
            use_cases,
            debounce,
            in_flight: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchUiState> {
        self.state.subscribe()
    }

    /// React to a keystroke. The actual search runs only after the
    /// debounce window passes without further input; newer input aborts
    /// whatever was pending or in flight.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        let blank = query.trim().is_empty();

        self.state.send_modify(|s| {
            s.query = query.clone();
            if blank {
                s.results.clear();
                s.phase = LoadPhase::Ready;
            }
        });

        let mut slot = self.in_flight.lock().unwrap();
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        if blank {
            return;
        }

        let state = Arc::clone(&self.state);
        let use_cases = self.use_cases.clone();
        let debounce = self.debounce;

        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            state.send_modify(|s| s.phase = LoadPhase::Loading);

            let stream = match use_cases.search_cocktails(&query).await {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::warn!(error = %e, query, "search failed");
                    state.send_modify(|s| s.phase = LoadPhase::Error(e.to_string()));
                    return;
                }
            };
            futures::pin_mut!(stream);

            // Stay subscribed so results refresh with the store (e.g. a
            // favorite toggled from another screen) until superseded.
            while let Some(results) = stream.next().await {
                state.send_modify(|s| {
                    s.phase = LoadPhase::Ready;
                    s.results = results;
                });
            }
        }));
    }

    /// Abort all screen-scoped work.
    pub fn close(&self) {
        if let Some(task) = self.in_flight.lock().unwrap().take() {
            task.abort();
        }
    }
}

impl Drop for SearchViewModel {
    fn drop(&mut self) {
        self.close();
    }
}
