//! Discover screen: the full catalog plus a rotating cocktail of the day.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::StreamExt;
use rand::Rng;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use barkeep_shared::constants::COCKTAIL_OF_DAY_ROTATION_SECS;
use barkeep_shared::model::CocktailRecord;

use crate::usecases::UseCases;

use super::LoadPhase;

#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverUiState {
    pub phase: LoadPhase,
    pub cocktails: Vec<CocktailRecord>,
    pub categories: Vec<String>,
    /// Stable between rotations; `None` until the catalog arrives.
    pub cocktail_of_the_day: Option<CocktailRecord>,
}

pub struct DiscoverViewModel {
    state: Arc<watch::Sender<DiscoverUiState>>,
    use_cases: UseCases,
    rotation_period: Duration,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl DiscoverViewModel {
    pub fn new(use_cases: UseCases) -> Self {
        Self::with_rotation_period(use_cases, Duration::from_secs(COCKTAIL_OF_DAY_ROTATION_SECS))
    }

    /// Constructor with an explicit rotation period (tests).
    pub fn with_rotation_period(use_cases: UseCases, rotation_period: Duration) -> Self {
        let (tx, _) = watch::channel(DiscoverUiState::default());
        Self {
            state: Arc::new(tx),
            use_cases,
            rotation_period,
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DiscoverUiState> {
        self.state.subscribe()
    }

    /// Begin loading and start the cocktail-of-the-day rotation.
    pub fn start(&self) {
        self.spawn_load();
        self.spawn_rotation();
    }

    /// Re-run the load after an error.
    pub fn retry(&self) {
        self.state
            .send_modify(|s| s.phase = LoadPhase::Loading);
        self.spawn_load();
    }

    /// Abort all screen-scoped work.
    pub fn close(&self) {
        for task in self.tasks.lock().unwrap().drain(..) {
            task.abort();
        }
    }

    fn spawn_load(&self) {
        let state = Arc::clone(&self.state);
        let use_cases = self.use_cases.clone();

        let handle = tokio::spawn(async move {
            let categories = match use_cases.get_categories().await {
                Ok(categories) => categories,
                Err(e) => {
                    state.send_modify(|s| s.phase = LoadPhase::Error(e.to_string()));
                    return;
                }
            };

            let stream = match use_cases.get_all_cocktails().await {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::warn!(error = %e, "discover load failed");
                    state.send_modify(|s| s.phase = LoadPhase::Error(e.to_string()));
                    return;
                }
            };
            futures::pin_mut!(stream);

            while let Some(cocktails) = stream.next().await {
                state.send_modify(|s| {
                    s.phase = LoadPhase::Ready;
                    s.categories = categories.clone();
                    // Initial pick; the rotation task takes over from here.
                    if s.cocktail_of_the_day.is_none() {
                        s.cocktail_of_the_day = pick_random(&cocktails);
                    }
                    s.cocktails = cocktails;
                });
            }
        });

        self.tasks.lock().unwrap().push(handle);
    }

    fn spawn_rotation(&self) {
        let state = Arc::clone(&self.state);
        let period = self.rotation_period;

        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                state.send_modify(|s| {
                    if let Some(pick) = pick_random(&s.cocktails) {
                        tracing::debug!(id = %pick.id, "rotating cocktail of the day");
                        s.cocktail_of_the_day = Some(pick);
                    }
                });
            }
        });

        self.tasks.lock().unwrap().push(handle);
    }
}

impl Drop for DiscoverViewModel {
    fn drop(&mut self) {
        self.close();
    }
}

/// Uniform random pick; `None` on an empty catalog.
fn pick_random(cocktails: &[CocktailRecord]) -> Option<CocktailRecord> {
    if cocktails.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..cocktails.len());
    Some(cocktails[index].clone())
}

#[cfg(test)]
mod tests {
    use crate::context::testing::{test_context, test_context_with_reader, FailingReader};

    use super::*;

    async fn settled(
        rx: &mut watch::Receiver<DiscoverUiState>,
        pred: impl Fn(&DiscoverUiState) -> bool,
    ) -> DiscoverUiState {
        tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| pred(s)))
            .await
            .expect("state did not settle")
            .expect("view-model dropped")
            .clone()
    }

    #[tokio::test]
    async fn loads_catalog_and_categories() {
        let (_dir, ctx) = test_context();
        let vm = DiscoverViewModel::new(ctx.use_cases.clone());
        let mut rx = vm.subscribe();

        vm.start();

        let state = settled(&mut rx, |s| s.phase == LoadPhase::Ready).await;
        assert_eq!(state.cocktails.len(), 3);
        assert_eq!(state.categories, vec!["Test Drinks"]);
        assert!(state.cocktail_of_the_day.is_some());
    }

    #[tokio::test]
    async fn cocktail_of_the_day_is_from_the_catalog_and_stable() {
        let (_dir, ctx) = test_context();
        // Rotation period far beyond the test horizon.
        let vm = DiscoverViewModel::with_rotation_period(
            ctx.use_cases.clone(),
            Duration::from_secs(3600),
        );
        let mut rx = vm.subscribe();

        vm.start();
        let state = settled(&mut rx, |s| s.phase == LoadPhase::Ready).await;

        let pick = state.cocktail_of_the_day.unwrap();
        assert!(state.cocktails.iter().any(|c| c.id == pick.id));

        // A favorite toggle re-emits the list; the pick must not move.
        ctx.repository.toggle_favorite("mojito").await.unwrap();
        let state = settled(&mut rx, |s| {
            s.cocktails.iter().any(|c| c.id == "mojito" && c.is_favorite)
        })
        .await;
        assert_eq!(state.cocktail_of_the_day.unwrap().id, pick.id);
    }

    #[tokio::test]
    async fn failed_load_reports_error() {
        let (_dir, ctx) = test_context_with_reader(Arc::new(FailingReader));
        let vm = DiscoverViewModel::new(ctx.use_cases.clone());
        let mut rx = vm.subscribe();

        vm.start();

        let state = settled(&mut rx, |s| matches!(s.phase, LoadPhase::Error(_))).await;
        assert!(state.cocktails.is_empty());
    }

    #[tokio::test]
    async fn retry_recovers_once_the_asset_is_readable() {
        use std::sync::atomic::{AtomicBool, Ordering};

        use crate::context::testing::TEST_CATALOG;
        use barkeep_catalog::{CatalogError, ResourceReader};

        /// Fails the first read, succeeds afterwards.
        struct FlakyReader {
            failed_once: AtomicBool,
        }

        impl ResourceReader for FlakyReader {
            fn read_to_string(&self, name: &str) -> barkeep_catalog::Result<String> {
                if !self.failed_once.swap(true, Ordering::SeqCst) {
                    return Err(CatalogError::ResourceNotFound(name.to_string()));
                }
                Ok(TEST_CATALOG.to_string())
            }
        }

        let (_dir, ctx) = test_context_with_reader(Arc::new(FlakyReader {
            failed_once: AtomicBool::new(false),
        }));
        let vm = DiscoverViewModel::new(ctx.use_cases.clone());
        let mut rx = vm.subscribe();

        vm.start();
        settled(&mut rx, |s| matches!(s.phase, LoadPhase::Error(_))).await;

        vm.retry();
        let state = settled(&mut rx, |s| s.phase == LoadPhase::Ready).await;
        assert_eq!(state.cocktails.len(), 3);
    }

    #[tokio::test]
    async fn close_aborts_work() {
        let (_dir, ctx) = test_context();
        let vm = DiscoverViewModel::new(ctx.use_cases.clone());
        vm.start();
        vm.close();
        assert!(vm.tasks.lock().unwrap().is_empty());
    }
}
