//! Application state for the parcel rate engine API.
//!
//! Quotes read the active rule set through a shared, swappable pointer so
//! they never block on an edit in progress. Edits are serialized: each one
//! clones the active set, applies its change, normalizes, persists and only
//! then swaps the new set in. Rule file reads and writes run on the blocking
//! thread pool.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::info;

use crate::calculation::normalize_and_order;
use crate::config::RuleStore;
use crate::error::{EngineError, EngineResult};
use crate::models::{RuleSet, RuleSetReview};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The active rule set.
    rules: Arc<RwLock<Arc<RuleSet>>>,
    /// Where edits are persisted, if anywhere.
    store: Option<Arc<RuleStore>>,
    /// Held for the whole of an edit or reload.
    edit_lock: Arc<Mutex<()>>,
    /// Normalize rules reloaded from the store.
    normalize_on_load: bool,
}

impl AppState {
    /// Creates state serving `rules` with no backing store. Edits only
    /// change the in-memory set.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules: Arc::new(RwLock::new(Arc::new(rules))),
            store: None,
            edit_lock: Arc::new(Mutex::new(())),
            normalize_on_load: true,
        }
    }

    /// Creates state serving `rules`, persisting edits to `store`.
    pub fn with_store(rules: RuleSet, store: RuleStore, normalize_on_load: bool) -> Self {
        Self {
            store: Some(Arc::new(store)),
            normalize_on_load,
            ..Self::new(rules)
        }
    }

    /// Returns a snapshot of the active rule set.
    pub fn rules(&self) -> Arc<RuleSet> {
        let guard = self.rules.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the active rule set, returning the previous one.
    pub fn swap_rules(&self, rules: RuleSet) -> Arc<RuleSet> {
        let mut guard = self.rules.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(rules))
    }

    /// The backing store, if one is configured.
    pub fn store(&self) -> Option<&RuleStore> {
        self.store.as_deref()
    }

    /// Applies `edit` to a copy of the active rule set, normalizes the
    /// result, persists it and makes it active.
    ///
    /// If `edit` or persisting fails the active set is left unchanged.
    pub async fn edit_rules<F>(&self, edit: F) -> EngineResult<RuleSetReview>
    where
        F: FnOnce(&mut RuleSet) -> EngineResult<()>,
    {
        let _guard = self.edit_lock.lock().await;

        let mut working = RuleSet::clone(&self.rules());
        edit(&mut working)?;

        let review = normalize_and_order(&working);
        self.commit(review.rules.clone()).await?;
        Ok(review)
    }

    /// Re-reads the rule set from the store and makes it active.
    ///
    /// Returns `Ok(None)` when no store is configured. On any load failure
    /// the previous rule set stays active.
    pub async fn reload_rules(&self) -> EngineResult<Option<Arc<RuleSet>>> {
        let Some(store) = self.store.as_ref() else {
            return Ok(None);
        };

        let _guard = self.edit_lock.lock().await;
        let normalize = self.normalize_on_load;
        let rules = run_blocking(store, move |store| store.load_active(normalize)).await?;
        self.swap_rules(rules);

        info!(path = %store.path().display(), "Reloaded rule set");
        Ok(Some(self.rules()))
    }

    async fn commit(&self, rules: RuleSet) -> EngineResult<()> {
        let rules = match self.store.as_ref() {
            Some(store) => {
                run_blocking(store, move |store| store.save(&rules).map(|()| rules)).await?
            }
            None => rules,
        };
        self.swap_rules(rules);
        Ok(())
    }
}

/// Runs a rule file operation on the blocking thread pool.
async fn run_blocking<T, F>(store: &Arc<RuleStore>, op: F) -> EngineResult<T>
where
    F: FnOnce(&RuleStore) -> EngineResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(store);
    let location = store.path().display().to_string();

    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| EngineError::ConfigIo {
            location,
            message: e.to_string(),
        })?
}
