//! The dashboard session: current selection plus its derived views.
//!
//! [`Dashboard`] is the single mutator of selection state. Each
//! [`Dashboard::dispatch`] reduces the action into a new
//! [`SelectionState`], recomputes the whole [`ViewBundle`] synchronously,
//! and publishes the result as a [`Snapshot`] on a watch channel.
//! Renderers subscribe and redraw whenever the channel changes.

use std::sync::Arc;
use std::time::Instant;

use crime_dashboard_analytics::{AggregationOptions, choropleth};
use crime_dashboard_analytics_models::{AreaShade, SelectionAction, SelectionState, ViewBundle};
use crime_dashboard_geography_models::SocioEconomicEntry;
use serde::Serialize;
use tokio::sync::watch;

use crate::{DashboardConfig, DashboardError, RecordStore, loader};

/// A selection together with the views computed from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// The selection the bundle was computed for.
    pub selection: SelectionState,
    /// The computed views.
    pub bundle: ViewBundle,
}

/// A loaded dashboard.
#[derive(Debug)]
pub struct Dashboard {
    store: Arc<RecordStore>,
    options: AggregationOptions,
    selection: SelectionState,
    tx: watch::Sender<Arc<Snapshot>>,
}

impl Dashboard {
    /// Creates a session over an already-loaded store, with nothing
    /// selected.
    #[must_use]
    pub fn new(store: RecordStore, options: AggregationOptions) -> Self {
        let store = Arc::new(store);
        let selection = SelectionState::default();
        let snapshot = compute(&store, &selection, &options);
        let (tx, _rx) = watch::channel(Arc::new(snapshot));

        Self {
            store,
            options,
            selection,
            tx,
        }
    }

    /// Loads every dataset named by `config` and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] if any dataset fails to load. There is no
    /// partially loaded dashboard.
    pub async fn load(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let store = loader::load_store(config).await.inspect_err(|e| {
            log::error!("Dashboard failed to load: {e}");
        })?;
        Ok(Self::new(store, config.aggregation.clone()))
    }

    /// The immutable record store.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The current selection.
    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.tx.borrow())
    }

    /// Subscribes to snapshots. The receiver sees every snapshot published
    /// after this call; the current one is available immediately via
    /// [`watch::Receiver::borrow`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.tx.subscribe()
    }

    /// Applies a gesture, recomputes every view, and publishes the result.
    pub fn dispatch(&mut self, action: &SelectionAction) -> Arc<Snapshot> {
        self.selection = self.selection.apply(action);
        log::debug!("{action:?} -> {:?}", self.selection);

        let snapshot = Arc::new(compute(&self.store, &self.selection, &self.options));
        self.tx.send_replace(Arc::clone(&snapshot));
        snapshot
    }

    /// Socio-economic profile for the selected area, if any.
    #[must_use]
    pub fn socio_profile(&self) -> Option<&SocioEconomicEntry> {
        self.store.socio_profile(&self.selection.area)
    }

    /// Map shading for every boundary feature under the current snapshot.
    #[must_use]
    pub fn area_shades(&self) -> Vec<AreaShade> {
        let snapshot = self.snapshot();
        choropleth::shade_areas(self.store.boundary(), &snapshot.bundle, &snapshot.selection)
    }
}

fn compute(store: &RecordStore, selection: &SelectionState, options: &AggregationOptions) -> Snapshot {
    let start = Instant::now();
    let bundle = store.view(selection, options);
    log::debug!(
        "Recomputed views over {} records in {:?}",
        store.incidents().len(),
        start.elapsed()
    );

    Snapshot {
        selection: selection.clone(),
        bundle,
    }
}
