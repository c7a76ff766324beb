//! The explore page session.
//!
//! One [`ExploreSession`] exists per visit of the page. It owns the catalog,
//! the saved set, the last known position and both surfaces, and is the only
//! thing that mutates them.

use std::sync::Arc;

use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::discovery;
use crate::errors::AppError;
use crate::gateway::{CachedLocator, Gateway, Locator};
use crate::models::{CategoryFilter, Coordinate, LandmarkId, LandmarkRecord};
use crate::presentation::{ListSurface, MapSurface, PresentationSync, USER_ZOOM};
use crate::saved::{SaveState, SavedLocationBridge, SavedSet};

/// Issued when a fetch starts; only the latest ticket may update the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchTicket {
    generation: u64,
    origin: Coordinate,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }
}

/// What happened to the result of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Catalog replaced; number of landmarks kept
    Applied(usize),
    /// A newer fetch was issued meanwhile; result discarded
    Stale,
    /// The POI query failed; previous catalog kept
    Failed,
}

pub struct ExploreSession<M, L> {
    id: Uuid,
    config: Arc<Config>,
    gateway: Gateway,
    bridge: SavedLocationBridge,
    locator: CachedLocator,
    catalog: Catalog,
    saved: SavedSet,
    position: Option<Coordinate>,
    presenter: PresentationSync<M, L>,
    generation: u64,
}

impl<M: MapSurface, L: ListSurface> ExploreSession<M, L> {
    pub fn new(
        config: Arc<Config>,
        locator: Box<dyn Locator>,
        map: M,
        list: L,
    ) -> Result<Self, AppError> {
        let gateway = Gateway::new(config.clone())?;
        let bridge = SavedLocationBridge::new(gateway.client().clone(), &config);
        let locator = CachedLocator::new(locator, config.position_max_age);
        let id = Uuid::new_v4();
        tracing::info!(session = %id, "Explore session created");

        Ok(Self {
            id,
            config,
            gateway,
            bridge,
            locator,
            catalog: Catalog::new(),
            saved: SavedSet::new(),
            position: None,
            presenter: PresentationSync::new(map, list),
            generation: 0,
        })
    }

    /// Page entry: load bookmarks, then locate and discover.
    pub async fn enter(&mut self) -> Result<FetchOutcome, AppError> {
        self.load_saved().await;
        self.locate_and_discover().await
    }

    /// Load the saved set; a failure leaves it empty.
    #[tracing::instrument(skip_all, fields(session = %self.id))]
    pub async fn load_saved(&mut self) {
        match self.bridge.load_saved().await {
            Ok(saved) => self.saved = saved,
            Err(e) => tracing::warn!("Could not load saved locations: {}", e),
        }
    }

    /// Ask for the device position and move the map there.
    #[tracing::instrument(skip_all, fields(session = %self.id))]
    pub async fn locate(&mut self) -> Result<Coordinate, AppError> {
        self.presenter.set_location_label("Getting your location...");
        self.presenter.show_loading();

        match self.gateway.locate(&self.locator).await {
            Ok(position) => {
                let at = position.coordinate;
                self.position = Some(at);
                self.presenter.show_user(at, USER_ZOOM);
                let label = self.gateway.location_label(at).await;
                self.presenter.set_location_label(&label);
                tracing::info!("Located at {:?} ({})", at, label);
                Ok(at)
            }
            Err(cause) => {
                self.presenter.set_location_label("Location unavailable");
                self.presenter.show_error(cause.user_message());
                Err(cause.into())
            }
        }
    }

    pub async fn locate_and_discover(&mut self) -> Result<FetchOutcome, AppError> {
        let at = self.locate().await?;
        Ok(self.discover_at(at).await)
    }

    /// Re-query around the known position, locating first if there is none.
    pub async fn refresh(&mut self) -> Result<FetchOutcome, AppError> {
        match self.position {
            Some(at) => Ok(self.discover_at(at).await),
            None => self.locate_and_discover().await,
        }
    }

    /// Run a full discovery around `origin` and apply it.
    pub async fn discover_at(&mut self, origin: Coordinate) -> FetchOutcome {
        let ticket = self.begin_fetch(origin);
        let result = discovery::discover(&self.gateway, origin, self.config.radius_m).await;
        self.complete_fetch(ticket, result)
    }

    /// Start a fetch: bump the generation and show the loading state.
    pub fn begin_fetch(&mut self, origin: Coordinate) -> FetchTicket {
        self.generation += 1;
        self.presenter.show_loading();
        FetchTicket {
            generation: self.generation,
            origin,
        }
    }

    /// Apply a fetch result if `ticket` is still the latest one issued.
    #[tracing::instrument(skip_all, fields(session = %self.id, generation = ticket.generation))]
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<LandmarkRecord>, AppError>,
    ) -> FetchOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding fetch {} superseded by {}",
                ticket.generation,
                self.generation
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(records) => {
                self.catalog.load(records);
                self.presenter.render(&self.catalog, &self.saved);
                FetchOutcome::Applied(self.catalog.all().len())
            }
            Err(e) => {
                tracing::warn!("Landmark fetch failed: {}", e);
                self.presenter.show_error(&e.user_message());
                FetchOutcome::Failed
            }
        }
    }

    pub fn apply_filter(&mut self, filter: CategoryFilter) {
        self.catalog.apply_filter(filter);
        self.presenter.render(&self.catalog, &self.saved);
    }

    pub fn select(&mut self, id: &LandmarkId) -> bool {
        self.presenter.select(id)
    }

    /// Save or unsave a displayed landmark.
    ///
    /// Failures are reported through the list surface and leave both the
    /// saved set and the affordance unchanged.
    #[tracing::instrument(skip_all, fields(session = %self.id, landmark = %id))]
    pub async fn toggle_save(&mut self, id: &LandmarkId) -> Result<SaveState, AppError> {
        let Some(record) = self.catalog.find(id).cloned() else {
            return Err(AppError::Internal(format!("Landmark {} is not displayed", id)));
        };

        match self.bridge.toggle_save(&mut self.saved, &record).await {
            Ok(state) => {
                self.presenter.update_affordance(id, state);
                Ok(state)
            }
            Err(e) => {
                self.presenter.notify(&e.user_message());
                Err(e)
            }
        }
    }

    /// Page exit: remove every marker and hand the surfaces back.
    pub fn leave(mut self) -> (M, L) {
        self.presenter.clear();
        tracing::info!(session = %self.id, "Explore session closed");
        self.presenter.into_surfaces()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn saved(&self) -> &SavedSet {
        &self.saved
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub fn presenter(&self) -> &PresentationSync<M, L> {
        &self.presenter
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }
}
