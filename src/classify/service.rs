//! Identification service: model lifecycle and request routing.
//!
//! Owns the load/ready/fallback state machine and decides, per request,
//! whether the primary model path is attempted before the heuristic
//! scorer picks the species. Neither `load` nor `identify` ever surfaces an
//! error to the caller; failures degrade to fallback behavior and are logged.

use super::primary::{OnnxPredictor, Predictor};
use super::scorer::score;
use super::selector::{confidence, select};
use super::{Identification, IdentifyOptions};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::imaging::{PixelBuffer, extract};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Lifecycle state of the classification service.
///
/// Transitions are monotonic: `Uninitialized -> Loading -> ReadyPrimary`
/// or `-> ReadyFallback`. A failed load lands in `ReadyFallback`, which is
/// terminal for the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierState {
    /// No load has been requested yet.
    Uninitialized,
    /// A load attempt is in flight.
    Loading,
    /// The primary model is available.
    ReadyPrimary,
    /// The primary model is unavailable; the heuristic path is used
    /// exclusively.
    ReadyFallback,
}

/// Produces the primary predictor on demand. Invoked at most once per
/// service instance.
pub type PredictorLoader = dyn Fn() -> Result<Box<dyn Predictor>> + Send + Sync;

/// The species identification service.
///
/// Constructed once by the composition root and shared by reference; holds
/// no global state.
pub struct Identifier {
    catalog: Catalog,
    options: IdentifyOptions,
    loader: Arc<PredictorLoader>,
    primary: OnceCell<Option<Box<dyn Predictor>>>,
    state: RwLock<ClassifierState>,
}

impl Identifier {
    /// Build a service over a catalog, loading the primary model from
    /// `model_path` on first use. `None` skips the primary path entirely.
    pub fn new(catalog: Catalog, options: IdentifyOptions, model_path: Option<PathBuf>) -> Self {
        let loader: Arc<PredictorLoader> = match model_path {
            Some(path) => Arc::new(move || {
                OnnxPredictor::load(&path).map(|p| Box::new(p) as Box<dyn Predictor>)
            }),
            None => Arc::new(|| Err(Error::ModelNotConfigured)),
        };
        Self::with_loader(catalog, options, loader)
    }

    /// Build a service with a custom predictor loader.
    pub fn with_loader(
        catalog: Catalog,
        options: IdentifyOptions,
        loader: Arc<PredictorLoader>,
    ) -> Self {
        Self {
            catalog,
            options,
            loader,
            primary: OnceCell::new(),
            state: RwLock::new(ClassifierState::Uninitialized),
        }
    }

    /// Load the primary model.
    ///
    /// Idempotent and memoized: at most one load attempt is ever in flight,
    /// and every concurrent caller awaits that attempt's single outcome.
    /// Never errors; a failed acquisition leaves the service in fallback
    /// state.
    pub async fn load(&self) {
        self.primary.get_or_init(|| self.acquire_primary()).await;
    }

    async fn acquire_primary(&self) -> Option<Box<dyn Predictor>> {
        self.set_state(ClassifierState::Loading);

        let loader = Arc::clone(&self.loader);
        match tokio::task::spawn_blocking(move || loader()).await {
            Ok(Ok(predictor)) => {
                info!("Primary model ready");
                self.set_state(ClassifierState::ReadyPrimary);
                Some(predictor)
            }
            Ok(Err(e)) => {
                warn!("Primary model unavailable, using heuristic classifier: {e}");
                self.set_state(ClassifierState::ReadyFallback);
                None
            }
            Err(e) => {
                warn!("Model load task failed, using heuristic classifier: {e}");
                self.set_state(ClassifierState::ReadyFallback);
                None
            }
        }
    }

    /// Identify the species in a decoded image.
    ///
    /// Loads the model first if no load has completed yet. Attempts the
    /// primary path when it is available; a per-request inference failure
    /// falls back to the heuristic path for that request only. Never errors
    /// and never panics, whatever the buffer contents.
    pub async fn identify(&self, image: &PixelBuffer) -> Identification {
        self.load().await;

        if let Some(Some(predictor)) = self.primary.get() {
            match predictor.predict(image) {
                Ok(raw) => {
                    // The model's class space does not map onto the catalog;
                    // the prediction gates nothing beyond this attempt.
                    debug!(
                        "Primary model proposed class {} (p={:.3}); selecting species heuristically",
                        raw.class_index, raw.probability
                    );
                }
                Err(e) => {
                    warn!("Primary inference failed for this image, using heuristic path: {e}");
                }
            }
        }

        self.heuristic_identify(image)
    }

    /// Run the heuristic path: color profile -> weights -> proportional draw.
    fn heuristic_identify(&self, image: &PixelBuffer) -> Identification {
        let profile = extract(image);
        let mut rng = rand::thread_rng();

        let entries = score(&profile, &self.catalog, &mut rng);
        let total: f64 = entries.iter().map(|e| e.weight).sum();

        match select(&entries, self.catalog.len(), &mut rng) {
            Some(index) => {
                let weight = entries
                    .iter()
                    .find(|e| e.index == index)
                    .map_or(0.0, |e| e.weight);
                let confidence = confidence(
                    self.options.confidence_policy,
                    weight,
                    total,
                    self.options.confidence_floor,
                    self.options.confidence_span,
                    &mut rng,
                );
                Identification {
                    species: Some(self.catalog.records()[index].clone()),
                    confidence,
                }
            }
            None => Identification::none(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ClassifierState {
        self.state
            .read()
            .map_or(ClassifierState::ReadyFallback, |guard| *guard)
    }

    /// Whether the primary model loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.state() == ClassifierState::ReadyPrimary
    }

    /// Whether the service is operating on the heuristic path exclusively.
    pub fn is_fallback(&self) -> bool {
        self.state() == ClassifierState::ReadyFallback
    }

    /// The catalog this service selects from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn set_state(&self, next: ClassifierState) {
        if let Ok(mut guard) = self.state.write() {
            *guard = next;
        }
    }
}
