//! Turns committed selections into writes on the viewer.
//!
//! Colours are written straight away. Textures are resolved on a worker
//! thread per request and handed back over a channel; [`VariantApplier::pump`]
//! applies finished resolutions on the caller's thread, so the viewer is
//! only ever touched from there.
//!
//! Every apply stamps its category with a new generation. By default a
//! resolution that arrives after a newer request for the same category is
//! dropped, so the last selection issued is the one that ends up on screen
//! even if an older texture resolves later. With
//! [`ApplyOptions::discard_superseded`] turned off every resolution is
//! written in arrival order instead (last resolved wins).

mod binding;


use std::collections::HashMap;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::catalog::{Catalog, ResourceRef};
use crate::category::{Category, SurfaceKind};
use crate::loader::{AssetError, AssetLoader, Resource};
use crate::selection::CurrentSelection;
use crate::viewer::{SurfaceHandle, Viewer};

pub use binding::{BindingError, Bindings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Drop resolutions that were superseded by a newer request.
    pub discard_superseded: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            discard_superseded: true,
        }
    }
}

/// What [`VariantApplier::apply`] did with a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A colour was written to the surface.
    Written,
    /// A texture request was issued and will land on a later `pump`.
    Requested { generation: u64 },
    /// The category has no surface yet; nothing happened.
    Unbound,
    /// No resolver could be started. Requests already in flight stay valid.
    NotStarted,
}

struct Resolution {
    category: Category,
    generation: u64,
    target: SurfaceHandle,
    result: Result<Resource, AssetError>,
}

pub struct VariantApplier {
    loader: Arc<dyn AssetLoader>,
    options: ApplyOptions,
    bindings: Bindings,
    surface_keys: HashMap<Category, String>,
    generations: HashMap<Category, u64>,
    outstanding: usize,
    resolution_tx: Sender<Resolution>,
    resolution_rx: Receiver<Resolution>,
}

impl VariantApplier {
    pub fn new(loader: Arc<dyn AssetLoader>) -> Self {
        let (resolution_tx, resolution_rx) = mpsc::channel();
        Self {
            loader,
            options: ApplyOptions::default(),
            bindings: Bindings::default(),
            surface_keys: HashMap::new(),
            generations: HashMap::new(),
            outstanding: 0,
            resolution_tx,
            resolution_rx,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ApplyOptions) -> Self {
        self.options = options;
        self
    }

    /// Look `category` up under `key` instead of its default surface key.
    #[must_use]
    pub fn with_surface_key(mut self, category: Category, key: impl Into<String>) -> Self {
        self.surface_keys.insert(category, key.into());
        self
    }

    pub fn surface_key(&self, category: Category) -> &str {
        self.surface_keys
            .get(&category)
            .map(String::as_str)
            .unwrap_or_else(|| category.surface_key())
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn bind(&mut self, category: Category, target: SurfaceHandle) -> Result<(), BindingError> {
        self.bindings.bind(category, target)
    }

    /// Bind every category whose surface the viewer exposes. Missing surfaces
    /// are skipped with a warning; returns how many categories are bound.
    pub fn bind_viewer<V>(&mut self, viewer: &mut V) -> Result<usize, BindingError>
    where
        V: Viewer + ?Sized,
    {
        for category in Category::ALL {
            let key = self.surface_key(category).to_string();
            match viewer.surface(&key) {
                Some(target) => self.bind(category, target)?,
                None => log::warn!("viewer has no surface matching '{key}' for {category}"),
            }
        }
        Ok(self.bindings.len())
    }

    /// Latest generation issued for `category`; zero before the first apply.
    pub fn generation(&self, category: Category) -> u64 {
        self.generations.get(&category).copied().unwrap_or(0)
    }

    /// Texture requests that have not been pumped yet.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Push `current` onto the surface bound to `category`.
    pub fn apply<V>(
        &mut self,
        viewer: &mut V,
        category: Category,
        current: CurrentSelection<'_>,
    ) -> ApplyOutcome
    where
        V: Viewer + ?Sized,
    {
        let Some(target) = self.bindings.get(category) else {
            log::debug!("{category} is not bound yet; deferring apply");
            return ApplyOutcome::Unbound;
        };

        match (category.surface_kind(), current) {
            (_, CurrentSelection::Color(color)) => {
                self.next_generation(category);
                viewer.set_surface_color(target, color);
                ApplyOutcome::Written
            }
            (SurfaceKind::SharedMaterial, CurrentSelection::Variant { variant, .. }) => {
                self.next_generation(category);
                match Catalog::swatch_color(variant) {
                    Some(color) => viewer.set_surface_color(target, color),
                    None => log::warn!(
                        "swatch '{}' in {category} has no usable colour",
                        variant.name
                    ),
                }
                ApplyOutcome::Written
            }
            (
                SurfaceKind::Texture | SurfaceKind::Tint,
                CurrentSelection::Variant { variant, .. },
            ) => {
                let generation = self.generation(category).saturating_add(1);
                match self.request(category, generation, target, variant.resource.clone()) {
                    Ok(()) => {
                        self.generations.insert(category, generation);
                        ApplyOutcome::Requested { generation }
                    }
                    Err(err) => {
                        log::warn!("could not start resolver for {category}: {err}");
                        ApplyOutcome::NotStarted
                    }
                }
            }
        }
    }

    /// Apply every finished resolution. Returns the number of surfaces that
    /// were written.
    pub fn pump<V>(&mut self, viewer: &mut V) -> usize
    where
        V: Viewer + ?Sized,
    {
        let mut written = 0;
        loop {
            match self.resolution_rx.try_recv() {
                Ok(resolution) => {
                    if self.finish(viewer, resolution) {
                        written += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        written
    }

    /// Wait for outstanding requests, applying each as it arrives, until none
    /// remain or `timeout` elapses. Returns `true` when nothing is left.
    pub fn settle<V>(&mut self, viewer: &mut V, timeout: Duration) -> bool
    where
        V: Viewer + ?Sized,
    {
        let deadline = Instant::now() + timeout;
        while self.outstanding > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.resolution_rx.recv_timeout(remaining) {
                Ok(resolution) => {
                    self.finish(viewer, resolution);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.outstanding == 0
    }

    fn next_generation(&mut self, category: Category) -> u64 {
        let generation = self.generations.entry(category).or_insert(0);
        *generation = generation.saturating_add(1);
        *generation
    }

    /// Spawn a worker for `reference`. The worker always reports back, even
    /// when the loader panics, so `outstanding` cannot leak.
    fn request(
        &mut self,
        category: Category,
        generation: u64,
        target: SurfaceHandle,
        reference: ResourceRef,
    ) -> io::Result<()> {
        let loader = Arc::clone(&self.loader);
        let sender = self.resolution_tx.clone();
        thread::Builder::new()
            .name(format!("resolve-{}", category.key()))
            .spawn(move || {
                let resolved = panic::catch_unwind(AssertUnwindSafe(|| loader.resolve(&reference)));
                let result = match resolved {
                    Ok(result) => result,
                    Err(_) => Err(AssetError::LoaderPanicked { reference }),
                };
                let _ = sender.send(Resolution {
                    category,
                    generation,
                    target,
                    result,
                });
            })?;
        self.outstanding += 1;
        Ok(())
    }

    /// Returns `true` if the resolution was written to the viewer.
    fn finish<V>(&mut self, viewer: &mut V, resolution: Resolution) -> bool
    where
        V: Viewer + ?Sized,
    {
        self.outstanding = self.outstanding.saturating_sub(1);
        let Resolution {
            category,
            generation,
            target,
            result,
        } = resolution;

        if self.options.discard_superseded && generation < self.generation(category) {
            log::debug!(
                "dropping {category} resolution {generation}; {} is newer",
                self.generation(category)
            );
            return false;
        }
        if self.bindings.get(category) != Some(target) {
            log::warn!(
                "{category} moved off surface {} while resolving; dropping result",
                target.id()
            );
            return false;
        }

        match result {
            Ok(resource) => {
                viewer.set_surface_resource(target, &resource);
                true
            }
            Err(err) => {
                log::warn!("keeping previous {category} texture: {err}");
                false
            }
        }
    }
}
