//! State model and apply pipeline for a kitchen product configurator.
//!
//! A [`Configurator`] owns the selection state and keeps two things in step
//! with it: the surfaces of a 3D [`Viewer`] and the [`Projection`] every UI
//! surface renders from. The viewer and the asset source are traits so the
//! core runs headless.

pub mod app_dirs;
pub mod applier;
pub mod catalog;
pub mod category;
pub mod color;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod selection;
pub mod session;
pub mod sync;
pub mod viewer;

pub use applier::{ApplyOptions, ApplyOutcome, BindingError, VariantApplier};
pub use catalog::{Catalog, CatalogError, Named, ResourceRef, Variant};
pub use category::{Category, SelectionShape, SurfaceKind, UnknownCategory};
pub use color::{HexColor, InvalidColor};
pub use filter::{FilterQuery, filter};
pub use loader::{AssetError, AssetLoader, FsAssetLoader, MemoryAssetLoader, Resource};
pub use selection::{
    CurrentSelection, InvalidSelection, Selection, SelectionDefaults, SelectionState,
};
pub use session::{Configurator, Intent, StepError};
pub use sync::{
    ColorPicker, ImageRef, ListEntry, ListProjection, Projection, ProjectionSink, SummaryCard,
    ThumbnailStrip, ViewSynchronizer,
};
pub use viewer::{HeadlessViewer, SurfaceHandle, SurfaceState, Viewer, ViewerWrite};
