//! Resolution of resource references into resource data.
//!
//! The applier calls [`AssetLoader::resolve`] from worker threads, so
//! loaders must be `Send + Sync`. Decoding is left to the viewer.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::catalog::ResourceRef;

/// Raw bytes of a resolved resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub reference: ResourceRef,
    pub bytes: Arc<[u8]>,
}

impl Resource {
    pub fn new(reference: ResourceRef, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            reference,
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("resource '{reference}' was not found")]
    NotFound { reference: ResourceRef },

    #[error("failed to read resource '{reference}' from {}", path.display())]
    Io {
        reference: ResourceRef,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("resource '{reference}' escapes the asset root")]
    OutsideRoot { reference: ResourceRef },

    #[error("loader panicked while resolving '{reference}'")]
    LoaderPanicked { reference: ResourceRef },
}

pub trait AssetLoader: Send + Sync {
    fn resolve(&self, reference: &ResourceRef) -> Result<Resource, AssetError>;
}

impl<L: AssetLoader + ?Sized> AssetLoader for Arc<L> {
    fn resolve(&self, reference: &ResourceRef) -> Result<Resource, AssetError> {
        (**self).resolve(reference)
    }
}

/// Loads resources from files below a root directory and keeps every
/// successful read in memory.
///
/// References are web-style paths such as `/textures/floor/vogue.webp`; the
/// leading slash is relative to the root.
#[derive(Debug)]
pub struct FsAssetLoader {
    root: PathBuf,
    cache: Mutex<HashMap<ResourceRef, Resource>>,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, reference: &ResourceRef) -> Result<PathBuf, AssetError> {
        let relative = reference.as_str().trim_start_matches('/');
        let escapes = Path::new(relative)
            .components()
            .any(|component| !matches!(component, std::path::Component::Normal(_)));
        if relative.is_empty() || escapes {
            return Err(AssetError::OutsideRoot {
                reference: reference.clone(),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl AssetLoader for FsAssetLoader {
    fn resolve(&self, reference: &ResourceRef) -> Result<Resource, AssetError> {
        if let Ok(cache) = self.cache.lock()
            && let Some(resource) = cache.get(reference)
        {
            return Ok(resource.clone());
        }

        let path = self.path_for(reference)?;
        let bytes = fs::read(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                AssetError::NotFound {
                    reference: reference.clone(),
                }
            } else {
                AssetError::Io {
                    reference: reference.clone(),
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let resource = Resource::new(reference.clone(), bytes);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(reference.clone(), resource.clone());
        }
        Ok(resource)
    }
}

/// Serves resources registered up front. Unknown references are not found.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetLoader {
    entries: HashMap<ResourceRef, Arc<[u8]>>,
}

impl MemoryAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, reference: impl Into<ResourceRef>, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.insert(reference, bytes);
        self
    }

    pub fn insert(&mut self, reference: impl Into<ResourceRef>, bytes: impl Into<Arc<[u8]>>) {
        self.entries.insert(reference.into(), bytes.into());
    }
}

impl AssetLoader for MemoryAssetLoader {
    fn resolve(&self, reference: &ResourceRef) -> Result<Resource, AssetError> {
        self.entries
            .get(reference)
            .map(|bytes| Resource {
                reference: reference.clone(),
                bytes: Arc::clone(bytes),
            })
            .ok_or_else(|| AssetError::NotFound {
                reference: reference.clone(),
            })
    }
}
