use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::category::Category;
use crate::color::InvalidColor;

/// Problems found while building a [`Catalog`](super::Catalog).
///
/// These describe bad catalog content. The selection core assumes a valid
/// catalog and never recovers from these at runtime.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A category that is chosen from a list has no entries.
    #[error("catalog has no variants for {category}")]
    EmptyCategory { category: Category },

    /// A free-colour category was given list entries.
    #[error("{category} takes a free colour and cannot list variants")]
    UnexpectedVariants { category: Category },

    /// Two entries of one category share a display name.
    #[error("variant '{name}' appears more than once in {category}")]
    DuplicateVariant { category: Category, name: String },

    /// An entry has a blank display name.
    #[error("{category} contains a variant without a name")]
    EmptyName { category: Category },

    /// A shared-material swatch does not carry a usable colour.
    #[error("swatch '{name}' in {category} has an invalid colour")]
    InvalidSwatch {
        category: Category,
        name: String,
        #[source]
        source: InvalidColor,
    },

    #[error("failed to read catalog {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse catalog")]
    Parse(#[from] toml::de::Error),
}
