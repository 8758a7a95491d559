//! Read-only variant lists for every category.
//!
//! A [`Catalog`] is validated once when it is built and never changes
//! afterwards, which lets the selection state treat every discrete list as
//! non-empty and every swatch as a valid colour.

mod error;
mod variant;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::category::{Category, SurfaceKind};
use crate::color::HexColor;

pub use error::CatalogError;
pub use variant::{Named, ResourceRef, Variant};
use variant::VariantRecord;

const BUILTIN_KITCHEN: &str = include_str!("../../assets/catalog/kitchen.toml");

#[derive(Debug, Clone)]
pub struct Catalog {
    lists: HashMap<Category, Vec<Variant>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CatalogFile {
    floor: Vec<VariantRecord>,
    worktop: Vec<VariantRecord>,
    backsplash: Vec<VariantRecord>,
    stools: Vec<VariantRecord>,
    wall_colour: Vec<VariantRecord>,
}

impl CatalogFile {
    fn into_lists(self) -> Vec<(Category, Vec<Variant>)> {
        let convert = |records: Vec<VariantRecord>| -> Vec<Variant> {
            records.into_iter().map(Variant::from).collect()
        };
        vec![
            (Category::Floor, convert(self.floor)),
            (Category::Worktop, convert(self.worktop)),
            (Category::Backsplash, convert(self.backsplash)),
            (Category::Stools, convert(self.stools)),
            (Category::WallColour, convert(self.wall_colour)),
        ]
    }
}

impl Catalog {
    /// Build a catalog from per-category lists. Categories that are missing
    /// from `lists` are treated as empty.
    pub fn new<I>(lists: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (Category, Vec<Variant>)>,
    {
        let mut map: HashMap<Category, Vec<Variant>> = lists.into_iter().collect();
        for category in Category::ALL {
            let list = map.entry(category).or_default();
            validate(category, list)?;
        }
        Ok(Self { lists: map })
    }

    /// The kitchen catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_KITCHEN)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(source)?;
        Self::new(file.into_lists())
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let source = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Ordered variants of `category`. Empty only for continuous categories.
    pub fn list_for(&self, category: Category) -> &[Variant] {
        self.lists
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Position of `name` in the unfiltered list of `category`.
    pub fn position(&self, category: Category, name: &str) -> Option<usize> {
        self.list_for(category)
            .iter()
            .position(|variant| variant.name == name)
    }

    /// Variant at `index`, clamped into the list. `None` only for an empty
    /// list.
    pub fn variant_clamped(&self, category: Category, index: usize) -> Option<&Variant> {
        let list = self.list_for(category);
        let last = list.len().checked_sub(1)?;
        list.get(index.min(last))
    }

    /// Colour carried by a shared-material swatch.
    pub fn swatch_color(variant: &Variant) -> Option<HexColor> {
        HexColor::parse(variant.resource.as_str()).ok()
    }
}

fn validate(category: Category, list: &[Variant]) -> Result<(), CatalogError> {
    if category.shape().accepts_discrete() && list.is_empty() {
        return Err(CatalogError::EmptyCategory { category });
    }
    if !category.shape().accepts_discrete() && !list.is_empty() {
        return Err(CatalogError::UnexpectedVariants { category });
    }

    let mut seen = HashSet::new();
    for variant in list {
        if variant.name.trim().is_empty() {
            return Err(CatalogError::EmptyName { category });
        }
        if !seen.insert(variant.name.as_str()) {
            return Err(CatalogError::DuplicateVariant {
                category,
                name: variant.name.clone(),
            });
        }
        if category.surface_kind() == SurfaceKind::SharedMaterial {
            HexColor::parse(variant.resource.as_str()).map_err(|source| {
                CatalogError::InvalidSwatch {
                    category,
                    name: variant.name.clone(),
                    source,
                }
            })?;
        }
    }
    Ok(())
}
