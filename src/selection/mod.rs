//! The single source of truth for what is currently selected.
//!
//! All mutation goes through [`SelectionState::set_active_category`],
//! [`SelectionState::select_discrete`] and
//! [`SelectionState::set_continuous_color`]. Rejected calls leave the state
//! untouched.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::catalog::{Catalog, Variant};
use crate::category::{Category, SelectionShape};
use crate::color::{HexColor, InvalidColor};


/// Stored choice for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Discrete(usize),
    Continuous(HexColor),
}

/// Resolved view of a [`Selection`] against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentSelection<'a> {
    Variant { index: usize, variant: &'a Variant },
    Color(HexColor),
}

impl CurrentSelection<'_> {
    /// Display value used by labels: the variant name or the upper-case hex.
    pub fn display_value(&self) -> String {
        match self {
            CurrentSelection::Variant { variant, .. } => variant.name.clone(),
            CurrentSelection::Color(color) => color.to_display(),
        }
    }

    pub fn variant_name(&self) -> Option<&str> {
        match self {
            CurrentSelection::Variant { variant, .. } => Some(variant.name.as_str()),
            CurrentSelection::Color(_) => None,
        }
    }
}

/// Why a mutation was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidSelection {
    #[error("{category} has no variant named '{name}'")]
    UnknownVariant { category: Category, name: String },

    #[error("{category} is not chosen from a list")]
    NotDiscrete { category: Category },

    #[error("{category} does not take a custom colour")]
    NotContinuous { category: Category },

    #[error(transparent)]
    Color(#[from] InvalidColor),
}

/// Colours used when a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionDefaults {
    pub category: Category,
    pub cupboards_colour: HexColor,
    pub wall_colour: HexColor,
}

impl SelectionDefaults {
    pub const CUPBOARDS_COLOUR: HexColor = HexColor::from_rgb(0xd3, 0xd3, 0xd3);
    pub const WALL_COLOUR: HexColor = HexColor::from_rgb(0xff, 0xff, 0xff);

    /// Default colour remembered for `category` before anything is picked.
    fn colour_for(&self, category: Category) -> HexColor {
        match category {
            Category::WallColour => self.wall_colour,
            _ => self.cupboards_colour,
        }
    }
}

impl Default for SelectionDefaults {
    fn default() -> Self {
        Self {
            category: Category::Floor,
            cupboards_colour: Self::CUPBOARDS_COLOUR,
            wall_colour: Self::WALL_COLOUR,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectionState {
    catalog: Arc<Catalog>,
    active: Category,
    selections: HashMap<Category, Selection>,
    /// Last custom colour per category, kept while a swatch is selected so
    /// the picker can reopen on it.
    custom_colours: HashMap<Category, HexColor>,
}

impl SelectionState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_defaults(catalog, SelectionDefaults::default())
    }

    pub fn with_defaults(catalog: Arc<Catalog>, defaults: SelectionDefaults) -> Self {
        let mut selections = HashMap::new();
        let mut custom_colours = HashMap::new();
        for category in Category::ALL {
            let colour = defaults.colour_for(category);
            let selection = match category.shape() {
                SelectionShape::Discrete | SelectionShape::Swatch => Selection::Discrete(0),
                SelectionShape::Continuous => Selection::Continuous(colour),
            };
            if category.shape().accepts_continuous() {
                custom_colours.insert(category, colour);
            }
            selections.insert(category, selection);
        }

        Self {
            catalog,
            active: defaults.category,
            selections,
            custom_colours,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn active_category(&self) -> Category {
        self.active
    }

    pub fn set_active_category(&mut self, category: Category) {
        self.active = category;
    }

    /// Select `name` in `category`. The index is always taken from the
    /// unfiltered catalog list so clearing a search never changes the pick.
    pub fn select_discrete(
        &mut self,
        category: Category,
        name: &str,
    ) -> Result<Selection, InvalidSelection> {
        if !category.shape().accepts_discrete() {
            return Err(InvalidSelection::NotDiscrete { category });
        }
        let index = self.catalog.position(category, name).ok_or_else(|| {
            InvalidSelection::UnknownVariant {
                category,
                name: name.to_string(),
            }
        })?;

        let selection = Selection::Discrete(index);
        self.selections.insert(category, selection);
        Ok(selection)
    }

    /// Store a custom colour for `category`. Only a strict `#rrggbb` value is
    /// accepted; it is stored lower-case.
    pub fn set_continuous_color(
        &mut self,
        category: Category,
        hex: &str,
    ) -> Result<Selection, InvalidSelection> {
        if !category.shape().accepts_continuous() {
            return Err(InvalidSelection::NotContinuous { category });
        }
        let color = HexColor::parse(hex)?;

        let selection = Selection::Continuous(color);
        self.selections.insert(category, selection);
        self.custom_colours.insert(category, color);
        Ok(selection)
    }

    /// Raw stored selection for `category`.
    pub fn selection(&self, category: Category) -> Selection {
        match self.selections.get(&category) {
            Some(selection) => *selection,
            None => Selection::Discrete(0),
        }
    }

    /// Resolve the selection for `category` against the catalog.
    ///
    /// A discrete index is clamped into its list. A category with an empty
    /// list never holds a discrete selection, so the colour fallback only
    /// guards against a hand-built catalog that breaks that rule.
    pub fn current(&self, category: Category) -> CurrentSelection<'_> {
        match self.selection(category) {
            Selection::Discrete(index) => {
                let list = self.catalog.list_for(category);
                match self.catalog.variant_clamped(category, index) {
                    Some(variant) => CurrentSelection::Variant {
                        index: index.min(list.len().saturating_sub(1)),
                        variant,
                    },
                    None => CurrentSelection::Color(self.custom_colour(category)),
                }
            }
            Selection::Continuous(color) => CurrentSelection::Color(color),
        }
    }

    /// Last custom colour picked for `category`, or its default.
    pub fn custom_colour(&self, category: Category) -> HexColor {
        self.custom_colours
            .get(&category)
            .copied()
            .unwrap_or_else(|| SelectionDefaults::default().colour_for(category))
    }
}
