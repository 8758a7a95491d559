use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// One customisable aspect of the kitchen.
///
/// The set is closed: every per-category decision in the crate is an
/// exhaustive `match`, so adding a variant here surfaces every place that
/// needs to learn about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Floor,
    Worktop,
    Cupboards,
    Backsplash,
    Stools,
    WallColour,
}

/// How a category's selection is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionShape {
    /// Pick one entry of the catalog list.
    Discrete,
    /// Pick any colour; the catalog list is unused.
    Continuous,
    /// Pick a named swatch or fall back to a custom colour.
    Swatch,
}

impl SelectionShape {
    pub fn accepts_discrete(self) -> bool {
        matches!(self, Self::Discrete | Self::Swatch)
    }

    pub fn accepts_continuous(self) -> bool {
        matches!(self, Self::Continuous | Self::Swatch)
    }
}

/// What kind of viewer handle a category writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// A texture map replaced with a resolved resource.
    Texture,
    /// A baked material whose base colour is tinted.
    Tint,
    /// One material shared by every named swatch.
    SharedMaterial,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 6] = [
        Category::Floor,
        Category::Worktop,
        Category::Cupboards,
        Category::Backsplash,
        Category::Stools,
        Category::WallColour,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Floor => "Floor",
            Category::Worktop => "Worktop",
            Category::Cupboards => "Cupboards",
            Category::Backsplash => "Backsplash",
            Category::Stools => "Stools",
            Category::WallColour => "Wall Colour",
        }
    }

    /// Snake-case key used in catalog files and settings.
    pub fn key(self) -> &'static str {
        match self {
            Category::Floor => "floor",
            Category::Worktop => "worktop",
            Category::Cupboards => "cupboards",
            Category::Backsplash => "backsplash",
            Category::Stools => "stools",
            Category::WallColour => "wall_colour",
        }
    }

    /// Default viewer surface key; meshes whose name contains it are bound.
    pub fn surface_key(self) -> &'static str {
        match self {
            Category::Floor => "Kitchen_Floor",
            Category::Worktop => "Kitchen_Worktop",
            Category::Cupboards => "Kitchen_Cupboards",
            Category::Backsplash => "Kitchen_Backsplash",
            Category::Stools => "Kitchen_Stools",
            Category::WallColour => "Kitchen_Walls",
        }
    }

    pub fn shape(self) -> SelectionShape {
        match self {
            Category::Floor | Category::Worktop | Category::Backsplash | Category::Stools => {
                SelectionShape::Discrete
            }
            Category::Cupboards => SelectionShape::Continuous,
            Category::WallColour => SelectionShape::Swatch,
        }
    }

    pub fn surface_kind(self) -> SurfaceKind {
        match self {
            Category::Floor | Category::Worktop | Category::Backsplash | Category::Stools => {
                SurfaceKind::Texture
            }
            Category::Cupboards => SurfaceKind::Tint,
            Category::WallColour => SurfaceKind::SharedMaterial,
        }
    }

    /// Title shown by the summary card when a custom colour is active.
    pub fn custom_colour_title(self) -> &'static str {
        match self {
            Category::WallColour => "Custom wall colour",
            _ => "Custom colour",
        }
    }

    /// Prompt shown above the colour picker.
    pub fn picker_prompt(self) -> &'static str {
        match self {
            Category::Cupboards => "Choose any cupboard colour",
            Category::WallColour => "Choose any wall colour",
            Category::Floor | Category::Worktop | Category::Backsplash | Category::Stools => {
                "Choose a colour"
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match compact.as_str() {
            "floor" => Ok(Category::Floor),
            "worktop" => Ok(Category::Worktop),
            "cupboards" | "cupboard" => Ok(Category::Cupboards),
            "backsplash" => Ok(Category::Backsplash),
            "stools" | "stool" => Ok(Category::Stools),
            "wallcolour" | "wallcolor" | "wall" => Ok(Category::WallColour),
            _ => Err(UnknownCategory(s.trim().to_string())),
        }
    }
}
