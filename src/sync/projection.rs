use serde::Serialize;

use crate::catalog::ResourceRef;
use crate::category::Category;
use crate::color::HexColor;

/// Everything the UI surfaces render, derived in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub category: Category,
    pub query: String,
    pub list: ListProjection,
    pub thumbnails: ThumbnailStrip,
    /// Custom colour entry offered next to named swatches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picker: Option<ColorPicker>,
    pub summary: SummaryCard,
    pub label: String,
    /// One label per category, in category order.
    pub overview: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageRef {
    Thumbnail { reference: ResourceRef },
    Resource { reference: ResourceRef },
    Swatch { color: HexColor },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub name: String,
    /// Position in the unfiltered catalog list.
    pub index: usize,
    pub category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorPicker {
    pub title: &'static str,
    pub prompt: &'static str,
    pub value: HexColor,
    /// The custom colour is the current selection.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListProjection {
    Entries { entries: Vec<ListEntry> },
    NoResults { query: String },
    ColorPicker { picker: ColorPicker },
}

impl ListProjection {
    pub fn entries(&self) -> &[ListEntry] {
        match self {
            ListProjection::Entries { entries } => entries,
            ListProjection::NoResults { .. } | ListProjection::ColorPicker { .. } => &[],
        }
    }

    pub fn selected(&self) -> Option<&ListEntry> {
        self.entries().iter().find(|entry| entry.selected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThumbnailStrip {
    Thumbnails { entries: Vec<ListEntry> },
    NoResults { query: String },
    Hidden,
}

impl ThumbnailStrip {
    pub fn entries(&self) -> &[ListEntry] {
        match self {
            ThumbnailStrip::Thumbnails { entries } => entries,
            ThumbnailStrip::NoResults { .. } | ThumbnailStrip::Hidden => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}
