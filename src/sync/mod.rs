//! Derivation of every UI surface from the selection state.
//!
//! [`ViewSynchronizer::project`] is the only place a surface's content is
//! computed, so the list, the thumbnail strip, the summary card and the
//! labels can never disagree about what is selected.

mod projection;

#[cfg(test)]
mod tests;

use crate::catalog::{Catalog, Variant};
use crate::category::{Category, SelectionShape};
use crate::filter::{FilterQuery, filter};
use crate::selection::{CurrentSelection, SelectionState};

pub use projection::{
    ColorPicker, ImageRef, ListEntry, ListProjection, Projection, SummaryCard, ThumbnailStrip,
};

/// A UI surface that re-renders from a [`Projection`].
pub trait ProjectionSink {
    fn render(&mut self, projection: &Projection);
}

impl<F> ProjectionSink for F
where
    F: FnMut(&Projection),
{
    fn render(&mut self, projection: &Projection) {
        self(projection)
    }
}

/// Keeps registered surfaces in step with the state.
///
/// Sinks are only called when the projection differs from the one they last
/// saw, so refreshing twice in a row is invisible to them.
#[derive(Default)]
pub struct ViewSynchronizer {
    last: Option<Projection>,
    sinks: Vec<Box<dyn ProjectionSink>>,
}

impl ViewSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface. It receives the last projection straight away if
    /// one exists.
    pub fn subscribe(&mut self, mut sink: Box<dyn ProjectionSink>) {
        if let Some(last) = &self.last {
            sink.render(last);
        }
        self.sinks.push(sink);
    }

    pub fn last(&self) -> Option<&Projection> {
        self.last.as_ref()
    }

    /// Recompute and notify sinks if anything changed. Returns `true` when
    /// the sinks were notified.
    pub fn refresh(&mut self, state: &SelectionState, query: &FilterQuery) -> bool {
        let projection = Self::project(state, query);
        if self.last.as_ref() == Some(&projection) {
            return false;
        }

        for sink in &mut self.sinks {
            sink.render(&projection);
        }
        self.last = Some(projection);
        true
    }

    /// Build the projection for the active category.
    pub fn project(state: &SelectionState, query: &FilterQuery) -> Projection {
        let category = state.active_category();
        let catalog = state.catalog();
        let current = state.current(category);

        let (list, thumbnails) = match category.shape() {
            SelectionShape::Continuous => (
                ListProjection::ColorPicker {
                    picker: picker(state, category),
                },
                ThumbnailStrip::Hidden,
            ),
            SelectionShape::Discrete | SelectionShape::Swatch => {
                let entries = entries(catalog, category, current, query);
                if entries.is_empty() {
                    let query = query.as_str().trim().to_string();
                    (
                        ListProjection::NoResults {
                            query: query.clone(),
                        },
                        ThumbnailStrip::NoResults { query },
                    )
                } else {
                    let strip: Vec<ListEntry> = entries
                        .iter()
                        .filter(|entry| entry.image.is_some())
                        .cloned()
                        .collect();
                    let thumbnails = if strip.is_empty() {
                        ThumbnailStrip::NoResults {
                            query: query.as_str().trim().to_string(),
                        }
                    } else {
                        ThumbnailStrip::Thumbnails { entries: strip }
                    };
                    (ListProjection::Entries { entries }, thumbnails)
                }
            }
        };

        let custom = (category.shape() == SelectionShape::Swatch).then(|| picker(state, category));

        Projection {
            category,
            query: query.as_str().to_string(),
            list,
            thumbnails,
            picker: custom,
            summary: summary(category, current),
            label: label(category, current),
            overview: Category::ALL
                .into_iter()
                .map(|category| label(category, state.current(category)))
                .collect(),
        }
    }
}

fn picker(state: &SelectionState, category: Category) -> ColorPicker {
    let active = matches!(state.current(category), CurrentSelection::Color(_));
    ColorPicker {
        title: category.custom_colour_title(),
        prompt: category.picker_prompt(),
        value: state.custom_colour(category),
        active,
    }
}

fn entries(
    catalog: &Catalog,
    category: Category,
    current: CurrentSelection<'_>,
    query: &FilterQuery,
) -> Vec<ListEntry> {
    let selected = match current {
        CurrentSelection::Variant { index, .. } => Some(index),
        CurrentSelection::Color(_) => None,
    };

    filter(catalog.list_for(category), query.as_str())
        .into_iter()
        .filter_map(|variant| {
            let index = catalog.position(category, &variant.name)?;
            Some(ListEntry {
                name: variant.name.clone(),
                index,
                category: category.label(),
                image: image(category, variant),
                link: variant.link.clone(),
                selected: selected == Some(index),
            })
        })
        .collect()
}

/// Thumbnail first, then the resource itself, then the swatch colour.
fn image(category: Category, variant: &Variant) -> Option<ImageRef> {
    if let Some(thumbnail) = &variant.thumbnail {
        return Some(ImageRef::Thumbnail {
            reference: thumbnail.clone(),
        });
    }
    match category.shape() {
        SelectionShape::Swatch => {
            Catalog::swatch_color(variant).map(|color| ImageRef::Swatch { color })
        }
        SelectionShape::Discrete | SelectionShape::Continuous => Some(ImageRef::Resource {
            reference: variant.resource.clone(),
        }),
    }
}

fn summary(category: Category, current: CurrentSelection<'_>) -> SummaryCard {
    match current {
        CurrentSelection::Variant { variant, .. } => SummaryCard {
            title: variant.name.clone(),
            subtitle: category.label().to_string(),
            image: image(category, variant),
            colour: match category.shape() {
                SelectionShape::Swatch => Catalog::swatch_color(variant),
                SelectionShape::Discrete | SelectionShape::Continuous => None,
            },
            link: variant.link.clone(),
        },
        CurrentSelection::Color(color) => SummaryCard {
            title: category.custom_colour_title().to_string(),
            subtitle: category.label().to_string(),
            // Cupboards show their colour without a thumbnail.
            image: match category.shape() {
                SelectionShape::Continuous => None,
                SelectionShape::Discrete | SelectionShape::Swatch => {
                    Some(ImageRef::Swatch { color })
                }
            },
            colour: Some(color),
            link: None,
        },
    }
}

fn label(category: Category, current: CurrentSelection<'_>) -> String {
    format!("{}: {}", category.label(), current.display_value())
}
