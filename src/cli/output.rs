use std::fmt::Write;

use anyhow::Result;
use configurator::{Catalog, Category, ImageRef, ListProjection, Projection, ThumbnailStrip};
use serde_json::json;

use super::OutputFormat;
use crate::workflow::RunOutcome;

/// Print one projection in the chosen format.
pub(crate) fn print_projection(format: OutputFormat, projection: &Projection) -> Result<()> {
    match format {
        OutputFormat::Plain => print!("{}", format_projection_plain(projection)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(projection)?),
    }
    Ok(())
}

/// Print the final projection together with the viewer's surfaces.
pub(crate) fn print_outcome(format: OutputFormat, outcome: &RunOutcome) -> Result<()> {
    match format {
        OutputFormat::Plain => print!("{}", format_outcome_plain(outcome)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
    }
    Ok(())
}

pub(crate) fn print_catalog(format: OutputFormat, catalog: &Catalog) -> Result<()> {
    match format {
        OutputFormat::Plain => print!("{}", format_catalog_plain(catalog)),
        OutputFormat::Json => println!("{}", format_catalog_json(catalog)?),
    }
    Ok(())
}

pub(crate) fn format_projection_plain(projection: &Projection) -> String {
    let mut out = String::new();
    let query = projection.query.trim();
    if query.is_empty() {
        let _ = writeln!(out, "{}", projection.category.label());
    } else {
        let _ = writeln!(out, "{} (search: '{query}')", projection.category.label());
    }

    match &projection.list {
        ListProjection::Entries { entries } => {
            for entry in entries {
                let mark = if entry.selected { "x" } else { " " };
                let _ = write!(out, "  [{mark}] {}", entry.name);
                if let Some(image) = &entry.image {
                    let _ = write!(out, "  {}", describe_image(image));
                }
                if let Some(link) = &entry.link {
                    let _ = write!(out, "  {link}");
                }
                out.push('\n');
            }
        }
        ListProjection::NoResults { query } => {
            let _ = writeln!(out, "  no results for '{query}'");
        }
        ListProjection::ColorPicker { picker } => {
            let _ = writeln!(out, "  {}: {}", picker.prompt, picker.value);
        }
    }
    if let Some(picker) = &projection.picker {
        let mark = if picker.active { "x" } else { " " };
        let _ = writeln!(out, "  [{mark}] {}: {}", picker.title, picker.value);
    }

    let thumbnails = match &projection.thumbnails {
        ThumbnailStrip::Thumbnails { entries } if entries.is_empty() => "(none)".to_string(),
        ThumbnailStrip::Thumbnails { entries } => entries
            .iter()
            .map(|entry| {
                if entry.selected {
                    format!("*{}", entry.name)
                } else {
                    entry.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", "),
        ThumbnailStrip::NoResults { .. } => "no results".to_string(),
        ThumbnailStrip::Hidden => "hidden".to_string(),
    };
    let _ = writeln!(out, "Thumbnails: {thumbnails}");

    let summary = &projection.summary;
    let _ = write!(out, "Summary: {} ({})", summary.title, summary.subtitle);
    if let Some(colour) = summary.colour {
        let _ = write!(out, " {colour}");
    }
    if let Some(link) = &summary.link {
        let _ = write!(out, " {link}");
    }
    out.push('\n');
    let _ = writeln!(out, "Label: {}", projection.label);

    let _ = writeln!(out, "Selections:");
    for line in &projection.overview {
        let _ = writeln!(out, "  {line}");
    }
    out
}

pub(crate) fn format_outcome_plain(outcome: &RunOutcome) -> String {
    let mut out = format_projection_plain(&outcome.projection);
    let _ = writeln!(out, "Surfaces:");
    for surface in &outcome.surfaces {
        let _ = write!(out, "  {}", surface.mesh);
        if let Some(resource) = &surface.resource {
            let _ = write!(out, "  texture {resource}");
        }
        if let Some(color) = surface.color {
            let _ = write!(out, "  colour {color}");
        }
        let _ = writeln!(out, "  (rev {})", surface.revision);
    }
    if !outcome.settled {
        let _ = writeln!(out, "Some textures were still loading.");
    }
    for step in &outcome.rejected {
        let _ = writeln!(out, "Rejected: {step}");
    }
    out
}

fn describe_image(image: &ImageRef) -> String {
    match image {
        ImageRef::Thumbnail { reference } => format!("thumbnail {reference}"),
        ImageRef::Resource { reference } => format!("image {reference}"),
        ImageRef::Swatch { color } => format!("swatch {color}"),
    }
}

fn format_catalog_plain(catalog: &Catalog) -> String {
    let mut out = String::new();
    for category in Category::ALL {
        let list = catalog.list_for(category);
        let _ = writeln!(out, "{} ({})", category.label(), category.key());
        if !category.shape().accepts_discrete() {
            let _ = writeln!(out, "  any colour");
            continue;
        }
        for variant in list {
            let _ = writeln!(out, "  {}", variant.name);
        }
    }
    out
}

fn format_catalog_json(catalog: &Catalog) -> Result<String> {
    let categories: Vec<_> = Category::ALL
        .into_iter()
        .map(|category| {
            json!({
                "category": category,
                "label": category.label(),
                "variants": catalog.list_for(category),
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&categories)?)
}
