use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use super::*;
use crate::catalog::fixtures;
use crate::color::HexColor;

fn state() -> SelectionState {
    SelectionState::new(Arc::new(fixtures::kitchen()))
}

fn names(entries: &[ListEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.name.as_str()).collect()
}

/// Every surface names the same selection.
fn assert_consistent(projection: &Projection) {
    let selected = projection.list.selected().map(|entry| entry.name.clone());
    match &selected {
        Some(name) => {
            assert_eq!(&projection.summary.title, name);
            assert!(projection.label.ends_with(name.as_str()));
            if let ThumbnailStrip::Thumbnails { entries } = &projection.thumbnails {
                let thumb = entries.iter().find(|entry| entry.selected).unwrap();
                assert_eq!(&thumb.name, name);
            }
        }
        None => assert!(projection.thumbnails.entries().iter().all(|e| !e.selected)),
    }
    let active_line = projection
        .overview
        .iter()
        .find(|line| line.starts_with(projection.category.label()))
        .unwrap();
    assert_eq!(active_line, &projection.label);
}

#[test]
fn selecting_marks_the_list_and_label() {
    let mut state = state();
    state.select_discrete(Category::Floor, "Vogue").unwrap();

    let projection = ViewSynchronizer::project(&state, &FilterQuery::default());

    let selected = projection.list.selected().unwrap();
    assert_eq!(selected.name, "Vogue");
    assert_eq!(selected.index, 1);
    assert_eq!(projection.list.entries()[1].name, "Vogue");
    assert_eq!(projection.label, "Floor: Vogue");
    assert_consistent(&projection);
}

#[test]
fn custom_cupboard_colour_summary_has_no_link() {
    let mut state = state();
    state
        .set_continuous_color(Category::Cupboards, "#D3D3D3")
        .unwrap();
    state.set_active_category(Category::Cupboards);

    let projection = ViewSynchronizer::project(&state, &FilterQuery::default());

    assert_eq!(projection.summary.title, "Custom colour");
    assert_eq!(projection.summary.subtitle, "Cupboards");
    assert_eq!(projection.summary.link, None);
    assert_eq!(projection.summary.image, None);
    assert_eq!(projection.summary.colour.unwrap().as_str(), "#d3d3d3");
    assert_eq!(projection.label, "Cupboards: #D3D3D3");
    assert_eq!(projection.thumbnails, ThumbnailStrip::Hidden);
    match &projection.list {
        ListProjection::ColorPicker { picker } => {
            assert_eq!(picker.value.as_str(), "#d3d3d3");
            assert!(picker.active);
        }
        other => panic!("expected a colour picker, got {other:?}"),
    }
}

#[test]
fn query_narrows_list_and_strip_together() {
    let state = state();
    let projection = ViewSynchronizer::project(&state, &FilterQuery::new("ro"));

    assert_eq!(
        names(projection.list.entries()),
        vec!["Rosko Grey", "Rosko Mink"]
    );
    assert_eq!(
        names(projection.thumbnails.entries()),
        vec!["Rosko Grey", "Rosko Mink"]
    );
    assert_eq!(projection.list.entries()[0].index, 3);
}

#[test]
fn empty_result_is_explicit_and_summary_keeps_selection() {
    let mut state = state();
    state.select_discrete(Category::Floor, "Living").unwrap();

    let projection = ViewSynchronizer::project(&state, &FilterQuery::new("  marble "));

    assert_eq!(
        projection.list,
        ListProjection::NoResults {
            query: "marble".into()
        }
    );
    assert_eq!(
        projection.thumbnails,
        ThumbnailStrip::NoResults {
            query: "marble".into()
        }
    );
    assert_eq!(projection.summary.title, "Living");
    assert_eq!(projection.label, "Floor: Living");
}

#[test]
fn missing_link_is_absent() {
    let mut state = state();
    state.select_discrete(Category::Floor, "Living").unwrap();
    let projection = ViewSynchronizer::project(&state, &FilterQuery::default());
    assert_eq!(projection.summary.link, None);
    assert_eq!(projection.list.selected().unwrap().link, None);

    state.select_discrete(Category::Floor, "Vogue").unwrap();
    let projection = ViewSynchronizer::project(&state, &FilterQuery::default());
    assert_eq!(
        projection.summary.link.as_deref(),
        Some("https://tiles.example/vogue")
    );
}

#[test]
fn images_fall_back_from_thumbnail_to_resource() {
    let state = state();
    let projection = ViewSynchronizer::project(&state, &FilterQuery::default());
    let entries = projection.list.entries();

    assert_eq!(
        entries[0].image,
        Some(ImageRef::Resource {
            reference: "/textures/floor/alessandro.webp".into()
        })
    );
    assert_eq!(
        entries[1].image,
        Some(ImageRef::Thumbnail {
            reference: "/thumbnails/fl_vogue.webp".into()
        })
    );
}

#[test]
fn wall_swatches_show_as_colour_chips_in_the_strip() {
    let mut state = state();
    state.set_active_category(Category::WallColour);
    state
        .select_discrete(Category::WallColour, "Light Grey")
        .unwrap();

    let projection = ViewSynchronizer::project(&state, &FilterQuery::default());

    assert_eq!(names(projection.list.entries()), vec!["White", "Light Grey"]);
    assert_eq!(
        names(projection.thumbnails.entries()),
        vec!["White", "Light Grey"]
    );
    let grey = Some(ImageRef::Swatch {
        color: HexColor::parse("#d3d3d3").unwrap(),
    });
    assert_eq!(projection.list.entries()[1].image, grey);
    assert_eq!(projection.thumbnails.entries()[1].image, grey);
    assert_eq!(projection.summary.title, "Light Grey");
    assert_eq!(projection.summary.subtitle, "Wall Colour");
    let picker = projection.picker.as_ref().unwrap();
    assert!(!picker.active);
    assert_eq!(picker.value.as_str(), "#ffffff");
    assert_consistent(&projection);
}

#[test]
fn searching_swatches_keeps_the_selection_in_the_strip() {
    let mut state = state();
    state.set_active_category(Category::WallColour);
    state
        .select_discrete(Category::WallColour, "Light Grey")
        .unwrap();

    let projection = ViewSynchronizer::project(&state, &FilterQuery::new("light"));

    assert_eq!(names(projection.list.entries()), vec!["Light Grey"]);
    let strip = projection.thumbnails.entries();
    assert_eq!(names(strip), vec!["Light Grey"]);
    assert!(strip[0].selected);
    assert_consistent(&projection);
}

#[test]
fn custom_wall_colour_clears_the_swatch_mark() {
    let mut state = state();
    state.set_active_category(Category::WallColour);
    state
        .set_continuous_color(Category::WallColour, "#336699")
        .unwrap();

    let projection = ViewSynchronizer::project(&state, &FilterQuery::default());

    assert!(projection.list.selected().is_none());
    assert_eq!(projection.summary.title, "Custom wall colour");
    assert_eq!(projection.summary.subtitle, "Wall Colour");
    assert_eq!(
        projection.summary.image,
        Some(ImageRef::Swatch {
            color: HexColor::parse("#336699").unwrap()
        })
    );
    assert_eq!(projection.label, "Wall Colour: #336699");
    assert!(projection.picker.as_ref().unwrap().active);
    assert_consistent(&projection);
}

#[test]
fn overview_lists_every_category_in_order() {
    let state = state();
    let projection = ViewSynchronizer::project(&state, &FilterQuery::default());
    assert_eq!(
        projection.overview,
        vec![
            "Floor: Alessandro",
            "Worktop: White Laquer",
            "Cupboards: #D3D3D3",
            "Backsplash: Metro Stone Bone",
            "Stools: White with Chrome",
            "Wall Colour: White",
        ]
    );
}

#[test]
fn every_surface_agrees_after_any_sequence() {
    let mut state = state();
    let steps: [(&str, Option<Category>, Option<&str>); 6] = [
        ("", None, Some("Rosko Mink")),
        ("ro", None, Some("Vogue")),
        ("", Some(Category::Worktop), Some("Oak Soria")),
        ("oak", None, None),
        ("", Some(Category::WallColour), Some("White")),
        ("grey", None, Some("Light Grey")),
    ];

    for (query, switch, select) in steps {
        if let Some(category) = switch {
            state.set_active_category(category);
        }
        if let Some(name) = select {
            let _ = state.select_discrete(state.active_category(), name);
        }
        let projection = ViewSynchronizer::project(&state, &FilterQuery::new(query));
        assert_consistent(&projection);
    }
}

#[test]
fn refresh_only_notifies_on_change() {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let mut sync = ViewSynchronizer::new();
    let sink_frames = Rc::clone(&frames);
    sync.subscribe(Box::new(move |projection: &Projection| {
        sink_frames.borrow_mut().push(projection.label.clone());
    }));

    let mut state = state();
    let query = FilterQuery::default();
    assert!(sync.refresh(&state, &query));
    assert!(!sync.refresh(&state, &query));

    state.select_discrete(Category::Floor, "Vogue").unwrap();
    assert!(sync.refresh(&state, &query));
    assert_eq!(*frames.borrow(), vec!["Floor: Alessandro", "Floor: Vogue"]);
}

#[test]
fn late_subscribers_get_the_current_projection() {
    let state = state();
    let mut sync = ViewSynchronizer::new();
    sync.refresh(&state, &FilterQuery::default());

    let seen = Rc::new(RefCell::new(None));
    let sink_seen = Rc::clone(&seen);
    sync.subscribe(Box::new(move |projection: &Projection| {
        *sink_seen.borrow_mut() = Some(projection.label.clone());
    }));
    assert_eq!(seen.borrow().as_deref(), Some("Floor: Alessandro"));
}
