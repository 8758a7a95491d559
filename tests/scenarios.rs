//! End-to-end runs of the configurator against a headless kitchen.

use std::sync::Arc;
use std::time::Duration;

use configurator::{
    Catalog, Category, Configurator, HeadlessViewer, Intent, ListProjection, MemoryAssetLoader,
    Projection, SelectionState, ThumbnailStrip, VariantApplier,
};

const WAIT: Duration = Duration::from_secs(5);

const CATALOG: &str = r##"
[[floor]]
name = "Alessandro"
resource = "/floor/alessandro.webp"
link = "https://tiles.example/alessandro"

[[floor]]
name = "Vogue"
resource = "/floor/vogue.webp"
thumbnail = "/thumbnails/vogue.webp"
link = "https://tiles.example/vogue"

[[floor]]
name = "Living"
resource = "/floor/living.webp"
thumbnail = "/thumbnails/living.webp"

[[floor]]
name = "Rosko Grey"
resource = "/floor/rosko_grey.webp"

[[floor]]
name = "Rosko Mink"
resource = "/floor/rosko_mink.webp"

[[worktop]]
name = "White Laquer"
resource = "/worktop/white.webp"

[[worktop]]
name = "Oak Soria"
resource = "/worktop/oak.webp"

[[backsplash]]
name = "Metro Stone Bone"
resource = "/backsplash/bone.webp"

[[stools]]
name = "White with Chrome"
resource = "/stools/white.webp"

[[wall_colour]]
name = "White"
resource = "#ffffff"

[[wall_colour]]
name = "Duck Egg"
resource = "#c9dcd6"
"##;

fn configurator() -> Configurator<HeadlessViewer> {
    let catalog = Arc::new(Catalog::from_toml_str(CATALOG).expect("catalog parses"));
    let mut loader = MemoryAssetLoader::new();
    for category in Category::ALL {
        for variant in catalog.list_for(category) {
            loader.insert(variant.resource.clone(), variant.name.as_bytes());
        }
    }
    let mut configurator = Configurator::new(
        SelectionState::new(catalog),
        VariantApplier::new(Arc::new(loader)),
        HeadlessViewer::kitchen(),
    );
    configurator.viewer_ready().expect("kitchen surfaces bind");
    configurator
}

fn run(configurator: &mut Configurator<HeadlessViewer>, steps: &[&str]) -> Projection {
    for step in steps {
        let intent: Intent = step.parse().expect("step parses");
        assert!(configurator.dispatch(intent), "step {step} was rejected");
    }
    assert!(configurator.settle(WAIT));
    configurator.projection()
}

fn names(projection: &Projection) -> Vec<&str> {
    projection
        .list
        .entries()
        .iter()
        .map(|entry| entry.name.as_str())
        .collect()
}

#[test]
fn selecting_a_floor_updates_list_label_and_scene() {
    let mut configurator = configurator();
    let projection = run(&mut configurator, &["select:floor=Vogue"]);

    let selected = projection.list.selected().expect("a selected entry");
    assert_eq!(selected.name, "Vogue");
    assert_eq!(selected.index, 1);
    assert_eq!(projection.label, "Floor: Vogue");
    let floor = configurator.viewer().state_by_mesh("Kitchen_Floor").unwrap();
    assert_eq!(floor.resource.as_ref().unwrap().as_str(), "/floor/vogue.webp");
}

#[test]
fn custom_cupboard_colour_has_no_link() {
    let mut configurator = configurator();
    let projection = run(
        &mut configurator,
        &["category:cupboards", "colour:cupboards=#D3D3D3"],
    );

    assert_eq!(projection.summary.title, "Custom colour");
    assert_eq!(projection.summary.subtitle, "Cupboards");
    assert!(projection.summary.link.is_none());
    assert_eq!(projection.thumbnails, ThumbnailStrip::Hidden);
}

#[test]
fn searching_keeps_catalog_order() {
    let mut configurator = configurator();
    let projection = run(&mut configurator, &["search:ro"]);
    assert_eq!(names(&projection), vec!["Rosko Grey", "Rosko Mink"]);

    let projection = run(&mut configurator, &["search:RO"]);
    assert_eq!(names(&projection), vec!["Rosko Grey", "Rosko Mink"]);
}

#[test]
fn switching_category_clears_the_search() {
    let mut configurator = configurator();
    run(&mut configurator, &["search:ro"]);
    let projection = run(&mut configurator, &["category:worktop"]);

    assert_eq!(projection.query, "");
    assert_eq!(names(&projection), vec!["White Laquer", "Oak Soria"]);
}

#[test]
fn variant_without_link_has_none() {
    let mut configurator = configurator();
    let projection = run(&mut configurator, &["select:floor=Living"]);
    assert_eq!(projection.summary.link, None);
}

#[test]
fn search_does_not_move_the_selection() {
    let mut configurator = configurator();
    let projection = run(
        &mut configurator,
        &["select:floor=Rosko Mink", "search:vogue", "search:"],
    );

    assert_eq!(projection.list.selected().unwrap().name, "Rosko Mink");
    assert_eq!(projection.label, "Floor: Rosko Mink");
}

#[test]
fn no_results_still_shows_the_selection_elsewhere() {
    let mut configurator = configurator();
    let projection = run(&mut configurator, &["select:floor=Vogue", "search:granite"]);

    assert!(matches!(projection.list, ListProjection::NoResults { .. }));
    assert!(matches!(
        projection.thumbnails,
        ThumbnailStrip::NoResults { .. }
    ));
    assert_eq!(projection.summary.title, "Vogue");
    assert_eq!(projection.label, "Floor: Vogue");
}

#[test]
fn wall_swatch_then_custom_colour() {
    let mut configurator = configurator();
    let projection = run(
        &mut configurator,
        &["category:wall", "select:wall_colour=Duck Egg"],
    );
    assert_eq!(projection.label, "Wall Colour: Duck Egg");
    let walls = configurator.viewer().state_by_mesh("Kitchen_Walls").unwrap();
    assert_eq!(walls.color.unwrap().as_str(), "#c9dcd6");

    let projection = run(&mut configurator, &["colour:wall=abcdef"]);
    assert_eq!(projection.label, "Wall Colour: #ABCDEF");
    assert_eq!(projection.summary.title, "Custom wall colour");
    assert!(projection.list.selected().is_none());
    let walls = configurator.viewer().state_by_mesh("Kitchen_Walls").unwrap();
    assert_eq!(walls.color.unwrap().as_str(), "#abcdef");
}

#[test]
fn searched_wall_swatches_stay_in_the_strip() {
    let mut configurator = configurator();
    let projection = run(
        &mut configurator,
        &["category:wall", "select:wall_colour=Duck Egg", "search:duck"],
    );

    let ThumbnailStrip::Thumbnails { entries } = &projection.thumbnails else {
        panic!("expected thumbnails, got {:?}", projection.thumbnails);
    };
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Duck Egg");
    assert!(entries[0].selected);
}

#[test]
fn rapid_selections_settle_on_the_last_one() {
    let mut configurator = configurator();
    let projection = run(
        &mut configurator,
        &[
            "select:floor=Vogue",
            "select:floor=Living",
            "select:floor=Alessandro",
            "select:floor=Rosko Grey",
        ],
    );

    assert_eq!(projection.label, "Floor: Rosko Grey");
    let floor = configurator.viewer().state_by_mesh("Kitchen_Floor").unwrap();
    assert_eq!(
        floor.resource.as_ref().unwrap().as_str(),
        "/floor/rosko_grey.webp"
    );
}

#[test]
fn builtin_catalog_drives_a_full_session() {
    let catalog = Arc::new(Catalog::builtin().expect("builtin catalog"));
    let mut configurator = Configurator::new(
        SelectionState::new(catalog),
        VariantApplier::new(Arc::new(MemoryAssetLoader::new())),
        HeadlessViewer::kitchen(),
    );
    configurator.viewer_ready().unwrap();

    for step in ["category:stools", "select:stools=Black with Chrome"] {
        assert!(configurator.dispatch(step.parse().unwrap()));
    }
    assert!(configurator.settle(WAIT));

    let projection = configurator.projection();
    assert_eq!(projection.label, "Stools: Black with Chrome");
    let stools = configurator.viewer().state_by_mesh("Kitchen_Stools").unwrap();
    assert!(stools.resource.is_none());
}
