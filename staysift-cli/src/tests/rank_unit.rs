//! Unit tests running commands against listing files on disk.

use crate::facets::FacetsReport;
use crate::featured::{FeaturedConfig, execute_featured};
use super::helpers::Workspace;
use crate::load::load_listings;
use crate::rank::{RankConfig, execute_rank};
use super::*;
use rstest::rstest;
use serde_json::Value;
use staysift_core::{AspectStore, SelectionState, Sentiment, SortKey};

fn rank_output(workspace: &Workspace, selection: SelectionState) -> Vec<Value> {
    let config = RankConfig {
        listings: workspace.listings.clone(),
        selection,
        store: None,
    };
    let mut buffer = Vec::new();
    execute_rank(&config, &mut buffer).expect("rank should succeed");
    serde_json::from_slice(&buffer).expect("rank output should be JSON")
}

fn names(rows: &[Value]) -> Vec<&str> {
    rows.iter().filter_map(|row| row["name"].as_str()).collect()
}

#[rstest]
fn rank_prints_scores_and_buckets() {
    let workspace = Workspace::sample();
    let selection = SelectionState::new()
        .with_aspect("cleanliness")
        .with_aspect("service");
    let rows = rank_output(&workspace, selection);
    assert_eq!(
        names(&rows),
        [
            "Olive Grove Resort",
            "Blue Bay Resort",
            "Harbour Boutique",
            "City Inn"
        ]
    );
    let first = rows.first().expect("at least one row");
    assert_eq!(first["bucket"], "happy");
    assert_eq!(first["rating"], Value::Null);
    let last = rows.last().expect("at least one row");
    assert_eq!(last["bucket"], "sad");
}

#[rstest]
fn rank_without_aspects_keeps_file_order() {
    let workspace = Workspace::sample();
    let rows = rank_output(&workspace, SelectionState::new());
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|row| row["score"].is_null()));
    assert!(rows.iter().all(|row| row["bucket"].is_null()));
    assert_eq!(names(&rows).first(), Some(&"Blue Bay Resort"));
}

#[rstest]
fn rank_sorts_by_price() {
    let workspace = Workspace::sample();
    let rows = rank_output(&workspace, SelectionState::new().with_sort(SortKey::PriceAsc));
    assert_eq!(
        names(&rows),
        [
            "Harbour Boutique",
            "City Inn",
            "Blue Bay Resort",
            "Olive Grove Resort"
        ]
    );
}

#[rstest]
fn rank_exports_selected_aspects_to_the_store() {
    let workspace = Workspace::sample();
    let store_path = workspace.root.join("state/store.json");
    let config = RankConfig {
        listings: workspace.listings.clone(),
        selection: SelectionState::new()
            .with_aspect("location")
            .with_aspect("cleanliness"),
        store: Some(store_path.clone()),
    };
    let mut buffer = Vec::new();
    execute_rank(&config, &mut buffer).expect("rank should succeed");

    let store = crate::store::JsonFileAspectStore::new(store_path);
    assert_eq!(
        store.read_selected_aspects().expect("read store"),
        ["location", "cleanliness"]
    );
}

#[rstest]
fn featured_defaults_to_happy_by_price() {
    let workspace = Workspace::sample();
    let config = FeaturedConfig {
        listings: workspace.listings.clone(),
        bucket: None,
    };
    let mut buffer = Vec::new();
    execute_featured(&config, &mut buffer).expect("featured should succeed");
    let rows: Vec<Value> = serde_json::from_slice(&buffer).expect("featured output JSON");
    assert_eq!(names(&rows), ["Olive Grove Resort", "Blue Bay Resort"]);
    assert!(rows.iter().all(|row| row["face_status"] == "happy"));
}

#[rstest]
fn featured_honours_bucket() {
    let workspace = Workspace::sample();
    let config = FeaturedConfig {
        listings: workspace.listings.clone(),
        bucket: Some(Sentiment::Neutral),
    };
    let mut buffer = Vec::new();
    execute_featured(&config, &mut buffer).expect("featured should succeed");
    let rows: Vec<Value> = serde_json::from_slice(&buffer).expect("featured output JSON");
    assert_eq!(names(&rows), ["Harbour Boutique"]);
}

#[rstest]
fn facets_report_discovers_vocabulary() {
    let workspace = Workspace::sample();
    let listings = load_listings(&workspace.listings).expect("load listings");
    let report = FacetsReport::discover(&listings);
    assert_eq!(report.catalog.aspects, ["cleanliness", "service", "location"]);
    assert_eq!(report.catalog.sub_aspects, ["sea", "staff", "breakfast"]);

    let json = serde_json::to_value(&report).expect("serialise report");
    assert_eq!(json["types"], serde_json::json!(["Resort", "Hotel", "Boutique"]));
    assert!(json["groups"].is_array());
    assert_eq!(
        json["summary"],
        serde_json::json!({"listings": 4, "reviews": 120, "happy": 2})
    );
}

#[rstest]
fn backend_payload_without_face_status_loads() {
    let workspace = Workspace::with_listings(
        r#"[{"hotel_name": "City Inn", "face_score": 0.3, "face_emoji": "x", "price": 800,
             "aspects": {}, "subaspects": {}, "rating": null}]"#,
    );
    let listings = load_listings(&workspace.listings).expect("backend payload should load");
    assert_eq!(FacetsReport::discover(&listings).summary.happy, 0);

    let config = FeaturedConfig {
        listings: workspace.listings.clone(),
        bucket: Some(Sentiment::Neutral),
    };
    let mut buffer = Vec::new();
    execute_featured(&config, &mut buffer).expect("featured should succeed");
    let rows: Vec<Value> = serde_json::from_slice(&buffer).expect("featured output should be JSON");
    assert!(rows.is_empty());
}

#[rstest]
fn missing_listings_file_is_reported() {
    let workspace = Workspace::sample();
    let config = RankConfig {
        listings: workspace.root.join("absent.json"),
        selection: SelectionState::new(),
        store: None,
    };
    let err = execute_rank(&config, &mut Vec::new()).expect_err("missing file should fail");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_LISTINGS),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn directory_listings_path_is_rejected() {
    let workspace = Workspace::sample();
    let config = RankConfig {
        listings: workspace.root.clone(),
        selection: SelectionState::new(),
        store: None,
    };
    let err = execute_rank(&config, &mut Vec::new()).expect_err("directory should fail");
    match err {
        CliError::SourcePathNotFile { path, .. } => assert_eq!(path, workspace.root),
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
#[case::not_json("{ not valid json", "parse")]
#[case::not_an_array(r#"{"hotel_name": "Solo"}"#, "parse")]
#[case::bad_price(r#"[{"hotel_name": "Free", "price": -5, "face_status": "happy"}]"#, "invalid")]
#[case::bad_score(
    r#"[{"hotel_name": "Odd", "price": 5, "aspects": {"room": 2}, "face_status": "sad"}]"#,
    "invalid"
)]
fn malformed_listings_are_reported(#[case] contents: &str, #[case] kind: &str) {
    let workspace = Workspace::with_listings(contents);
    let err = load_listings(&workspace.listings).expect_err("malformed listings should fail");
    match (kind, err) {
        ("parse", CliError::ParseListings { path, .. })
        | ("invalid", CliError::InvalidListing { path, .. }) => {
            assert_eq!(path, workspace.listings);
        }
        (_, other) => panic!("unexpected error {other:?}"),
    }
}
