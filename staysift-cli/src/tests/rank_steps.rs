//! Behaviour-driven step definitions driving the rank CLI scenarios.

use super::helpers::{SAMPLE_LISTINGS, write_utf8};
use super::*;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use staysift_core::AspectStore;
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct RankWorld {
    _tmp: TempDir,
    listings_path: Utf8PathBuf,
    store_path: Utf8PathBuf,
    include_listings: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl RankWorld {
    fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self {
            listings_path: root.join("listings.json"),
            store_path: root.join("store.json"),
            _tmp: tmp,
            include_listings: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn push_flag(&self, flag: &str, value: &str) {
        self.cli_args
            .borrow_mut()
            .extend([format!("--{flag}"), value.to_owned()]);
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["staysift".to_owned(), "rank".to_owned()];
        if *self.include_listings.borrow() {
            argv.push(self.listings_path.as_str().to_owned());
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }

    fn printed(&self) -> Vec<Value> {
        serde_json::from_slice(&self.stdout.borrow()).expect("stdout should be JSON")
    }
}

#[fixture]
fn world() -> RankWorld {
    RankWorld::new()
}

#[given("the sample listings exist on disk")]
fn sample_listings_exist(#[from(world)] world: &RankWorld) {
    write_utf8(&world.listings_path, SAMPLE_LISTINGS.as_bytes());
}

#[given("I select the aspects cleanliness and service")]
fn select_aspects(#[from(world)] world: &RankWorld) {
    world.push_flag(ARG_ASPECT, "cleanliness");
    world.push_flag(ARG_ASPECT, "service");
}

#[given("I choose the budget preset")]
fn choose_budget(#[from(world)] world: &RankWorld) {
    world.push_flag(ARG_QUICK, "budget");
}

#[given("I ask for the aspects to be exported")]
fn ask_for_export(#[from(world)] world: &RankWorld) {
    let store = world.store_path.as_str().to_owned();
    world.push_flag(ARG_STORE, &store);
}

#[given("I filter on an unknown bucket")]
fn unknown_bucket(#[from(world)] world: &RankWorld) {
    world.push_flag(ARG_BUCKET, "ecstatic");
}

#[given("I omit the listings path")]
fn omit_listings_path(#[from(world)] world: &RankWorld) {
    *world.include_listings.borrow_mut() = false;
}

#[when("I run the rank command")]
fn run_rank_command(#[from(world)] world: &RankWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Rank(args) => {
            let mut buffer = world.stdout.borrow_mut();
            rank::run_rank(args, &mut *buffer)
        }
        other => panic!("expected rank command, found {other:?}"),
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &RankWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    if let Err(err) = result {
        panic!("expected success, found {err}");
    }
}

#[then("{count} listings are printed")]
fn listings_printed(#[from(world)] world: &RankWorld, count: usize) {
    assert_eq!(world.printed().len(), count);
}

#[then("the first listing printed is {name}")]
fn first_listing(#[from(world)] world: &RankWorld, name: String) {
    let rows = world.printed();
    let first = rows.first().expect("at least one listing printed");
    assert_eq!(first["name"], name.trim().trim_matches('"'));
}

#[then("the store holds the aspects cleanliness and service")]
fn store_holds_aspects(#[from(world)] world: &RankWorld) {
    let store = crate::store::JsonFileAspectStore::new(world.store_path.clone());
    assert_eq!(
        store.read_selected_aspects().expect("read store"),
        ["cleanliness", "service"]
    );
}

#[then("the command fails naming the bucket flag")]
fn command_fails_on_bucket(#[from(world)] world: &RankWorld) {
    match &*world.error() {
        CliError::InvalidArgument { field, value, .. } => {
            assert_eq!(*field, ARG_BUCKET);
            assert_eq!(value, "ecstatic");
        }
        other => panic!("expected InvalidArgument, found {other:?}"),
    }
}

#[then("the command fails because the listings path is missing")]
fn command_fails_missing_listings(#[from(world)] world: &RankWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, env } => {
            assert_eq!(*field, ARG_LISTINGS);
            assert_eq!(*env, ENV_RANK_LISTINGS);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_rank_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/rank_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: RankWorld) {
            let _ = world;
        }
    };
}

register_rank_scenario!(rank_by_aspects, "ranking by the selected aspects");
register_rank_scenario!(rank_budget_preset, "applying the budget preset");
register_rank_scenario!(rank_exports_aspects, "exporting the selected aspects");
register_rank_scenario!(rank_unknown_bucket, "rejecting an unknown bucket");
register_rank_scenario!(rank_missing_listings, "rejecting a missing listings path");
