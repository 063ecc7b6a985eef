//! Facets command: print the selectable vocabulary of a listing collection.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use staysift_core::{AspectTaxonomy, CollectionSummary, FacetCatalog, Listing, SubAspectGroup};

use crate::load::{load_listings, require_existing, write_json};
use crate::{ARG_LISTINGS, CliError, ENV_FACETS_LISTINGS};

/// CLI arguments for the `facets` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Discover the aspects, sub-aspects, keywords and types \
                 available in a JSON listing collection. Sub-aspects are \
                 also grouped under their taxonomy parents, and a summary \
                 counts listings, reviews and happy faces.",
    about = "Print the facets of a listing collection"
)]
#[ortho_config(prefix = "STAYSIFT")]
pub(crate) struct FacetsArgs {
    /// Path to a JSON array of listing records.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) listings: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FacetsReport {
    #[serde(flatten)]
    pub(crate) catalog: FacetCatalog,
    pub(crate) groups: Vec<SubAspectGroup>,
    pub(crate) summary: CollectionSummary,
}

impl FacetsReport {
    pub(crate) fn discover(listings: &[Listing]) -> Self {
        let catalog = FacetCatalog::discover(listings);
        let groups = AspectTaxonomy::default().group(&catalog.sub_aspects);
        Self {
            catalog,
            groups,
            summary: CollectionSummary::of(listings),
        }
    }
}

pub(crate) fn run_facets(args: FacetsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let path = merged.listings.ok_or(CliError::MissingArgument {
        field: ARG_LISTINGS,
        env: ENV_FACETS_LISTINGS,
    })?;
    require_existing(&path, ARG_LISTINGS)?;
    let listings = load_listings(&path)?;
    write_json(writer, &FacetsReport::discover(&listings))
}
