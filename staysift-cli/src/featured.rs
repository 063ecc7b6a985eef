//! Featured command: the happy (or chosen) band, most expensive first.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use staysift_core::{Listing, Sentiment, bucket_emoji, featured};

use crate::load::{load_listings, require_existing, write_json};
use crate::{ARG_BUCKET, ARG_LISTINGS, CliError, ENV_FEATURED_LISTINGS, parse_label};

/// CLI arguments for the `featured` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Print listings whose precomputed face status matches the \
                 bucket (happy unless given), sorted by price descending. \
                 Every other facet is ignored.",
    about = "Print the featured band"
)]
#[ortho_config(prefix = "STAYSIFT")]
pub(crate) struct FeaturedArgs {
    /// Path to a JSON array of listing records.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) listings: Option<Utf8PathBuf>,
    /// Face status to feature (happy, neutral, sad).
    #[arg(long = ARG_BUCKET, value_name = "bucket")]
    #[serde(default)]
    pub(crate) bucket: Option<String>,
}

/// Resolved `featured` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FeaturedConfig {
    pub(crate) listings: Utf8PathBuf,
    pub(crate) bucket: Option<Sentiment>,
}

impl TryFrom<FeaturedArgs> for FeaturedConfig {
    type Error = CliError;

    fn try_from(args: FeaturedArgs) -> Result<Self, Self::Error> {
        let listings = args.listings.ok_or(CliError::MissingArgument {
            field: ARG_LISTINGS,
            env: ENV_FEATURED_LISTINGS,
        })?;
        let bucket = parse_label::<Sentiment>(ARG_BUCKET, args.bucket)?;
        Ok(Self { listings, bucket })
    }
}

/// One row of `featured` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct FeaturedListing<'a> {
    pub(crate) name: &'a str,
    pub(crate) price: f64,
    pub(crate) rating: Option<f64>,
    pub(crate) face_status: Option<Sentiment>,
    pub(crate) emoji: &'static str,
}

impl<'a> From<&'a Listing> for FeaturedListing<'a> {
    fn from(listing: &'a Listing) -> Self {
        Self {
            name: &listing.name,
            price: listing.price,
            rating: listing.rating,
            face_status: listing.face_status,
            emoji: bucket_emoji(listing.face_status),
        }
    }
}

pub(crate) fn run_featured(args: FeaturedArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    execute_featured(&FeaturedConfig::try_from(merged)?, writer)
}

pub(crate) fn execute_featured(
    config: &FeaturedConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    require_existing(&config.listings, ARG_LISTINGS)?;
    let listings = load_listings(&config.listings)?;
    let rows: Vec<FeaturedListing<'_>> = featured(&listings, config.bucket)
        .into_iter()
        .map(FeaturedListing::from)
        .collect();
    write_json(writer, &rows)
}
