//! Rank command implementation for the staysift CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use staysift_core::{
    FilterPipeline, Listing, ListingType, PriceRange, QuickFilter, ScoredListing, SelectionState,
    Sentiment, SortKey, export_selected_aspects,
};

use crate::load::{load_listings, require_existing, write_json};
use crate::store::JsonFileAspectStore;
use crate::{
    ARG_ASPECT, ARG_BUCKET, ARG_ENFORCE_TYPES, ARG_KEYWORD, ARG_LISTINGS, ARG_MAX_PRICE,
    ARG_MIN_PRICE, ARG_QUICK, ARG_SEARCH, ARG_SORT, ARG_STORE, ARG_SUB_ASPECT, ARG_TYPE, CliError,
    ENV_RANK_LISTINGS, parse_label,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Filter a JSON listing collection by the selected facets and \
                 print the survivors in ranking order. Keywords match any; \
                 sub-aspects must all score above 0.5; the recommendation \
                 order uses the mean of the selected aspects.",
    about = "Filter and rank listings"
)]
#[ortho_config(prefix = "STAYSIFT")]
pub(crate) struct RankArgs {
    /// Path to a JSON array of listing records.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) listings: Option<Utf8PathBuf>,
    /// Case-insensitive substring the listing name must contain.
    #[arg(long = ARG_SEARCH, value_name = "text")]
    #[serde(default)]
    pub(crate) search: Option<String>,
    /// Keyword that may appear in the name; repeat for alternatives.
    #[arg(long = ARG_KEYWORD, value_name = "keyword")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) keywords: Vec<String>,
    /// Aspect used for scoring; repeat in order of preference.
    #[arg(long = ARG_ASPECT, value_name = "aspect")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) aspects: Vec<String>,
    /// Sub-aspect that must score above the threshold; repeat to require more.
    #[arg(long = ARG_SUB_ASPECT, value_name = "sub-aspect")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) sub_aspects: Vec<String>,
    /// Lowest acceptable price, inclusive.
    #[arg(long = ARG_MIN_PRICE, value_name = "price")]
    #[serde(default)]
    pub(crate) min_price: Option<f64>,
    /// Highest acceptable price, inclusive.
    #[arg(long = ARG_MAX_PRICE, value_name = "price")]
    #[serde(default)]
    pub(crate) max_price: Option<f64>,
    /// Listing type to select (resort, hotel, boutique).
    #[arg(long = ARG_TYPE, value_name = "type")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) types: Vec<String>,
    /// Filter on the selected types instead of only recording them.
    #[arg(long = ARG_ENFORCE_TYPES)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) enforce_types: bool,
    /// Keep only listings scoring in this bucket (happy, neutral, sad).
    #[arg(long = ARG_BUCKET, value_name = "bucket")]
    #[serde(default)]
    pub(crate) bucket: Option<String>,
    /// Preset filter (top-rated, budget, luxury).
    #[arg(long = ARG_QUICK, value_name = "preset")]
    #[serde(default)]
    pub(crate) quick: Option<String>,
    /// Ranking order (recommendation, price-asc, price-desc).
    #[arg(long = ARG_SORT, value_name = "key")]
    #[serde(default)]
    pub(crate) sort: Option<String>,
    /// JSON store file receiving the selected aspects.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    /// Path to the listings file.
    pub(crate) listings: Utf8PathBuf,
    /// Facet selection to apply.
    pub(crate) selection: SelectionState,
    /// Optional export target for the selected aspects.
    pub(crate) store: Option<Utf8PathBuf>,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let listings = args.listings.ok_or(CliError::MissingArgument {
            field: ARG_LISTINGS,
            env: ENV_RANK_LISTINGS,
        })?;

        let min = price_bound(ARG_MIN_PRICE, args.min_price)?.unwrap_or(PriceRange::FULL.min);
        let max = price_bound(ARG_MAX_PRICE, args.max_price)?.unwrap_or(PriceRange::FULL.max);

        let mut selection = SelectionState::new()
            .with_price_range(PriceRange::new(min, max))
            .with_enforced_types(args.enforce_types)
            .with_sort(parse_label::<SortKey>(ARG_SORT, args.sort)?.unwrap_or_default());
        selection.search_text = args.search.unwrap_or_default();
        selection.keywords = args.keywords.into_iter().collect();
        selection.set_aspects(args.aspects);
        selection.sub_aspects = args.sub_aspects.into_iter().collect();
        for raw in args.types {
            if let Some(listing_type) = parse_label::<ListingType>(ARG_TYPE, Some(raw))? {
                selection.types.insert(listing_type);
            }
        }
        selection.bucket = parse_label::<Sentiment>(ARG_BUCKET, args.bucket)?;
        selection.quick_filter = parse_label::<QuickFilter>(ARG_QUICK, args.quick)?;

        Ok(Self {
            listings,
            selection,
            store: args.store,
        })
    }
}

fn price_bound(field: &'static str, value: Option<f64>) -> Result<Option<f64>, CliError> {
    match value {
        Some(price) if price.is_nan() || price < 0.0 => Err(CliError::InvalidArgument {
            field,
            value: price.to_string(),
            source: "price must be a non-negative number".into(),
        }),
        other => Ok(other),
    }
}

/// One row of `rank` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct RankedListing<'a> {
    pub(crate) name: &'a str,
    pub(crate) price: f64,
    pub(crate) rating: Option<f64>,
    pub(crate) score: Option<f64>,
    pub(crate) bucket: Option<Sentiment>,
}

impl<'a> From<ScoredListing<'a>> for RankedListing<'a> {
    fn from(scored: ScoredListing<'a>) -> Self {
        Self {
            name: &scored.listing.name,
            price: scored.listing.price,
            rating: scored.listing.rating,
            score: scored.score,
            bucket: scored.bucket(),
        }
    }
}

pub(crate) fn run_rank(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_rank(&config, writer)
}

pub(crate) fn execute_rank(config: &RankConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    require_existing(&config.listings, ARG_LISTINGS)?;
    let listings = load_listings(&config.listings)?;
    let rows = rank_listings(&listings, &config.selection);

    if let Some(path) = &config.store {
        let mut store = JsonFileAspectStore::new(path.clone());
        export_selected_aspects(&config.selection, &mut store).map_err(|source| {
            CliError::ExportAspects {
                path: path.clone(),
                source,
            }
        })?;
        log::debug!("exported selected aspects to {path}");
    }

    write_json(writer, &rows)
}

pub(crate) fn rank_listings<'a>(
    listings: &'a [Listing],
    selection: &SelectionState,
) -> Vec<RankedListing<'a>> {
    FilterPipeline::new()
        .run(listings, selection)
        .into_iter()
        .map(RankedListing::from)
        .collect()
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
