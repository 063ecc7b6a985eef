//! Command-line interface for filtering and ranking listing collections.
#![forbid(unsafe_code)]

use std::str::FromStr;

use clap::{Parser, Subcommand};

mod error;
mod facets;
mod featured;
mod load;
mod rank;
mod store;

pub use error::CliError;

use facets::FacetsArgs;
use featured::FeaturedArgs;
use rank::RankArgs;

pub(crate) const ARG_LISTINGS: &str = "listings";
pub(crate) const ARG_SEARCH: &str = "search";
pub(crate) const ARG_KEYWORD: &str = "keyword";
pub(crate) const ARG_ASPECT: &str = "aspect";
pub(crate) const ARG_SUB_ASPECT: &str = "sub-aspect";
pub(crate) const ARG_MIN_PRICE: &str = "min-price";
pub(crate) const ARG_MAX_PRICE: &str = "max-price";
pub(crate) const ARG_TYPE: &str = "type";
pub(crate) const ARG_ENFORCE_TYPES: &str = "enforce-types";
pub(crate) const ARG_BUCKET: &str = "bucket";
pub(crate) const ARG_QUICK: &str = "quick";
pub(crate) const ARG_SORT: &str = "sort";
pub(crate) const ARG_STORE: &str = "store";
pub(crate) const ENV_FACETS_LISTINGS: &str = "STAYSIFT_CMDS_FACETS_LISTINGS";
pub(crate) const ENV_RANK_LISTINGS: &str = "STAYSIFT_CMDS_RANK_LISTINGS";
pub(crate) const ENV_FEATURED_LISTINGS: &str = "STAYSIFT_CMDS_FEATURED_LISTINGS";

/// Run the staysift CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Facets(args) => facets::run_facets(args, &mut stdout),
        Command::Rank(args) => rank::run_rank(args, &mut stdout),
        Command::Featured(args) => featured::run_featured(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "staysift",
    about = "Faceted filtering and ranking for hotel listings",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the facets discovered in a listing collection.
    Facets(FacetsArgs),
    /// Filter and rank a listing collection.
    Rank(RankArgs),
    /// Print the featured band of a listing collection.
    Featured(FeaturedArgs),
}

/// Parse an optional label into an engine value, naming the flag on failure.
pub(crate) fn parse_label<T>(field: &'static str, raw: Option<String>) -> Result<Option<T>, CliError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.map(|value| {
        value
            .parse::<T>()
            .map_err(|source| CliError::InvalidArgument {
                field,
                value,
                source: Box::new(source),
            })
    })
    .transpose()
}

#[cfg(test)]
mod tests;
