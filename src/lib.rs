//! Facade crate for the staysift listing engine.
//!
//! This crate re-exports the filter, scoring and ranking types from
//! `staysift-core`. The JSON wire format and aspect export sit behind the
//! `serde` feature; `test-support` exposes sample listing collections.

#![forbid(unsafe_code)]

pub use staysift_core::{
    AspectScorer, AspectTaxonomy, CollectionSummary, FacetCatalog, FilterPipeline, Listing, ListingError,
    ListingRecord, ListingType, MeanAspectScorer, PipelineStats, PriceRange, QuickFilter,
    ScoredListing, SelectionState, Sentiment, SortKey, Stage, SubAspectGroup, featured,
    listings_from_records, rank, rank_scored,
};

#[cfg(feature = "serde")]
pub use staysift_core::{AspectStore, ExportError, MemoryAspectStore, export_selected_aspects};

#[cfg(feature = "test-support")]
pub use staysift_core::test_support;
