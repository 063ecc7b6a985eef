//! Core engine for faceted hotel-listing search.
//!
//! A [`SelectionState`] describes what the user picked in the filter panel.
//! [`FilterPipeline`] narrows a listing collection through a fixed sequence of
//! stages, scores each listing against the selected aspects and ranks the
//! survivors. [`FacetCatalog`] discovers the facet vocabulary from the data,
//! and [`featured()`] builds the independent featured band.
//!
//! Every operation is a pure function of its inputs; the only side effect is
//! the explicit aspect export through an `AspectStore`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod export;
pub mod featured;
pub mod filter;
pub mod listing;
pub mod rank;
pub mod record;
pub mod scorer;
pub mod selection;
pub mod sentiment;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(not(test), doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use catalog::{
    AspectTaxonomy, CollectionSummary, DEFAULT_KEYWORDS, FacetCatalog, OTHER_GROUP, SubAspectGroup,
};
#[cfg(feature = "serde")]
pub use export::{
    AspectStore, ExportError, MemoryAspectStore, SELECTED_ASPECTS_KEY, decode_aspects,
    encode_aspects, export_selected_aspects,
};
pub use featured::featured;
pub use filter::{
    FilterPipeline, PipelineStats, SUB_ASPECT_THRESHOLD, ScoredListing, Stage, apply,
};
pub use listing::{Listing, ListingType, MISSING_RATING_LABEL, ParseListingTypeError, ScoreMap};
pub use rank::{rank, rank_scored};
pub use record::{ListingError, ListingRecord, listings_from_records};
pub use scorer::{AspectScorer, MeanAspectScorer, score};
pub use selection::{ParseSelectionError, PriceRange, QuickFilter, SelectionState, SortKey};
pub use sentiment::{
    HAPPY_THRESHOLD, NEUTRAL_THRESHOLD, ParseSentimentError, Sentiment, UNKNOWN_EMOJI, bucket,
    bucket_emoji,
};
