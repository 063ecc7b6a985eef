//! The faceted filter pipeline.
//!
//! Stages run in a fixed order, each narrowing the survivors of the previous
//! one. Every run starts from the full collection; nothing is carried over
//! between runs. The recommendation score is computed once per listing per
//! run and shared by the aspect-presence stage, the bucket stage and the
//! ranking stage.

use crate::{
    AspectScorer, Listing, ListingType, MeanAspectScorer, SelectionState, Sentiment, rank,
    sentiment,
};

/// A sub-aspect passes only when its score is strictly above this value.
pub const SUB_ASPECT_THRESHOLD: f64 = 0.5;

/// A listing paired with its score for the current aspect selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredListing<'a> {
    /// The listing itself.
    pub listing: &'a Listing,
    /// Mean of the selected aspects present on the listing, if any.
    pub score: Option<f64>,
}

impl ScoredListing<'_> {
    /// Bucket of the score; `None` when the listing is unscored.
    #[must_use]
    pub fn bucket(&self) -> Option<Sentiment> {
        sentiment::bucket(self.score)
    }
}

/// One step of the pipeline, listed in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Case-insensitive name substring search.
    Search,
    /// Any selected keyword appears in the name.
    Keyword,
    /// At least one selected aspect is scored.
    AspectPresence,
    /// Every selected sub-aspect scores above [`SUB_ASPECT_THRESHOLD`].
    SubAspectThreshold,
    /// Price within the selected range.
    Price,
    /// Type among the selected types; opt-in.
    Type,
    /// Score bucket equals the selected bucket.
    Bucket,
    /// Active preset predicate.
    QuickFilter,
}

impl Stage {
    /// Every stage in execution order.
    pub const ORDER: [Self; 8] = [
        Self::Search,
        Self::Keyword,
        Self::AspectPresence,
        Self::SubAspectThreshold,
        Self::Price,
        Self::Type,
        Self::Bucket,
        Self::QuickFilter,
    ];

    /// Whether the stage takes part in a run for `state`.
    ///
    /// Inactive stages pass every listing.
    #[must_use]
    pub fn is_active(self, state: &SelectionState) -> bool {
        match self {
            Self::Search => !state.search_text.is_empty(),
            Self::Keyword => !state.keywords.is_empty(),
            Self::AspectPresence => !state.aspects().is_empty(),
            Self::SubAspectThreshold => !state.sub_aspects.is_empty(),
            Self::Price => true,
            Self::Type => state.enforce_types,
            Self::Bucket => state.bucket.is_some(),
            Self::QuickFilter => state.quick_filter.is_some(),
        }
    }

    /// Short name used in logs and statistics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Keyword => "keyword",
            Self::AspectPresence => "aspect",
            Self::SubAspectThreshold => "sub_aspect",
            Self::Price => "price",
            Self::Type => "type",
            Self::Bucket => "bucket",
            Self::QuickFilter => "quick_filter",
        }
    }

    fn keeps(self, candidate: &ScoredListing<'_>, query: &Query<'_>) -> bool {
        let listing = candidate.listing;
        match self {
            Self::Search => Query::name_contains(listing, &query.search),
            Self::Keyword => query
                .keywords
                .iter()
                .any(|keyword| Query::name_contains(listing, keyword)),
            Self::AspectPresence => candidate.score.is_some(),
            Self::SubAspectThreshold => query.state.sub_aspects.iter().all(|sub| {
                listing.sub_aspect_score(sub).unwrap_or(0.0) > SUB_ASPECT_THRESHOLD
            }),
            Self::Price => query.state.price_range.contains(listing.price),
            Self::Type => listing
                .listing_type
                .is_some_and(|t: ListingType| query.state.types.contains(&t)),
            Self::Bucket => candidate
                .bucket()
                .is_some_and(|bucket| query.state.bucket == Some(bucket)),
            Self::QuickFilter => query
                .state
                .quick_filter
                .is_none_or(|filter| filter.matches(listing)),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-cased needles prepared once per run.
struct Query<'s> {
    state: &'s SelectionState,
    search: String,
    keywords: Vec<String>,
}

impl<'s> Query<'s> {
    fn new(state: &'s SelectionState) -> Self {
        Self {
            state,
            search: state.search_text.to_lowercase(),
            keywords: state.keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn name_contains(listing: &Listing, needle: &str) -> bool {
        listing.name.to_lowercase().contains(needle)
    }
}

/// How many listings each active stage removed during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Size of the input collection.
    pub input: usize,
    /// Removals per active stage, in execution order.
    pub removed: Vec<(Stage, usize)>,
    /// Size of the result.
    pub output: usize,
}

impl PipelineStats {
    /// Listings removed by `stage`; zero when it did not run.
    #[must_use]
    pub fn removed_by(&self, stage: Stage) -> usize {
        self.removed
            .iter()
            .find(|(s, _)| *s == stage)
            .map_or(0, |(_, count)| *count)
    }
}

/// Filter and rank listings against a [`SelectionState`].
///
/// The pipeline holds no state besides its scorer, so one instance can serve
/// any number of sessions.
///
/// # Examples
/// ```
/// use staysift_core::{FilterPipeline, Listing, SelectionState};
///
/// let listings = [
///     Listing::new("Blue Bay Resort", 1200.0)
///         .with_aspect("cleanliness", 0.8)
///         .with_aspect("service", 0.6),
///     Listing::new("City Inn", 800.0).with_aspect("cleanliness", 0.3),
/// ];
/// let state = SelectionState::new()
///     .with_aspect("cleanliness")
///     .with_aspect("service");
///
/// let ranked = FilterPipeline::new().run(&listings, &state);
/// let names: Vec<&str> = ranked.iter().map(|s| s.listing.name.as_str()).collect();
/// assert_eq!(names, ["Blue Bay Resort", "City Inn"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline<S = MeanAspectScorer> {
    scorer: S,
}

impl FilterPipeline<MeanAspectScorer> {
    /// Build a pipeline using the mean-of-aspects scorer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scorer: MeanAspectScorer,
        }
    }
}

impl<S: AspectScorer> FilterPipeline<S> {
    /// Build a pipeline around a custom scorer.
    pub const fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }

    /// Borrow the scorer.
    pub const fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Score every listing for the current aspect selection.
    pub fn score_all<'a>(
        &self,
        listings: &'a [Listing],
        state: &SelectionState,
    ) -> Vec<ScoredListing<'a>> {
        listings
            .iter()
            .map(|listing| ScoredListing {
                listing,
                score: self.scorer.score(listing, state.aspects()),
            })
            .collect()
    }

    /// Run the filter stages, preserving input order.
    pub fn apply<'a>(
        &self,
        listings: &'a [Listing],
        state: &SelectionState,
    ) -> Vec<ScoredListing<'a>> {
        self.apply_with_stats(listings, state).0
    }

    /// Run the filter stages and report per-stage removals.
    pub fn apply_with_stats<'a>(
        &self,
        listings: &'a [Listing],
        state: &SelectionState,
    ) -> (Vec<ScoredListing<'a>>, PipelineStats) {
        let query = Query::new(state);
        let mut candidates = self.score_all(listings, state);
        let mut stats = PipelineStats {
            input: candidates.len(),
            ..PipelineStats::default()
        };

        for stage in Stage::ORDER.into_iter().filter(|s| s.is_active(state)) {
            let before = candidates.len();
            candidates.retain(|candidate| stage.keeps(candidate, &query));
            let removed = before.saturating_sub(candidates.len());
            log::debug!("stage {stage} removed {removed} of {before} listings");
            stats.removed.push((stage, removed));
        }

        stats.output = candidates.len();
        (candidates, stats)
    }

    /// Filter, then order the survivors by `state.sort`.
    pub fn run<'a>(&self, listings: &'a [Listing], state: &SelectionState) -> Vec<ScoredListing<'a>> {
        let mut candidates = self.apply(listings, state);
        rank::rank_scored(&mut candidates, state.sort);
        candidates
    }
}

/// Filter `listings` with the default pipeline, preserving input order.
///
/// # Examples
/// ```
/// use staysift_core::{Listing, QuickFilter, SelectionState, apply};
///
/// let listings = [
///     Listing::new("Blue Bay Resort", 1200.0),
///     Listing::new("City Inn", 800.0),
/// ];
/// let state = SelectionState::new().with_quick_filter(QuickFilter::Budget);
///
/// let kept = apply(&listings, &state);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].name, "City Inn");
/// ```
#[must_use]
pub fn apply<'a>(listings: &'a [Listing], state: &SelectionState) -> Vec<&'a Listing> {
    FilterPipeline::new()
        .apply(listings, state)
        .into_iter()
        .map(|candidate| candidate.listing)
        .collect()
}
