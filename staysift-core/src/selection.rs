//! Facet selections for one browsing session.
//!
//! [`SelectionState`] is plain data handed to the pipeline on every run. It is
//! mutated only through explicit toggles and setters; nothing in the engine
//! keeps a reference to it between runs.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::{FacetCatalog, Listing, ListingType, Sentiment};

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    /// Lowest accepted price.
    pub min: f64,
    /// Highest accepted price.
    pub max: f64,
}

impl PriceRange {
    /// The full representable domain, `[0, +inf]`.
    pub const FULL: Self = Self {
        min: 0.0,
        max: f64::INFINITY,
    };

    /// Build a range, swapping the bounds when they arrive reversed.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Report whether `price` lies within the bounds, inclusive.
    ///
    /// # Examples
    /// ```
    /// use staysift_core::PriceRange;
    ///
    /// let range = PriceRange::new(0.0, 3000.0);
    /// assert!(range.contains(3000.0));
    /// assert!(!range.contains(3000.5));
    /// ```
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// Ordering applied by the ranking stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SortKey {
    /// Recommendation score, best first. Unscored listings rank as `0.0`.
    #[default]
    Recommendation,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

impl SortKey {
    /// Return the key as used on the command line and in config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recommendation => "recommendation",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }
}

/// Preset single-click filters. At most one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuickFilter {
    /// Happy face and priced above the budget line.
    TopRated,
    /// Price at or below the budget line.
    Budget,
    /// Price above the luxury line.
    Luxury,
}

impl QuickFilter {
    /// Highest price still considered budget.
    pub const BUDGET_CEILING: f64 = 1000.0;
    /// Price above which a listing counts as luxury.
    pub const LUXURY_FLOOR: f64 = 2000.0;

    /// Every preset, in presentation order.
    pub const ALL: [Self; 3] = [Self::TopRated, Self::Budget, Self::Luxury];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TopRated => "Top Rated",
            Self::Budget => "Budget",
            Self::Luxury => "Luxury",
        }
    }

    /// Return the key as used on the command line and in config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopRated => "top_rated",
            Self::Budget => "budget",
            Self::Luxury => "luxury",
        }
    }

    /// Evaluate the preset against a listing.
    ///
    /// # Examples
    /// ```
    /// use staysift_core::{Listing, QuickFilter, Sentiment};
    ///
    /// let inn = Listing::new("City Inn", 800.0);
    /// assert!(QuickFilter::Budget.matches(&inn));
    ///
    /// let resort = Listing::new("Blue Bay Resort", 1200.0).with_face_status(Sentiment::Happy);
    /// assert!(QuickFilter::TopRated.matches(&resort));
    /// assert!(!QuickFilter::Luxury.matches(&resort));
    /// ```
    #[must_use]
    pub fn matches(self, listing: &Listing) -> bool {
        match self {
            Self::TopRated => {
                listing.face_status == Some(Sentiment::Happy)
                    && listing.price > Self::BUDGET_CEILING
            }
            Self::Budget => listing.price <= Self::BUDGET_CEILING,
            Self::Luxury => listing.price > Self::LUXURY_FLOOR,
        }
    }
}

/// Error returned when a sort key or quick filter label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseSelectionError {
    /// What was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl std::str::FromStr for SortKey {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_label(s).as_str() {
            "recommendation" => Ok(Self::Recommendation),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            _ => Err(ParseSelectionError {
                kind: "sort key",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::str::FromStr for QuickFilter {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_label(s).as_str() {
            "top_rated" => Ok(Self::TopRated),
            "budget" => Ok(Self::Budget),
            "luxury" => Ok(Self::Luxury),
            _ => Err(ParseSelectionError {
                kind: "quick filter",
                value: s.to_owned(),
            }),
        }
    }
}

fn normalise_label(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['-', ' '], "_")
}

/// Every user-editable facet selection.
///
/// `aspects` keeps first-selection order because it is exported as an
/// ordered list; the other multi-selects are sets.
///
/// # Examples
/// ```
/// use staysift_core::{QuickFilter, SelectionState, SortKey};
///
/// let mut state = SelectionState::new()
///     .with_aspect("cleanliness")
///     .with_sort(SortKey::PriceAsc);
/// state.toggle_quick_filter(QuickFilter::Budget);
///
/// assert_eq!(state.aspects(), ["cleanliness".to_owned()]);
/// assert_eq!(state.quick_filter, Some(QuickFilter::Budget));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    /// Case-insensitive substring matched against listing names.
    pub search_text: String,
    /// Keywords, any of which must appear in the name. Empty disables the
    /// stage.
    pub keywords: BTreeSet<String>,
    aspects: Vec<String>,
    /// Sub-aspects that must all score above the threshold.
    pub sub_aspects: BTreeSet<String>,
    /// Inclusive price bounds.
    pub price_range: PriceRange,
    /// Selected types. Collected for the UI; only consulted when
    /// `enforce_types` is set.
    pub types: BTreeSet<ListingType>,
    /// Opt in to filtering on `types`.
    pub enforce_types: bool,
    /// Keep only listings whose computed score falls in this bucket.
    pub bucket: Option<Sentiment>,
    /// Active preset, if any.
    pub quick_filter: Option<QuickFilter>,
    /// Ranking order.
    pub sort: SortKey,
}

impl SelectionState {
    /// Construct an empty selection: no keywords, no aspects, full price
    /// range, recommendation order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct the session defaults for a freshly loaded catalog: every
    /// known keyword and type selected, everything else at its default.
    #[must_use]
    pub fn from_catalog(catalog: &FacetCatalog) -> Self {
        Self {
            keywords: catalog.keywords.iter().cloned().collect(),
            types: catalog.types.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Aspects chosen for scoring, in selection order.
    #[must_use]
    pub fn aspects(&self) -> &[String] {
        &self.aspects
    }

    /// Select an aspect; selecting one twice has no effect.
    pub fn select_aspect(&mut self, aspect: impl Into<String>) {
        let name = aspect.into();
        if !self.aspects.contains(&name) {
            self.aspects.push(name);
        }
    }

    /// Select or deselect an aspect. Returns whether it is now selected.
    pub fn toggle_aspect(&mut self, aspect: &str) -> bool {
        if let Some(position) = self.aspects.iter().position(|a| a == aspect) {
            self.aspects.remove(position);
            false
        } else {
            self.aspects.push(aspect.to_owned());
            true
        }
    }

    /// Replace the aspect selection, dropping duplicates but keeping order.
    pub fn set_aspects<I, S>(&mut self, aspects: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aspects.clear();
        for aspect in aspects {
            self.select_aspect(aspect);
        }
    }

    /// Select or deselect a keyword. Returns whether it is now selected.
    pub fn toggle_keyword(&mut self, keyword: &str) -> bool {
        toggle(&mut self.keywords, keyword.to_owned())
    }

    /// Select or deselect a sub-aspect. Returns whether it is now selected.
    pub fn toggle_sub_aspect(&mut self, sub_aspect: &str) -> bool {
        toggle(&mut self.sub_aspects, sub_aspect.to_owned())
    }

    /// Select or deselect a type. Returns whether it is now selected.
    pub fn toggle_type(&mut self, listing_type: ListingType) -> bool {
        toggle(&mut self.types, listing_type)
    }

    /// Activate `filter`, or clear it when it is already active.
    ///
    /// Presets are mutually exclusive, so activating one replaces any other.
    pub fn toggle_quick_filter(&mut self, filter: QuickFilter) {
        self.quick_filter = if self.quick_filter == Some(filter) {
            None
        } else {
            Some(filter)
        };
    }

    /// Set the search text while returning `self` for chaining.
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Add a keyword while returning `self` for chaining.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.insert(keyword.into());
        self
    }

    /// Add an aspect while returning `self` for chaining.
    #[must_use]
    pub fn with_aspect(mut self, aspect: impl Into<String>) -> Self {
        self.select_aspect(aspect);
        self
    }

    /// Add a sub-aspect while returning `self` for chaining.
    #[must_use]
    pub fn with_sub_aspect(mut self, sub_aspect: impl Into<String>) -> Self {
        self.sub_aspects.insert(sub_aspect.into());
        self
    }

    /// Set the price range while returning `self` for chaining.
    #[must_use]
    pub const fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    /// Add a type while returning `self` for chaining.
    #[must_use]
    pub fn with_type(mut self, listing_type: ListingType) -> Self {
        self.types.insert(listing_type);
        self
    }

    /// Enable or disable the type filter while returning `self` for chaining.
    #[must_use]
    pub const fn with_enforced_types(mut self, enforce: bool) -> Self {
        self.enforce_types = enforce;
        self
    }

    /// Set the bucket filter while returning `self` for chaining.
    #[must_use]
    pub const fn with_bucket(mut self, bucket: Sentiment) -> Self {
        self.bucket = Some(bucket);
        self
    }

    /// Set the quick filter while returning `self` for chaining.
    #[must_use]
    pub const fn with_quick_filter(mut self, filter: QuickFilter) -> Self {
        self.quick_filter = Some(filter);
        self
    }

    /// Set the sort key while returning `self` for chaining.
    #[must_use]
    pub const fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}
