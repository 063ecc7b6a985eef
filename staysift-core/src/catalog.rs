//! Facet discovery over a loaded listing collection.
//!
//! Aspects and sub-aspects are not known until data arrives; the catalog is
//! recomputed from scratch for every fresh load. Keywords and types come from
//! small fixed vocabularies. [`CollectionSummary`] carries the headline
//! counts shown above the results.

use std::collections::HashSet;

use crate::{Listing, ListingType, Sentiment};

/// Keywords offered by default, all selected in a fresh session.
pub const DEFAULT_KEYWORDS: [&str; 2] = ["Muğla", "Hotel"];

/// Name of the group holding sub-aspects the taxonomy does not mention.
pub const OTHER_GROUP: &str = "other";

const DEFAULT_TAXONOMY: &[(&str, &[&str])] = &[
    (
        "room",
        &[
            "room", "floor", "bedroom", "bathroom", "kitchen", "balcony", "bed", "apartment",
            "desk", "hall", "laundry", "sofa", "basement", "spacious",
        ],
    ),
    (
        "service",
        &[
            "service",
            "staff",
            "customer",
            "maintenance",
            "internet",
            "support",
            "quality",
            "cleanliness",
            "reliable",
        ],
    ),
    (
        "location",
        &[
            "location",
            "proximity",
            "area",
            "destination",
            "vicinity",
            "distance",
            "close",
            "parking",
        ],
    ),
    (
        "price",
        &[
            "price",
            "cost",
            "value",
            "discount",
            "affordable",
            "expensive",
            "pay",
            "worth",
        ],
    ),
    (
        "food",
        &[
            "food",
            "meal",
            "restaurant",
            "breakfast",
            "lunch",
            "dinner",
            "soup",
            "pizza",
            "bread",
            "coffee",
            "dessert",
        ],
    ),
    ("Beach & Water", &["beach", "sea", "water", "pool"]),
    (
        "Accommodation & Facilities",
        &["bathroom", "shower", "apartment", "hotel", "location"],
    ),
    (
        "Service & Social Experience",
        &[
            "staff", "place", "family", "people", "night", "problem", "river", "price",
        ],
    ),
    ("Leisure & Meals", &["breakfast", "beach", "holiday"]),
];

/// Selectable facets derived from a listing collection.
///
/// # Examples
/// ```
/// use staysift_core::{FacetCatalog, Listing};
///
/// let listings = [
///     Listing::new("Blue Bay Resort", 1200.0)
///         .with_aspect("service", 0.6)
///         .with_aspect("cleanliness", 0.8),
///     Listing::new("City Inn", 800.0).with_aspect("cleanliness", 0.3),
/// ];
/// let catalog = FacetCatalog::discover(&listings);
/// assert_eq!(catalog.aspects, ["cleanliness", "service"]);
/// assert!(catalog.sub_aspects.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FacetCatalog {
    /// Union of aspect keys, in order of first occurrence.
    pub aspects: Vec<String>,
    /// Union of sub-aspect keys, in order of first occurrence.
    pub sub_aspects: Vec<String>,
    /// Keyword vocabulary.
    pub keywords: Vec<String>,
    /// Type vocabulary.
    pub types: Vec<ListingType>,
}

impl FacetCatalog {
    /// Discover facets using the default keyword vocabulary.
    #[must_use]
    pub fn discover(listings: &[Listing]) -> Self {
        Self::discover_with_keywords(listings, DEFAULT_KEYWORDS)
    }

    /// Discover facets with a caller-supplied keyword vocabulary.
    ///
    /// Keys are collected in the order they are first seen. Each listing's
    /// map is ordered, so repeated calls over the same input agree.
    pub fn discover_with_keywords<I, S>(listings: &[Listing], keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aspects: union_keys(listings.iter().map(|l| l.aspect_scores.keys())),
            sub_aspects: union_keys(listings.iter().map(|l| l.sub_aspect_scores.keys())),
            keywords: keywords.into_iter().map(Into::into).collect(),
            types: ListingType::ALL.to_vec(),
        }
    }
}

fn union_keys<'a, O, I>(maps: O) -> Vec<String>
where
    O: Iterator<Item = I>,
    I: Iterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for key in maps.flatten() {
        if seen.insert(key.as_str()) {
            ordered.push(key.clone());
        }
    }
    ordered
}

/// Headline counts over a loaded collection.
///
/// # Examples
/// ```
/// use staysift_core::{CollectionSummary, Listing, Sentiment};
///
/// let listings = [
///     Listing::new("Blue Bay Resort", 1200.0)
///         .with_review_count(120)
///         .with_face_status(Sentiment::Happy),
///     Listing::new("City Inn", 800.0),
/// ];
/// let summary = CollectionSummary::of(&listings);
/// assert_eq!(summary.listings, 2);
/// assert_eq!(summary.reviews, 120);
/// assert_eq!(summary.happy, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CollectionSummary {
    /// Number of listings loaded.
    pub listings: usize,
    /// Reviews summed over every listing; a listing without a count adds none.
    pub reviews: u64,
    /// Listings whose precomputed face status is happy.
    pub happy: usize,
}

impl CollectionSummary {
    /// Count `listings`.
    #[must_use]
    pub fn of(listings: &[Listing]) -> Self {
        Self {
            listings: listings.len(),
            reviews: listings
                .iter()
                .map(|listing| u64::from(listing.review_count))
                .sum(),
            happy: listings
                .iter()
                .filter(|listing| listing.face_status == Some(Sentiment::Happy))
                .count(),
        }
    }
}

/// Sub-aspects shown under one parent heading.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubAspectGroup {
    /// Parent aspect, or [`OTHER_GROUP`].
    pub aspect: String,
    /// Available sub-aspects under this heading, in taxonomy order.
    pub sub_aspects: Vec<String>,
}

/// Static mapping from parent aspects to related sub-aspects.
///
/// The mapping only groups checkboxes for presentation; it never affects
/// filtering. A sub-aspect may appear under several parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AspectTaxonomy {
    entries: Vec<(String, Vec<String>)>,
}

impl AspectTaxonomy {
    /// Create an empty taxonomy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a parent aspect with its sub-aspects while returning `self`.
    #[must_use]
    pub fn with_aspect<I, S>(mut self, aspect: impl Into<String>, sub_aspects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.push((
            aspect.into(),
            sub_aspects.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Sub-aspects listed under `aspect`, if the taxonomy knows it.
    #[must_use]
    pub fn sub_aspects(&self, aspect: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == aspect)
            .map(|(_, subs)| subs.as_slice())
    }

    /// Iterate over parent aspect names in table order.
    pub fn aspects(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Group the `available` sub-aspects under their parents.
    ///
    /// Parents with no available sub-aspect are omitted. Sub-aspects the table
    /// does not mention end up in a trailing [`OTHER_GROUP`].
    ///
    /// # Examples
    /// ```
    /// use staysift_core::{AspectTaxonomy, OTHER_GROUP};
    ///
    /// let taxonomy = AspectTaxonomy::default();
    /// let available = ["sea".to_owned(), "wifi".to_owned()];
    /// let groups = taxonomy.group(&available);
    ///
    /// assert_eq!(groups[0].aspect, "Beach & Water");
    /// assert_eq!(groups[0].sub_aspects, ["sea"]);
    /// assert_eq!(groups[1].aspect, OTHER_GROUP);
    /// assert_eq!(groups[1].sub_aspects, ["wifi"]);
    /// ```
    #[must_use]
    pub fn group(&self, available: &[String]) -> Vec<SubAspectGroup> {
        let mut placed = HashSet::new();
        let mut groups: Vec<SubAspectGroup> = self
            .entries
            .iter()
            .filter_map(|(aspect, subs)| {
                let present: Vec<String> = subs
                    .iter()
                    .filter(|sub| available.contains(sub))
                    .cloned()
                    .collect();
                placed.extend(present.iter().cloned());
                (!present.is_empty()).then(|| SubAspectGroup {
                    aspect: aspect.clone(),
                    sub_aspects: present,
                })
            })
            .collect();

        let other: Vec<String> = available
            .iter()
            .filter(|sub| !placed.contains(*sub))
            .cloned()
            .collect();
        if !other.is_empty() {
            groups.push(SubAspectGroup {
                aspect: OTHER_GROUP.to_owned(),
                sub_aspects: other,
            });
        }
        groups
    }
}

impl Default for AspectTaxonomy {
    fn default() -> Self {
        DEFAULT_TAXONOMY
            .iter()
            .fold(Self::new(), |taxonomy, (aspect, subs)| {
                taxonomy.with_aspect(*aspect, subs.iter().copied())
            })
    }
}
