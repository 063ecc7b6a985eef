//! Ordering of filtered listings.
//!
//! All comparators use a stable sort, so listings that tie keep the relative
//! order the filter stage produced. Listings carry no secondary key.

use std::cmp::Ordering;

use crate::{Listing, ScoredListing, SortKey, scorer};

/// Sort already-scored listings in place.
///
/// Unscored listings count as `0.0` for the recommendation order only.
pub fn rank_scored(candidates: &mut [ScoredListing<'_>], sort: SortKey) {
    candidates.sort_by(|a, b| compare(sort, a, b));
}

fn compare(sort: SortKey, a: &ScoredListing<'_>, b: &ScoredListing<'_>) -> Ordering {
    match sort {
        SortKey::PriceAsc => a.listing.price.total_cmp(&b.listing.price),
        SortKey::PriceDesc => b.listing.price.total_cmp(&a.listing.price),
        SortKey::Recommendation => b
            .score
            .unwrap_or(0.0)
            .total_cmp(&a.score.unwrap_or(0.0)),
    }
}

/// Order `listings` by `sort`, scoring them against `aspects` when the
/// recommendation order needs it.
///
/// # Examples
/// ```
/// use staysift_core::{Listing, SortKey, rank};
///
/// let blue = Listing::new("Blue Bay Resort", 1200.0).with_aspect("cleanliness", 0.8);
/// let inn = Listing::new("City Inn", 800.0).with_aspect("cleanliness", 0.3);
///
/// let ranked = rank(vec![&inn, &blue], SortKey::Recommendation, &["cleanliness".to_owned()]);
/// assert_eq!(ranked[0].name, "Blue Bay Resort");
///
/// let cheapest = rank(vec![&blue, &inn], SortKey::PriceAsc, &[]);
/// assert_eq!(cheapest[0].name, "City Inn");
/// ```
#[must_use]
pub fn rank<'a>(listings: Vec<&'a Listing>, sort: SortKey, aspects: &[String]) -> Vec<&'a Listing> {
    let mut candidates: Vec<ScoredListing<'a>> = listings
        .into_iter()
        .map(|listing| ScoredListing {
            listing,
            score: match sort {
                SortKey::Recommendation => scorer::score(listing, aspects),
                SortKey::PriceAsc | SortKey::PriceDesc => None,
            },
        })
        .collect();
    rank_scored(&mut candidates, sort);
    candidates.into_iter().map(|c| c.listing).collect()
}
