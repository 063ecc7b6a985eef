//! The featured band.
//!
//! Independent of every other selection: only the bucket filter matters, and
//! it is matched against the precomputed face status rather than the computed
//! score. Listings without a face status never appear in the band.

use crate::{Listing, Sentiment};

/// Listings whose face status equals `bucket` (default happy), most
/// expensive first.
///
/// # Examples
/// ```
/// use staysift_core::{Listing, Sentiment, featured};
///
/// let listings = [
///     Listing::new("City Inn", 800.0).with_face_status(Sentiment::Happy),
///     Listing::new("Blue Bay Resort", 1200.0).with_face_status(Sentiment::Happy),
///     Listing::new("Dockside Rooms", 400.0).with_face_status(Sentiment::Sad),
/// ];
///
/// let band = featured(&listings, None);
/// assert_eq!(band.len(), 2);
/// assert_eq!(band[0].name, "Blue Bay Resort");
///
/// let sad = featured(&listings, Some(Sentiment::Sad));
/// assert_eq!(sad[0].name, "Dockside Rooms");
/// ```
#[must_use]
pub fn featured(listings: &[Listing], bucket: Option<Sentiment>) -> Vec<&Listing> {
    let wanted = bucket.unwrap_or(Sentiment::Happy);
    let mut band: Vec<&Listing> = listings
        .iter()
        .filter(|listing| listing.face_status == Some(wanted))
        .collect();
    band.sort_by(|a, b| b.price.total_cmp(&a.price));
    band
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_listings;
    use rstest::rstest;

    #[rstest]
    fn default_band_is_happy_by_price() {
        let listings = sample_listings();
        let names: Vec<&str> = featured(&listings, None)
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, ["Olive Grove Resort", "Blue Bay Resort"]);
    }

    #[rstest]
    fn band_ignores_aspect_scores() {
        let listings = [Listing::new("Quiet", 100.0)
            .with_face_status(Sentiment::Neutral)
            .with_aspect("cleanliness", 0.95)];
        assert!(featured(&listings, None).is_empty());
        assert_eq!(featured(&listings, Some(Sentiment::Neutral)).len(), 1);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(Sentiment::Happy))]
    #[case(Some(Sentiment::Neutral))]
    #[case(Some(Sentiment::Sad))]
    fn unannotated_listing_is_never_featured(#[case] bucket: Option<Sentiment>) {
        let listings = [Listing::new("Unrated Pension", 300.0).with_aspect("service", 0.9)];
        assert!(featured(&listings, bucket).is_empty());
    }
}
