//! Test-only sample data shared by unit and behaviour tests.

use crate::{Listing, ListingType, Sentiment};

/// Four listings covering every bucket, type and quick filter.
///
/// | name | price | cleanliness | service | face |
/// |---|---|---|---|---|
/// | Blue Bay Resort | 1200 | 0.8 | 0.6 | happy |
/// | City Inn | 800 | 0.3 | - | sad |
/// | Harbour Boutique | 650 | 0.5 | 0.45 | neutral |
/// | Olive Grove Resort | 2400 | 0.9 | - | happy |
#[must_use]
pub fn sample_listings() -> Vec<Listing> {
    vec![
        Listing::new("Blue Bay Resort", 1200.0)
            .with_aspect("cleanliness", 0.8)
            .with_aspect("service", 0.6)
            .with_sub_aspect("staff", 0.7)
            .with_sub_aspect("sea", 0.9)
            .with_face_status(Sentiment::Happy)
            .with_type(ListingType::Resort)
            .with_rating(4.6)
            .with_review_count(120),
        Listing::new("City Inn", 800.0)
            .with_aspect("cleanliness", 0.3)
            .with_sub_aspect("staff", 0.6)
            .with_face_status(Sentiment::Sad)
            .with_type(ListingType::Hotel),
        Listing::new("Harbour Boutique", 650.0)
            .with_aspect("cleanliness", 0.5)
            .with_aspect("service", 0.45)
            .with_sub_aspect("sea", 0.4)
            .with_face_status(Sentiment::Neutral)
            .with_type(ListingType::Boutique)
            .with_rating(3.9)
            .with_review_count(18),
        Listing::new("Olive Grove Resort", 2400.0)
            .with_aspect("cleanliness", 0.9)
            .with_aspect("location", 0.7)
            .with_sub_aspect("breakfast", 0.8)
            .with_sub_aspect("staff", 0.5)
            .with_face_status(Sentiment::Happy)
            .with_type(ListingType::Resort),
    ]
}

/// The two listings used in the worked examples: Blue Bay Resort and City
/// Inn.
#[must_use]
pub fn worked_example_listings() -> Vec<Listing> {
    vec![
        Listing::new("Blue Bay Resort", 1200.0)
            .with_aspect("cleanliness", 0.8)
            .with_aspect("service", 0.6),
        Listing::new("City Inn", 800.0).with_aspect("cleanliness", 0.3),
    ]
}
