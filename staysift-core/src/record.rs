//! Wire representation of a listing and its validation.
//!
//! [`ListingRecord`] mirrors the JSON emitted by the hotel backend
//! (`hotel_name`, `aspects`, `subaspects`, ...). Converting a record into a
//! [`Listing`] is the normalisation boundary: every number is checked here so
//! the engine can trust what it receives.

use thiserror::Error;

use crate::{Listing, ListingType, ScoreMap, Sentiment};

/// Errors returned when a [`ListingRecord`] cannot become a [`Listing`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListingError {
    /// The name was empty or whitespace.
    #[error("listing name must not be empty")]
    EmptyName,
    /// The price was negative or not finite.
    #[error("listing '{name}' has invalid price {price}")]
    InvalidPrice {
        /// Name of the offending listing.
        name: String,
        /// Raw price.
        price: f64,
    },
    /// The rating was outside `0.0..=5.0` or not finite.
    #[error("listing '{name}' has invalid rating {rating}")]
    InvalidRating {
        /// Name of the offending listing.
        name: String,
        /// Raw rating.
        rating: f64,
    },
    /// An aspect or sub-aspect score was outside `0.0..=1.0` or not finite.
    #[error("listing '{name}' has invalid score {score} for '{key}'")]
    InvalidScore {
        /// Name of the offending listing.
        name: String,
        /// Aspect or sub-aspect name.
        key: String,
        /// Raw score.
        score: f64,
    },
}

/// Listing as supplied by the data-fetch collaborator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListingRecord {
    /// Display name.
    #[cfg_attr(feature = "serde", serde(rename = "hotel_name", alias = "name"))]
    pub name: String,
    /// Nightly price.
    pub price: f64,
    /// Mean rating, `null` when unknown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: Option<f64>,
    /// Number of reviews; absent means zero.
    #[cfg_attr(feature = "serde", serde(default))]
    pub review_count: u32,
    /// Aspect scores.
    #[cfg_attr(feature = "serde", serde(default, rename = "aspects"))]
    pub aspect_scores: ScoreMap,
    /// Sub-aspect scores.
    #[cfg_attr(feature = "serde", serde(default, rename = "subaspects"))]
    pub sub_aspect_scores: ScoreMap,
    /// Precomputed face status. The hotel backend sends only `face_score`
    /// and `face_emoji`, so an unannotated record carries none.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub face_status: Option<Sentiment>,
    /// Categorical type.
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "type", skip_serializing_if = "Option::is_none")
    )]
    pub listing_type: Option<ListingType>,
    /// Image reference.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub image_url: Option<String>,
}

impl TryFrom<ListingRecord> for Listing {
    type Error = ListingError;

    fn try_from(record: ListingRecord) -> Result<Self, Self::Error> {
        if record.name.trim().is_empty() {
            return Err(ListingError::EmptyName);
        }
        if !record.price.is_finite() || record.price < 0.0 {
            return Err(ListingError::InvalidPrice {
                name: record.name,
                price: record.price,
            });
        }
        if let Some(rating) = record.rating
            && !(rating.is_finite() && (0.0..=5.0).contains(&rating))
        {
            return Err(ListingError::InvalidRating {
                name: record.name,
                rating,
            });
        }
        check_scores(&record.name, &record.aspect_scores)?;
        check_scores(&record.name, &record.sub_aspect_scores)?;

        Ok(Self {
            name: record.name,
            price: record.price,
            rating: record.rating,
            review_count: record.review_count,
            aspect_scores: record.aspect_scores,
            sub_aspect_scores: record.sub_aspect_scores,
            face_status: record.face_status,
            listing_type: record.listing_type,
            image_url: record.image_url,
        })
    }
}

impl From<Listing> for ListingRecord {
    fn from(listing: Listing) -> Self {
        Self {
            name: listing.name,
            price: listing.price,
            rating: listing.rating,
            review_count: listing.review_count,
            aspect_scores: listing.aspect_scores,
            sub_aspect_scores: listing.sub_aspect_scores,
            face_status: listing.face_status,
            listing_type: listing.listing_type,
            image_url: listing.image_url,
        }
    }
}

fn check_scores(name: &str, scores: &ScoreMap) -> Result<(), ListingError> {
    let invalid = scores
        .iter()
        .find(|(_, score)| !(score.is_finite() && (0.0..=1.0).contains(*score)));
    match invalid {
        Some((key, score)) => Err(ListingError::InvalidScore {
            name: name.to_owned(),
            key: key.clone(),
            score: *score,
        }),
        None => Ok(()),
    }
}

/// Validate a batch of records, stopping at the first invalid one.
///
/// # Errors
/// Returns the [`ListingError`] of the first record that fails validation.
pub fn listings_from_records<I>(records: I) -> Result<Vec<Listing>, ListingError>
where
    I: IntoIterator<Item = ListingRecord>,
{
    records.into_iter().map(Listing::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn record() -> ListingRecord {
        ListingRecord {
            name: "Blue Bay Resort".to_owned(),
            price: 1200.0,
            rating: Some(4.5),
            review_count: 12,
            aspect_scores: ScoreMap::from([("cleanliness".to_owned(), 0.8)]),
            sub_aspect_scores: ScoreMap::new(),
            face_status: Some(Sentiment::Happy),
            listing_type: Some(ListingType::Resort),
            image_url: None,
        }
    }

    #[rstest]
    fn valid_record_converts(record: ListingRecord) {
        let listing = Listing::try_from(record).expect("record should validate");
        assert_eq!(listing.name, "Blue Bay Resort");
        assert_eq!(listing.aspect_score("cleanliness"), Some(0.8));
    }

    #[rstest]
    fn blank_name_is_rejected(mut record: ListingRecord) {
        record.name = "  ".to_owned();
        assert_eq!(Listing::try_from(record), Err(ListingError::EmptyName));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn bad_price_is_rejected(mut record: ListingRecord, #[case] price: f64) {
        record.price = price;
        let err = Listing::try_from(record).expect_err("price should be rejected");
        assert!(matches!(err, ListingError::InvalidPrice { .. }));
    }

    #[rstest]
    fn out_of_range_rating_is_rejected(mut record: ListingRecord) {
        record.rating = Some(5.5);
        let err = Listing::try_from(record).expect_err("rating should be rejected");
        assert!(matches!(err, ListingError::InvalidRating { .. }));
    }

    #[rstest]
    fn out_of_range_sub_aspect_is_rejected(mut record: ListingRecord) {
        record
            .sub_aspect_scores
            .insert("sea_view".to_owned(), 1.5);
        match Listing::try_from(record) {
            Err(ListingError::InvalidScore { key, .. }) => assert_eq!(key, "sea_view"),
            other => panic!("expected InvalidScore, found {other:?}"),
        }
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn backend_json_decodes() {
        let json = r#"[{
            "hotel_name": "City Inn",
            "price": 800,
            "rating": null,
            "aspects": {"cleanliness": 0.3},
            "subaspects": {"staff": 0.6},
            "face_status": "sad",
            "type": "Otel"
        }]"#;
        let records: Vec<ListingRecord> = serde_json::from_str(json).expect("decode records");
        let listings = listings_from_records(records).expect("validate records");
        let [listing] = listings.as_slice() else {
            panic!("expected one listing");
        };
        assert_eq!(listing.review_count, 0);
        assert_eq!(listing.rating, None);
        assert_eq!(listing.face_status, Some(Sentiment::Sad));
        assert_eq!(listing.listing_type, Some(ListingType::Hotel));
        assert_eq!(listing.sub_aspect_score("staff"), Some(0.6));
    }
}
