//! Hotel listings and their sparse aspect score maps.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::Sentiment;

/// Sparse map from aspect (or sub-aspect) name to a score in `[0.0, 1.0]`.
///
/// A missing key means "no opinion", never zero.
pub type ScoreMap = BTreeMap<String, f64>;

/// Placeholder rendered when a listing carries no rating.
pub const MISSING_RATING_LABEL: &str = "-";

/// One catalog entry.
///
/// `name` doubles as the lookup key and is assumed unique within a
/// collection. Scores are clamped into `0.0..=1.0` by the builder methods.
///
/// # Examples
/// ```
/// use staysift_core::Listing;
///
/// let listing = Listing::new("Blue Bay Resort", 1200.0)
///     .with_aspect("cleanliness", 0.8)
///     .with_sub_aspect("sea_view", 0.9);
///
/// assert_eq!(listing.aspect_score("cleanliness"), Some(0.8));
/// assert!(listing.aspect_score("service").is_none());
/// assert_eq!(listing.rating_label(), "-");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "crate::ListingRecord", into = "crate::ListingRecord")
)]
pub struct Listing {
    /// Display name and lookup key.
    pub name: String,
    /// Nightly price, currency-agnostic.
    pub price: f64,
    /// Mean review rating in `[0.0, 5.0]`, if known.
    pub rating: Option<f64>,
    /// Number of reviews behind the rating.
    pub review_count: u32,
    /// Per-aspect sentiment scores.
    pub aspect_scores: ScoreMap,
    /// Per-sub-aspect sentiment scores.
    pub sub_aspect_scores: ScoreMap,
    /// Sentiment precomputed upstream for the whole listing, if annotated.
    pub face_status: Option<Sentiment>,
    /// Categorical type, when the source supplies one.
    pub listing_type: Option<ListingType>,
    /// Opaque image reference for presentation.
    pub image_url: Option<String>,
}

impl Listing {
    /// Construct a listing with no scores, no rating and no face status.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            rating: None,
            review_count: 0,
            aspect_scores: ScoreMap::new(),
            sub_aspect_scores: ScoreMap::new(),
            face_status: None,
            listing_type: None,
            image_url: None,
        }
    }

    /// Return the score for `aspect`, if the listing has one.
    #[must_use]
    pub fn aspect_score(&self, aspect: &str) -> Option<f64> {
        self.aspect_scores.get(aspect).copied()
    }

    /// Return the score for `sub_aspect`, if the listing has one.
    #[must_use]
    pub fn sub_aspect_score(&self, sub_aspect: &str) -> Option<f64> {
        self.sub_aspect_scores.get(sub_aspect).copied()
    }

    /// Insert or update an aspect score.
    ///
    /// Values are clamped into `0.0..=1.0`; non-finite values are dropped.
    pub fn set_aspect_score(&mut self, aspect: impl Into<String>, score: f64) {
        insert_score(&mut self.aspect_scores, aspect.into(), score);
    }

    /// Insert or update a sub-aspect score with the same rules as
    /// [`Listing::set_aspect_score`].
    pub fn set_sub_aspect_score(&mut self, sub_aspect: impl Into<String>, score: f64) {
        insert_score(&mut self.sub_aspect_scores, sub_aspect.into(), score);
    }

    /// Add an aspect score while returning `self` for chaining.
    #[must_use]
    pub fn with_aspect(mut self, aspect: impl Into<String>, score: f64) -> Self {
        self.set_aspect_score(aspect, score);
        self
    }

    /// Add a sub-aspect score while returning `self` for chaining.
    #[must_use]
    pub fn with_sub_aspect(mut self, sub_aspect: impl Into<String>, score: f64) -> Self {
        self.set_sub_aspect_score(sub_aspect, score);
        self
    }

    /// Set the rating, clamped into `0.0..=5.0`.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating.is_finite().then(|| rating.clamp(0.0, 5.0));
        self
    }

    /// Set the review count.
    #[must_use]
    pub const fn with_review_count(mut self, review_count: u32) -> Self {
        self.review_count = review_count;
        self
    }

    /// Set the precomputed face status.
    #[must_use]
    pub const fn with_face_status(mut self, face_status: Sentiment) -> Self {
        self.face_status = Some(face_status);
        self
    }

    /// Set the categorical type.
    #[must_use]
    pub const fn with_type(mut self, listing_type: ListingType) -> Self {
        self.listing_type = Some(listing_type);
        self
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Render the rating for display, using `-` when it is unknown.
    ///
    /// # Examples
    /// ```
    /// use staysift_core::Listing;
    ///
    /// let listing = Listing::new("City Inn", 800.0).with_rating(4.26);
    /// assert_eq!(listing.rating_label(), "4.3");
    /// ```
    #[must_use]
    pub fn rating_label(&self) -> String {
        self.rating
            .map_or_else(|| MISSING_RATING_LABEL.to_owned(), |r| format!("{r:.1}"))
    }
}

fn insert_score(scores: &mut ScoreMap, key: String, score: f64) {
    if !score.is_finite() {
        log::warn!("dropping non-finite score {score} for '{key}'");
        return;
    }
    scores.insert(key, score.clamp(0.0, 1.0));
}

/// Categorical listing type.
///
/// Parsing is case-insensitive and accepts the Turkish labels used by the
/// source data (`Otel`, `Butik`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum ListingType {
    /// Full-service resort.
    Resort,
    /// Standard hotel.
    Hotel,
    /// Small boutique property.
    Boutique,
}

impl ListingType {
    /// Every type, in presentation order.
    pub const ALL: [Self; 3] = [Self::Resort, Self::Hotel, Self::Boutique];

    /// Return the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resort => "Resort",
            Self::Hotel => "Hotel",
            Self::Boutique => "Boutique",
        }
    }
}

impl std::fmt::Display for ListingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a listing type label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown listing type '{0}'")]
pub struct ParseListingTypeError(pub String);

impl std::str::FromStr for ListingType {
    type Err = ParseListingTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "resort" => Ok(Self::Resort),
            "hotel" | "otel" => Ok(Self::Hotel),
            "boutique" | "butik" => Ok(Self::Boutique),
            _ => Err(ParseListingTypeError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for ListingType {
    type Error = ParseListingTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ListingType> for String {
    fn from(value: ListingType) -> Self {
        value.as_str().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn builder_clamps_scores() {
        let listing = Listing::new("Clamp", 100.0)
            .with_aspect("service", 1.4)
            .with_sub_aspect("staff", -0.2);
        assert_eq!(listing.aspect_score("service"), Some(1.0));
        assert_eq!(listing.sub_aspect_score("staff"), Some(0.0));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn builder_drops_non_finite_scores(#[case] score: f64) {
        let listing = Listing::new("Broken", 100.0).with_aspect("service", score);
        assert!(listing.aspect_score("service").is_none());
    }

    #[rstest]
    fn missing_rating_renders_placeholder() {
        let listing = Listing::new("Unrated", 100.0);
        assert_eq!(listing.rating_label(), MISSING_RATING_LABEL);
        assert_eq!(listing.review_count, 0);
    }

    #[rstest]
    #[case("Resort", ListingType::Resort)]
    #[case("otel", ListingType::Hotel)]
    #[case("Butik", ListingType::Boutique)]
    #[case("BOUTIQUE", ListingType::Boutique)]
    fn type_parsing_accepts_aliases(#[case] raw: &str, #[case] expected: ListingType) {
        assert_eq!(raw.parse::<ListingType>(), Ok(expected));
    }

    #[rstest]
    fn type_parsing_rejects_unknown() {
        assert!("hostel".parse::<ListingType>().is_err());
    }
}
