//! Derive a recommendation score for a listing from a chosen set of aspects.
//!
//! The [`AspectScorer`] trait is the seam between the filter pipeline and the
//! scoring rule. [`MeanAspectScorer`] implements the default rule: the
//! arithmetic mean of the selected aspects the listing actually has.

use crate::Listing;

/// Calculate a recommendation score for a listing.
///
/// Implementations must be pure: the same listing and aspect selection always
/// yield the same result, so callers may compute the score once per pipeline
/// run and reuse it. Returning `None` means "no opinion", which is distinct
/// from a score of `0.0`.
///
/// Implementations must:
/// - Return `None` when `aspects` is empty.
/// - Produce finite scores within `0.0..=1.0` otherwise.
///
/// # Examples
///
/// ```rust
/// use staysift_core::{AspectScorer, Listing};
///
/// struct Constant;
///
/// impl AspectScorer for Constant {
///     fn score(&self, _listing: &Listing, aspects: &[String]) -> Option<f64> {
///         (!aspects.is_empty()).then_some(0.5)
///     }
/// }
///
/// let listing = Listing::new("City Inn", 800.0);
/// assert_eq!(Constant.score(&listing, &["service".to_owned()]), Some(0.5));
/// assert_eq!(Constant.score(&listing, &[]), None);
/// ```
pub trait AspectScorer: Send + Sync {
    /// Return a score for `listing` over the selected `aspects`.
    fn score(&self, listing: &Listing, aspects: &[String]) -> Option<f64>;

    /// Clamp a raw score and discard non-finite values.
    fn sanitise(score: f64) -> Option<f64>
    where
        Self: Sized,
    {
        score.is_finite().then(|| score.clamp(0.0, 1.0))
    }
}

/// Mean of the selected aspects present on the listing.
///
/// Aspects the listing has no score for are skipped rather than counted as
/// zero.
///
/// # Examples
/// ```
/// use staysift_core::{AspectScorer, Listing, MeanAspectScorer};
///
/// let listing = Listing::new("City Inn", 800.0).with_aspect("cleanliness", 0.3);
/// let aspects = ["cleanliness".to_owned(), "service".to_owned()];
/// assert_eq!(MeanAspectScorer.score(&listing, &aspects), Some(0.3));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MeanAspectScorer;

impl AspectScorer for MeanAspectScorer {
    #[expect(
        clippy::float_arithmetic,
        reason = "the score is an arithmetic mean of aspect scores"
    )]
    fn score(&self, listing: &Listing, aspects: &[String]) -> Option<f64> {
        let mut total = 0.0_f64;
        let mut count = 0.0_f64;
        for score in aspects
            .iter()
            .filter_map(|aspect| listing.aspect_score(aspect))
        {
            total += score;
            count += 1.0;
        }
        if count == 0.0 {
            return None;
        }
        Self::sanitise(total / count)
    }
}

/// Score `listing` with the default [`MeanAspectScorer`].
///
/// # Examples
/// ```
/// use staysift_core::{Listing, score};
///
/// let listing = Listing::new("Blue Bay Resort", 1200.0)
///     .with_aspect("cleanliness", 0.8)
///     .with_aspect("service", 0.6);
/// let aspects = ["cleanliness".to_owned(), "service".to_owned()];
///
/// let value = score(&listing, &aspects).unwrap_or_default();
/// assert!((value - 0.7).abs() < 1e-9);
/// assert_eq!(score(&listing, &[]), None);
/// ```
#[must_use]
pub fn score(listing: &Listing, aspects: &[String]) -> Option<f64> {
    MeanAspectScorer.score(listing, aspects)
}
