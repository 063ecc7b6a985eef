//! Three-level sentiment labels shared by buckets and face statuses.
//!
//! A [`Sentiment`] is both the precomputed `face_status` supplied with each
//! listing and the bucket a numeric score falls into.
//!
//! # Examples
//! ```
//! use staysift_core::Sentiment;
//!
//! assert_eq!(Sentiment::Happy.as_str(), "happy");
//! assert_eq!(Sentiment::from_score(0.4), Sentiment::Neutral);
//! ```

use thiserror::Error;

/// Lower bound (inclusive) of the happy bucket.
pub const HAPPY_THRESHOLD: f64 = 0.7;
/// Lower bound (inclusive) of the neutral bucket.
pub const NEUTRAL_THRESHOLD: f64 = 0.4;

/// Emoji shown when a listing has no score for the current selection.
pub const UNKNOWN_EMOJI: &str = "❓";

/// Coarse sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Sentiment {
    /// Score of at least 0.7.
    Happy,
    /// Score in `[0.4, 0.7)`.
    Neutral,
    /// Score below 0.4.
    Sad,
}

impl Sentiment {
    /// Every label, best first.
    pub const ALL: [Self; 3] = [Self::Happy, Self::Neutral, Self::Sad];

    /// Map a score onto its bucket.
    ///
    /// Thresholds are half-open: `0.7` is happy and `0.4` is neutral.
    ///
    /// # Examples
    /// ```
    /// use staysift_core::Sentiment;
    ///
    /// assert_eq!(Sentiment::from_score(0.7), Sentiment::Happy);
    /// assert_eq!(Sentiment::from_score(0.699_99), Sentiment::Neutral);
    /// assert_eq!(Sentiment::from_score(0.399_99), Sentiment::Sad);
    /// ```
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= HAPPY_THRESHOLD {
            Self::Happy
        } else if score >= NEUTRAL_THRESHOLD {
            Self::Neutral
        } else {
            Self::Sad
        }
    }

    /// Return the label as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Sad => "sad",
        }
    }

    /// Face emoji used by the listing cards.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Happy => "😄",
            Self::Neutral => "😐",
            Self::Sad => "😞",
        }
    }
}

/// Map an optional score onto its bucket. `None` stays unknown.
#[must_use]
pub fn bucket(score: Option<f64>) -> Option<Sentiment> {
    score.map(Sentiment::from_score)
}

/// Emoji for an optional bucket, falling back to [`UNKNOWN_EMOJI`].
#[must_use]
pub fn bucket_emoji(bucket: Option<Sentiment>) -> &'static str {
    bucket.map_or(UNKNOWN_EMOJI, Sentiment::emoji)
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a sentiment label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sentiment '{0}' (expected happy, neutral or sad)")]
pub struct ParseSentimentError(pub String);

impl std::str::FromStr for Sentiment {
    type Err = ParseSentimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Self::Happy),
            "neutral" => Ok(Self::Neutral),
            "sad" => Ok(Self::Sad),
            _ => Err(ParseSentimentError(s.to_owned())),
        }
    }
}
