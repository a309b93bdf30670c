//! Payload types for the recommendation backend.

use serde::Deserialize;

/// A song as the backend reports it. Immutable once received; the player
/// and the result list hold clones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub id: i64,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    /// Length in seconds, when the catalog knows it.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Recommendation score; only present on recommendation payloads.
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
}

/// Response of the `/api/health` and `/api/test_db` probes.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthStatus {
    /// The probes use different vocabulary for "fine".
    pub fn is_ok(&self) -> bool {
        matches!(self.status.as_str(), "healthy" | "success" | "ok")
    }
}

/// Response of a rate call.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingUpdate {
    pub new_rating: f64,
}

/// The recommendation strategies the backend can serve.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecKind {
    Hybrid,
    Collaborative,
    Content,
    Popular,
    New,
    #[serde(alias = "high_rated")]
    HighRated,
}

impl Default for RecKind {
    fn default() -> Self {
        Self::Hybrid
    }
}

impl RecKind {
    /// Path segment under `/api/recommendations/`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hybrid => "hybrid",
            Self::Collaborative => "collaborative",
            Self::Content => "content",
            Self::Popular => "popular",
            Self::New => "new",
            Self::HighRated => "high_rated",
        }
    }

    /// Human-readable name for the status line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hybrid => "Hybrid",
            Self::Collaborative => "Collaborative",
            Self::Content => "By content",
            Self::Popular => "Popular",
            Self::New => "New releases",
            Self::HighRated => "Highly rated",
        }
    }

    /// Next strategy in the cycle order.
    pub fn next(self) -> Self {
        match self {
            Self::Hybrid => Self::Collaborative,
            Self::Collaborative => Self::Content,
            Self::Content => Self::Popular,
            Self::Popular => Self::New,
            Self::New => Self::HighRated,
            Self::HighRated => Self::Hybrid,
        }
    }
}
