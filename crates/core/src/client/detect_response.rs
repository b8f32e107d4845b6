//! Wire types of the detection endpoint and the result shown to users.
use serde::{Deserialize, Deserializer, Serialize};

use crate::client::detect_client::DetectError;
use crate::detection::domain::similarity::SimilarityReport;

/// Successful `/detect` body. Every field is optional on the wire: the
/// client only insists on `cosine_similarity` being present, and an explicit
/// `null` there counts as present (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub cosine_similarity: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub euclidean_similarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_likely_deepfake: Option<bool>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

impl DetectResponse {
    pub const SUCCESS_MESSAGE: &'static str = "Analysis completed successfully";

    pub fn completed(report: &SimilarityReport) -> Self {
        Self {
            message: Some(Self::SUCCESS_MESSAGE.to_string()),
            cosine_similarity: Some(Some(report.cosine_similarity)),
            euclidean_similarity: Some(report.euclidean_similarity),
            is_likely_deepfake: Some(report.is_likely_deepfake),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Manipulated,
    Authentic,
}

impl Verdict {
    pub fn from_flag(is_likely_deepfake: bool) -> Self {
        if is_likely_deepfake {
            Verdict::Manipulated
        } else {
            Verdict::Authentic
        }
    }

    /// Value next to "Likely Deepfake:".
    pub fn answer(self) -> &'static str {
        match self {
            Verdict::Manipulated => "Yes",
            Verdict::Authentic => "No",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Verdict::Manipulated => "This image appears to be manipulated",
            Verdict::Authentic => "This image appears to be authentic",
        }
    }
}

/// What the result card renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectResult {
    pub cosine_similarity: f64,
    pub euclidean_similarity: Option<f64>,
    pub is_likely_deepfake: bool,
}

impl DetectResult {
    pub fn from_response(response: DetectResponse) -> Result<Self, DetectError> {
        // A null score is shown like a zero one.
        let cosine_similarity = response
            .cosine_similarity
            .ok_or(DetectError::InvalidResponse)?
            .unwrap_or(0.0);
        Ok(Self {
            cosine_similarity,
            euclidean_similarity: response.euclidean_similarity,
            is_likely_deepfake: response.is_likely_deepfake.unwrap_or(false),
        })
    }

    /// Two decimals; an exact zero score shows as `N/A`.
    pub fn similarity_score(&self) -> String {
        if self.cosine_similarity == 0.0 {
            "N/A".to_string()
        } else {
            format!("{:.2}", self.cosine_similarity)
        }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_flag(self.is_likely_deepfake)
    }
}
