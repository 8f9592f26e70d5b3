use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Which pipeline stage produced a document's insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Provenance {
    #[serde(rename = "AI")]
    Ai,
    Keyword,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Ai => "AI",
            Provenance::Keyword => "Keyword",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provenance {
    type Err = InsightDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AI" => Ok(Provenance::Ai),
            "Keyword" => Ok(Provenance::Keyword),
            other => Err(InsightDecodeError::UnknownProvenance(other.to_string())),
        }
    }
}

/// Errors raised while decoding a stored insight payload.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InsightDecodeError {
    #[error("unknown provenance '{0}'")]
    UnknownProvenance(String),

    #[error("stored summary is empty")]
    EmptySummary,

    #[error("malformed keyword list: {0}")]
    MalformedKeywords(String),
}

/// The result of processing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insight {
    /// Free-text summary from the language model.
    Summary(String),
    /// Ranked keywords from the local fallback analysis.
    Keywords(Vec<String>),
}

impl Insight {
    pub fn provenance(&self) -> Provenance {
        match self {
            Insight::Summary(_) => Provenance::Ai,
            Insight::Keywords(_) => Provenance::Keyword,
        }
    }

    /// Encode the payload for the single `insights` text column.
    ///
    /// Keyword lists are stored as a JSON array so keywords containing commas survive.
    pub fn to_stored(&self) -> String {
        match self {
            Insight::Summary(summary) => summary.clone(),
            Insight::Keywords(keywords) => {
                serde_json::to_string(keywords).unwrap_or_else(|_| "[]".to_string())
            }
        }
    }

    /// Decode a stored payload according to its provenance tag.
    ///
    /// Every read path goes through here. Keyword rows written as a comma-joined
    /// string are still accepted.
    pub fn from_stored(provenance: Provenance, raw: &str) -> Result<Self, InsightDecodeError> {
        match provenance {
            Provenance::Ai => {
                if raw.trim().is_empty() {
                    return Err(InsightDecodeError::EmptySummary);
                }
                Ok(Insight::Summary(raw.to_string()))
            }
            Provenance::Keyword => {
                let trimmed = raw.trim();
                if trimmed.starts_with('[') {
                    serde_json::from_str::<Vec<String>>(trimmed)
                        .map(Insight::Keywords)
                        .map_err(|e| InsightDecodeError::MalformedKeywords(e.to_string()))
                } else if trimmed.is_empty() {
                    Ok(Insight::Keywords(Vec::new()))
                } else {
                    Ok(Insight::Keywords(
                        trimmed.split(',').map(|k| k.to_string()).collect(),
                    ))
                }
            }
        }
    }
}

/// One processed upload.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub id: Uuid,
    pub filename: String,
    /// Size of the stored bytes in megabytes.
    pub filesize: f64,
    pub upload_date: DateTime<Utc>,
    pub insight: Insight,
}

impl DocumentRecord {
    pub fn new(
        filename: impl Into<String>,
        size_bytes: u64,
        upload_date: DateTime<Utc>,
        insight: Insight,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            filesize: bytes_to_megabytes(size_bytes),
            upload_date,
            insight,
        }
    }

    pub fn provenance(&self) -> Provenance {
        self.insight.provenance()
    }

    /// Timestamp text as stored. Fixed precision keeps lexical and chronological order equal.
    pub fn upload_date_text(&self) -> String {
        format_upload_date(&self.upload_date)
    }
}

pub fn bytes_to_megabytes(size_bytes: u64) -> f64 {
    size_bytes as f64 / (1024.0 * 1024.0)
}

pub fn format_upload_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// `{top_keywords: [...]}` body used when the keyword fallback produced the insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KeywordInsight {
    pub top_keywords: Vec<String>,
}

/// Insight as rendered over HTTP: a bare string for summaries, an object for keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum InsightBody {
    Summary(String),
    Keywords(KeywordInsight),
}

impl From<Insight> for InsightBody {
    fn from(insight: Insight) -> Self {
        match insight {
            Insight::Summary(summary) => InsightBody::Summary(summary),
            Insight::Keywords(top_keywords) => InsightBody::Keywords(KeywordInsight { top_keywords }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub filename: String,
    pub filesize: f64,
    pub upload_date: String,
    pub processed_by: Provenance,
    pub insights: InsightBody,
}

impl From<DocumentRecord> for DocumentResponse {
    fn from(record: DocumentRecord) -> Self {
        DocumentResponse {
            id: record.id,
            upload_date: record.upload_date_text(),
            processed_by: record.provenance(),
            filename: record.filename,
            filesize: record.filesize,
            insights: InsightBody::from(record.insight),
        }
    }
}
