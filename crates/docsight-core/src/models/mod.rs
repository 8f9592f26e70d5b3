pub mod document;

pub use document::{
    bytes_to_megabytes, format_upload_date, DocumentRecord, DocumentResponse, Insight,
    InsightBody, InsightDecodeError, KeywordInsight, Provenance,
};
