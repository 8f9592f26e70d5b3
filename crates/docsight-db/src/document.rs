use anyhow::{anyhow, Context};
use chrono::{DateTime, NaiveDateTime, Utc};
use docsight_core::models::format_upload_date;
use docsight_core::{AppError, DocumentRecord, Insight, Provenance};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, Sqlite, SqlitePool};
use uuid::Uuid;

const SELECT_COLUMNS: &str =
    "SELECT id, filename, filesize, upload_date, processed_by, insights FROM documents";

/// A `documents` row as stored, before any decoding.
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    filename: String,
    filesize: f64,
    upload_date: String,
    processed_by: String,
    insights: String,
}

impl DocumentRow {
    /// Column types and payload are checked per row, so one bad row never fails a whole query.
    fn decode_row(row: &SqliteRow) -> anyhow::Result<DocumentRecord> {
        let raw = DocumentRow::from_row(row).context("unexpected column types")?;
        raw.decode()
    }

    fn decode(self) -> anyhow::Result<DocumentRecord> {
        let id = Uuid::parse_str(&self.id).with_context(|| format!("invalid id '{}'", self.id))?;
        let upload_date = parse_upload_date(&self.upload_date)?;
        let provenance: Provenance = self.processed_by.parse()?;
        let insight = Insight::from_stored(provenance, &self.insights)?;

        Ok(DocumentRecord {
            id,
            filename: self.filename,
            filesize: self.filesize,
            upload_date,
            insight,
        })
    }
}

/// RFC 3339 timestamps, plus offset-less ISO-8601 values which are read as UTC.
fn parse_upload_date(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| anyhow!("invalid upload_date '{}'", raw))
}

/// Repository for processed documents
#[derive(Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Persist a processed document
    #[tracing::instrument(
        skip(self, record),
        fields(db.table = "documents", db.operation = "insert", db.record_id = %record.id)
    )]
    pub async fn insert(&self, record: &DocumentRecord) -> Result<(), AppError> {
        sqlx::query::<Sqlite>(
            r#"
            INSERT INTO documents (id, filename, filesize, upload_date, processed_by, insights)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.filename)
        .bind(record.filesize)
        .bind(format_upload_date(&record.upload_date))
        .bind(record.provenance().as_str())
        .bind(record.insight.to_stored())
        .execute(&self.pool)
        .await?;

        tracing::debug!(processed_by = %record.provenance(), "Document stored");
        Ok(())
    }

    /// All documents, newest first. Rows that fail to decode are logged and skipped.
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select"))]
    pub async fn list_all(&self) -> Result<Vec<DocumentRecord>, AppError> {
        let rows = sqlx::query::<Sqlite>(&format!(
            "{} ORDER BY upload_date DESC, rowid DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        let total = rows.len();
        let mut documents = Vec::with_capacity(total);

        for row in &rows {
            match DocumentRow::decode_row(row) {
                Ok(record) => documents.push(record),
                Err(e) => {
                    let id = row
                        .try_get::<String, _>("id")
                        .unwrap_or_else(|_| "<unreadable>".to_string());
                    tracing::error!(document_id = %id, error = %format!("{:#}", e), "Skipping undecodable document row");
                }
            }
        }

        if documents.len() < total {
            tracing::warn!(
                skipped = total - documents.len(),
                total,
                "Some document rows could not be decoded"
            );
        }

        Ok(documents)
    }

    /// Get a document by ID
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select", db.record_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<DocumentRecord>, AppError> {
        let row = sqlx::query::<Sqlite>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            None => Ok(None),
            Some(row) => DocumentRow::decode_row(&row).map(Some).map_err(|e| {
                tracing::error!(document_id = %id, error = %format!("{:#}", e), "Stored document could not be decoded");
                AppError::CorruptRecord {
                    id: id.to_string(),
                    reason: format!("{:#}", e),
                }
            }),
        }
    }

    /// Cheap connectivity probe
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<Sqlite, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
