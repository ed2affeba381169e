use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved `target_columns` value: the backend returns the merged column
/// list and a small sample instead of running a full projection.
pub const COLUMN_NAMES_ONLY: &str = "GET_COLUMN_NAMES_ONLY";

/// One result row. Cell values are backend-formatted scalars; a column may be
/// absent from a row entirely (files with different schemas are unioned by
/// name).
pub type DataRow = serde_json::Map<String, Value>;

// ============================================================================
// POST /api/get_data
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDataRequest {
    pub selected_files: Vec<String>,
    pub target_columns: String,
}

/// Schema discovery response (sentinel request). The sample block is
/// optional: the backend may be able to describe the columns but still fail
/// to fetch a sample row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaPayload {
    pub all_columns: Vec<String>,
    #[serde(default)]
    pub sample_data: Option<Vec<DataRow>>,
    #[serde(default)]
    pub sample_data_columns: Option<Vec<String>>,
    #[serde(default)]
    pub sample_data_row_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPayload {
    pub data: Vec<DataRow>,
    pub columns: Vec<String>,
    pub row_count: u64,
}

// The backend reports application errors as `{"error": "..."}` bodies.
// Untagged with the error variant first: any body carrying an `error` field
// decodes as an error, everything else must match the success shape.

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaResponse {
    Error { error: String },
    Schema(SchemaPayload),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Error { error: String },
    Result(QueryPayload),
}

// ============================================================================
// GET /api/files
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FilesResponse {
    Error { error: String },
    Files(Vec<String>),
}
