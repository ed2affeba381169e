//! HTTP calls for the browse page. Both `/api/get_data` operations go
//! through the same endpoint; schema discovery is selected by the reserved
//! `target_columns` value.

use contracts::browse::{
    FilesResponse, GetDataRequest, QueryPayload, QueryResponse, SchemaPayload, SchemaResponse,
    COLUMN_NAMES_ONLY,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::shared::api_utils::api_url;

/// Fetch the catalog of available files. Non-2xx responses are not parsed.
pub async fn fetch_files() -> Result<Vec<String>, String> {
    let response = Request::get(&api_url("/api/files"))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        return Err(format!("server returned status {}", response.status()));
    }

    match response.json::<FilesResponse>().await.map_err(|e| e.to_string())? {
        FilesResponse::Files(files) => Ok(files),
        FilesResponse::Error { error } => Err(error),
    }
}

/// Schema discovery: the sentinel request against the selected files.
pub async fn load_schema(selected_files: Vec<String>) -> Result<SchemaPayload, String> {
    let request = GetDataRequest {
        selected_files,
        target_columns: COLUMN_NAMES_ONLY.to_string(),
    };
    let response = post_get_data(&request).await?;
    match decode_body::<SchemaResponse>(response).await? {
        SchemaResponse::Schema(schema) => Ok(schema),
        SchemaResponse::Error { error } => Err(error),
    }
}

/// Full data query with a user-supplied target-columns expression.
pub async fn fetch_data(
    selected_files: Vec<String>,
    target_columns: String,
) -> Result<QueryPayload, String> {
    let request = GetDataRequest {
        selected_files,
        target_columns,
    };
    let response = post_get_data(&request).await?;
    match decode_body::<QueryResponse>(response).await? {
        QueryResponse::Result(result) => Ok(result),
        QueryResponse::Error { error } => Err(error),
    }
}

async fn post_get_data(request: &GetDataRequest) -> Result<Response, String> {
    Request::post(&api_url("/api/get_data"))
        .json(request)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())
}

// The backend reports application errors as `{"error": ...}` bodies on 4xx
// and 5xx statuses; those are surfaced verbatim by the untagged decode. Only
// when the body does not decode do we fall back to the bare status code.
async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    let status = response.status();
    match response.json::<T>().await {
        Ok(body) => Ok(body),
        Err(e) if (200..300).contains(&status) => Err(format!("failed to parse response: {}", e)),
        Err(_) => Err(format!("server returned status {}", status)),
    }
}
