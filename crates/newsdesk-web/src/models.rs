use serde::{Deserialize, Serialize};

/// Query string of `GET /api/news`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Query string of `GET /api/admin/news`.
#[derive(Debug, Default, Deserialize)]
pub struct AdminListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// A status name, or `all`.
    pub status: Option<String>,
}

/// Body of `PATCH /api/admin/news/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub count: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
