use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Partial profile update. Missing or empty fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(max = 50))]
    pub first_name: Option<String>,

    #[validate(length(max = 50))]
    pub last_name: Option<String>,

    #[validate(length(max = 100))]
    pub email: Option<String>,

    pub password: Option<String>,

    #[validate(length(max = 20))]
    #[schema(example = "user")]
    pub role: Option<String>,

    #[validate(length(max = 20))]
    #[schema(example = "active")]
    pub status: Option<String>,

    /// Replaces the stored preference tags when present.
    pub preferences: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QueryLogRequest {
    #[validate(length(min = 1, max = 1000, message = "Query text must be 1-1000 characters"))]
    #[schema(example = "how do I make risotto")]
    pub query_text: String,
}

#[derive(Debug, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Maximum number of entries, newest first (default 50).
    pub limit: Option<i64>,
}
