pub mod recipe;

use axum::Json;
use axum::http::StatusCode;

use crate::models::recipe::MessageBody;

/// Fallback for routes that match nothing else.
pub async fn not_found() -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageBody {
            message: "not found".into(),
        }),
    )
}
