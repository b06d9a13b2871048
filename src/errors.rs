use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::JsonResponse;

// SQLite extended result codes, followed by their PostgreSQL counterparts.
const MALFORMED_INPUT_CODES: &[&str] = &[
    "20",    // SQLITE_MISMATCH
    "1299",  // SQLITE_CONSTRAINT_NOTNULL
    "3091",  // SQLITE_CONSTRAINT_DATATYPE
    "787",   // SQLITE_CONSTRAINT_FOREIGNKEY
    "22P02", // invalid_text_representation
    "23502", // not_null_violation
    "23503", // foreign_key_violation
];
const CONFLICT_CODES: &[&str] = &[
    "1555",  // SQLITE_CONSTRAINT_PRIMARYKEY
    "2067",  // SQLITE_CONSTRAINT_UNIQUE
    "23505", // unique_violation
];

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Bad request.")]
    MalformedInput,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("Internal Server Error.")]
    Internal,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct RequestErrorJson {
    pub message: String,
}

impl RequestErrorJson {
    pub fn new(message: &str) -> RequestErrorJson {
        RequestErrorJson {
            message: message.to_string(),
        }
    }
}

impl From<sqlx::Error> for RequestError {
    fn from(value: sqlx::Error) -> Self {
        classify_driver_error(&value).unwrap_or_else(|| {
            tracing::error!(error = %value, "unclassified database error");
            RequestError::Internal
        })
    }
}

impl From<JsonRejection> for RequestError {
    fn from(value: JsonRejection) -> Self {
        tracing::debug!(rejection = %value, "rejected request body");
        RequestError::MalformedInput
    }
}

impl From<QueryRejection> for RequestError {
    fn from(value: QueryRejection) -> Self {
        tracing::debug!(rejection = %value, "rejected query string");
        RequestError::MalformedInput
    }
}

/// Maps a recognised driver error code onto the request taxonomy.
///
/// The 400-shaped codes are checked first so a constraint failure is never
/// reported as a conflict or swallowed by the 500 fallback.
pub fn classify_driver_error(error: &sqlx::Error) -> Option<RequestError> {
    let code = match error {
        sqlx::Error::Database(db_error) => db_error.code()?,
        _ => return None,
    };
    classify_code(&code)
}

fn classify_code(code: &str) -> Option<RequestError> {
    if MALFORMED_INPUT_CODES.contains(&code) {
        return Some(RequestError::MalformedInput);
    }
    if CONFLICT_CODES.contains(&code) {
        return Some(RequestError::Conflict("Resource already exists."));
    }
    None
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        self.to_json_response().into_response()
    }
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::MalformedInput | RequestError::Conflict(_) => StatusCode::BAD_REQUEST,
            RequestError::NotFound(_) => StatusCode::NOT_FOUND,
            RequestError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_json_response(&self) -> JsonResponse<RequestErrorJson> {
        (
            self.status_code(),
            Json(RequestErrorJson::new(&self.to_string())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_codes_for_bad_input_map_to_400() {
        for code in ["20", "1299", "22P02", "23502"] {
            let error = classify_code(code).unwrap();
            assert!(matches!(error, RequestError::MalformedInput), "{code}");
            assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn unique_violations_are_conflicts() {
        let error = classify_code("2067").unwrap();
        assert!(matches!(error, RequestError::Conflict(_)));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_codes_fall_through() {
        assert!(classify_code("5").is_none());
        assert!(classify_code("42P01").is_none());
    }

    #[test]
    fn non_database_errors_become_internal() {
        let error = RequestError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(error, RequestError::Internal));
        let (status, Json(body)) = error.to_json_response();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal Server Error.");
    }

    #[test]
    fn explicit_rejections_keep_their_message() {
        let (status, Json(body)) = RequestError::NotFound("Article not found.").to_json_response();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Article not found.");

        let (status, Json(body)) = RequestError::MalformedInput.to_json_response();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Bad request.");
    }
}
