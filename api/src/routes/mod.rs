use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::Request;
use serde::{Deserialize, Serialize};

use crate::error::CafeError;

pub mod products;
pub mod reports;
pub mod tables;

// API response envelope
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub message: String,
    pub result: Option<T>,
}

pub type ApiResult<T> = (Status, Json<ApiResponse<T>>);

pub fn ok<T>(result: T) -> ApiResult<T> {
    (Status::Ok, Json(ApiResponse {
        message: "200: Success".to_string(),
        result: Some(result),
    }))
}

pub fn created<T>(result: T) -> ApiResult<T> {
    (Status::Created, Json(ApiResponse {
        message: "201: Created".to_string(),
        result: Some(result),
    }))
}

/// Maps an operation error onto a status and message. Store failures are
/// logged here and reported to the caller without detail.
pub fn failure<T>(err: CafeError) -> ApiResult<T> {
    let (status, message) = match err {
        CafeError::NotFound(msg) => (Status::NotFound, format!("404: Not Found - {}", msg)),
        CafeError::Validation(msg) => (Status::BadRequest, format!("400: Bad Request - {}", msg)),
        CafeError::Store(e) => {
            tracing::error!(error = %e, "store operation failed");
            (Status::InternalServerError, "500: Internal Server Error".to_string())
        }
    };
    (status, Json(ApiResponse { message, result: None }))
}

#[catch(404)]
pub fn not_found(req: &Request) -> Json<ApiResponse<String>> {
    Json(ApiResponse {
        message: format!("404: '{}' route not found", req.uri()),
        result: None,
    })
}

#[catch(422)]
pub fn unprocessable(req: &Request) -> Json<ApiResponse<String>> {
    Json(ApiResponse {
        message: format!("422: Unprocessable Entity - malformed body for '{}'", req.uri()),
        result: None,
    })
}

#[catch(400)]
pub fn bad_request(req: &Request) -> Json<ApiResponse<String>> {
    Json(ApiResponse {
        message: format!("400: Bad Request - could not parse request to '{}'", req.uri()),
        result: None,
    })
}

#[catch(500)]
pub fn internal_error() -> Json<ApiResponse<String>> {
    Json(ApiResponse {
        message: "500: Internal Server Error".to_string(),
        result: None,
    })
}
