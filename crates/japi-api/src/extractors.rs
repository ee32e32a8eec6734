//! # Request Body Extraction
//!
//! The engine takes the raw body as text. [`RawBody`] reads it as UTF-8 and
//! rejects anything unreadable with a JSON:API error document, so even a
//! refused request gets a protocol-shaped response.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use japi_core::ErrorCode;

use crate::gateway::{rejection_response, rejection_with_status, GatewayResponse};

/// The request body as text. Empty when the request has none.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawBody(pub String);

impl<S> FromRequest<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = GatewayResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let url = req.uri().to_string();
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            rejection_with_status(
                rejection.status().as_u16(),
                ErrorCode::INVALID_REQUEST,
                &rejection.body_text(),
                &url,
            )
        })?;
        String::from_utf8(bytes.to_vec()).map(RawBody).map_err(|_| {
            rejection_response(
                ErrorCode::INVALID_REQUEST,
                "request body is not valid UTF-8",
                &url,
            )
        })
    }
}
