/// Request extractors with API-shaped rejections
///
/// axum's `Json` and `Path` answer bad input with a plain-text body. These
/// wrappers route the rejection through [`ApiError`] so clients always get
/// `{error, message, details}`.

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
