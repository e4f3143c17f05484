use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` whose rejection is rendered through [`AppError`], so a malformed body still gets
/// the `{success:false, ...}` shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
