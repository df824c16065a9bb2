//! Last-resort handler for panics inside request handling.
//!
//! Turns a panic into the same `{ "error": ... }` 500 body used by
//! `AppError::Internal`, carrying the panic message when there is one.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use roast_common::error::AppError;

pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else {
        String::new()
    };

    AppError::Internal(message).into_response()
}
