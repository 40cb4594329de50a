use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use log::error;

use crate::classifier::ClassifierError;

use super::render::escape_html;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        let body = format!(
            "<!DOCTYPE html><html><head><title>Error</title></head><body>\
             <h1>Something went wrong</h1><pre>{}</pre></body></html>",
            escape_html(&self.to_string())
        );
        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}
