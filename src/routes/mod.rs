// ABOUTME: Route module organization for the routine coach HTTP endpoints
// ABOUTME: Groups page, API, and health routes and shares response helpers between them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for Routine Coach
//!
//! Each domain module contains route definitions and thin handlers that
//! delegate to the composer, the renderer, and the session store.

/// JSON routine API
pub mod api;
/// Health check and readiness routes
pub mod health;
/// HTML page rendering
pub mod pages;
/// Browser form routes
pub mod routine;

/// JSON API route handlers
pub use api::ApiRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Form route handlers
pub use routine::RoutineRoutes;

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::constants::server::{PDF_FILE_NAME, PDF_MIME_TYPE};
use crate::pdf::RenderedDocument;
use crate::session::SessionHandle;

/// Offer a rendered document as a `routine.pdf` download
#[must_use]
pub fn pdf_response(document: RenderedDocument) -> Response {
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(PDF_MIME_TYPE)),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_str(&format!("attachment; filename=\"{PDF_FILE_NAME}\""))
                    .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
            ),
        ],
        document.bytes,
    )
        .into_response()
}

/// Add the session cookie to a response when the session is new
#[must_use]
pub fn attach_session_cookie(mut response: Response, session: &SessionHandle) -> Response {
    if let Some(cookie) = session.set_cookie() {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}
