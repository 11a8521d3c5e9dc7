// ABOUTME: JSON API mirroring the routine form for programmatic clients
// ABOUTME: Generates routines, reads the session routine, and renders supplied routines to PDF
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{attach_session_cookie, pdf_response};
use crate::composer::compose_and_generate;
use crate::errors::{AppError, AppResult};
use crate::models::{normalize, GeneratedRoutine, UserProfile};
use crate::pdf::render_blocking;
use crate::resources::ServerResources;
use crate::session::SessionHandle;

/// Routine envelope returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineResponse {
    /// Generated or stored routine
    pub routine: GeneratedRoutine,
}

/// JSON routine API routes
pub struct ApiRoutes;

impl ApiRoutes {
    /// Create all API routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/routine",
                post(Self::generate_routine).get(Self::get_routine),
            )
            .route("/api/routine/pdf", post(Self::render_routine))
            .with_state(resources)
    }

    async fn generate(
        resources: &ServerResources,
        session: &SessionHandle,
        payload: Result<Json<UserProfile>, JsonRejection>,
    ) -> AppResult<RoutineResponse> {
        let Json(profile) = payload.map_err(|e| AppError::invalid_input(e.body_text()))?;
        let text =
            compose_and_generate(&profile, resources.provider()?, &resources.generation).await?;

        let routine = GeneratedRoutine::Text(text);
        resources
            .sessions
            .record_routine(session.id, routine.clone())
            .await;
        Ok(RoutineResponse { routine })
    }

    /// Generate a routine from a JSON profile and store it in the session
    async fn generate_routine(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<UserProfile>, JsonRejection>,
    ) -> Response {
        let session = SessionHandle::from_headers(&headers);
        let response = Self::generate(&resources, &session, payload)
            .await
            .map(Json)
            .into_response();
        attach_session_cookie(response, &session)
    }

    /// Return the session's last routine
    async fn get_routine(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<RoutineResponse>, AppError> {
        let session = SessionHandle::from_headers(&headers);
        resources
            .sessions
            .last_routine(session.id)
            .await
            .map(|routine| Json(RoutineResponse { routine }))
            .ok_or_else(|| AppError::not_found("Routine for this session"))
    }

    /// Render a supplied routine (text or record) to `routine.pdf`
    async fn render_routine(
        payload: Result<Json<GeneratedRoutine>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(routine) = payload.map_err(|e| AppError::invalid_input(e.body_text()))?;
        let document = render_blocking(normalize(routine)).await?;
        Ok(pdf_response(document))
    }
}
