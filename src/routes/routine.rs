// ABOUTME: HTML routine routes for the form, the Generate action, and the Print action
// ABOUTME: Stores successful routines in the session and serves routine.pdf downloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Browser-facing routes. Errors never escape as JSON here: they are
//! rendered into the page with the status code of the underlying error.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::pages::{home_page, Notice, PageView};
use super::{attach_session_cookie, pdf_response};
use crate::composer::compose_and_generate;
use crate::errors::AppError;
use crate::models::{normalize, Diet, Experience, GeneratedRoutine, Goal, Sex, UserProfile};
use crate::pdf::render_blocking;
use crate::resources::ServerResources;
use crate::session::SessionHandle;

/// Generate form payload
#[derive(Debug, Deserialize)]
pub struct RoutineForm {
    /// Age in years
    pub age: u32,
    /// Height in centimeters
    pub height_cm: u32,
    /// Biological sex
    pub sex: Sex,
    /// Training days per week
    pub training_days: u32,
    /// Diet type
    pub diet: Diet,
    /// Goal
    pub goal: Goal,
    /// Checkbox: present when ticked
    #[serde(default)]
    pub gym_access: Option<String>,
    /// Experience
    pub experience: Experience,
    /// Medical condition, may be empty
    #[serde(default)]
    pub medical_condition: String,
}

impl RoutineForm {
    /// Convert to a profile; an unticked checkbox is simply absent
    #[must_use]
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            age: self.age,
            height_cm: self.height_cm,
            sex: self.sex,
            training_days: self.training_days,
            diet: self.diet,
            goal: self.goal,
            gym_access: matches!(self.gym_access.as_deref(), Some("on" | "true" | "1")),
            experience: self.experience,
            medical_condition: self.medical_condition,
        }
    }
}

/// Routine page routes
pub struct RoutineRoutes;

impl RoutineRoutes {
    /// Create all routine page routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::index))
            .route("/routine/generate", post(Self::generate))
            .route("/routine/print", post(Self::print))
            .with_state(resources)
    }

    fn page(
        resources: &ServerResources,
        status: StatusCode,
        profile: &UserProfile,
        notice: Option<&Notice>,
        routine: Option<&GeneratedRoutine>,
    ) -> Response {
        let html = home_page(&PageView {
            profile,
            notice,
            routine,
            generation_enabled: resources.is_generation_enabled(),
        });
        (status, Html(html)).into_response()
    }

    fn error_status(error: &AppError) -> StatusCode {
        StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Show the form and the session's last routine
    async fn index(State(resources): State<Arc<ServerResources>>, headers: HeaderMap) -> Response {
        let session = SessionHandle::from_headers(&headers);
        let routine = resources.sessions.last_routine(session.id).await;
        let response = Self::page(
            &resources,
            StatusCode::OK,
            &UserProfile::default(),
            None,
            routine.as_ref(),
        );
        attach_session_cookie(response, &session)
    }

    /// Generate a routine; the session slot changes only on success
    async fn generate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        form: Result<Form<RoutineForm>, FormRejection>,
    ) -> Response {
        let session = SessionHandle::from_headers(&headers);

        let (profile, outcome) = match form {
            Ok(Form(form)) => {
                let profile = form.into_profile();
                let outcome = match resources.provider() {
                    Ok(provider) => {
                        compose_and_generate(&profile, provider, &resources.generation).await
                    }
                    Err(e) => Err(e),
                };
                (profile, outcome)
            }
            Err(rejection) => (
                UserProfile::default(),
                Err(AppError::invalid_input(rejection.body_text())),
            ),
        };

        let response = match outcome {
            Ok(text) => {
                let routine = GeneratedRoutine::Text(text);
                resources
                    .sessions
                    .record_routine(session.id, routine.clone())
                    .await;
                info!(session = %session.id, "Routine generated for session");
                Self::page(
                    &resources,
                    StatusCode::OK,
                    &profile,
                    Some(&Notice::Success("Routine generated and saved.".to_owned())),
                    Some(&routine),
                )
            }
            Err(error) => {
                warn!(session = %session.id, error = %error, "Routine generation failed");
                let previous = resources.sessions.last_routine(session.id).await;
                Self::page(
                    &resources,
                    Self::error_status(&error),
                    &profile,
                    Some(&Notice::Error(format!(
                        "An error occurred while generating the routine: {}",
                        error.message
                    ))),
                    previous.as_ref(),
                )
            }
        };

        attach_session_cookie(response, &session)
    }

    /// Render the session's routine as `routine.pdf`
    async fn print(State(resources): State<Arc<ServerResources>>, headers: HeaderMap) -> Response {
        let session = SessionHandle::from_headers(&headers);

        let Some(routine) = resources.sessions.last_routine(session.id).await else {
            let response = Self::page(
                &resources,
                StatusCode::CONFLICT,
                &UserProfile::default(),
                Some(&Notice::Warning(
                    "Generate a routine first, then print it.".to_owned(),
                )),
                None,
            );
            return attach_session_cookie(response, &session);
        };

        let response = match render_blocking(normalize(routine.clone())).await {
            Ok(document) => pdf_response(document),
            Err(error) => Self::page(
                &resources,
                Self::error_status(&error),
                &UserProfile::default(),
                Some(&Notice::Error(error.message)),
                Some(&routine),
            ),
        };

        attach_session_cookie(response, &session)
    }
}
