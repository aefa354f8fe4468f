use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{
        Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    http::{HeaderMap, header::SET_COOKIE},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    error::{AppError, PageError},
    filter::country_choices,
    gate::session_cookie,
    html::{explorer_page, login_page},
    state::AppState,
    view::{Explorer, SearchResponse, SelectionParams},
};

#[derive(Deserialize)]
pub struct LoginForm {
    password: String,
}

/// Set by the login redirect after a wrong password.
#[derive(Deserialize)]
pub struct GateParams {
    rejected: Option<String>,
}

const REJECTED_REDIRECT: &str = "/?rejected=1";

pub async fn index_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    gate: Result<Query<GateParams>, QueryRejection>,
    params: Result<Query<SelectionParams>, QueryRejection>,
) -> Result<Response, PageError> {
    let rejected = gate.is_ok_and(|Query(gate)| gate.rejected.is_some());
    let gate_state = state.sessions.state(&headers, rejected);

    if !gate_state.is_unlocked() {
        return Ok(Html(login_page(gate_state)).into_response());
    }

    let Query(params) = params.map_err(|_| AppError::MalformedPayload)?;
    let dataset = state.dataset().await?;
    let explorer = Explorer::build(dataset, params.into_selection());
    let page = explorer_page(&explorer).map_err(|e| AppError::InternalError(Box::new(e)))?;

    Ok(Html(page).into_response())
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form.map_err(|_| AppError::MalformedPayload)?;

    if state.sessions.is_unlocked(&headers) {
        return Ok(Redirect::to("/").into_response());
    }

    let Some(id) = state.sessions.attempt(&state.gate, &form.password) else {
        return Ok(Redirect::to(REJECTED_REDIRECT).into_response());
    };

    let cookie = session_cookie(id).map_err(|e| AppError::InternalError(Box::new(e)))?;
    let mut response = Redirect::to("/").into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);

    Ok(response)
}

pub async fn countries_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    require_unlocked(&state, &headers)?;

    let dataset = state.dataset().await?;

    Ok(Json(country_choices(dataset)).into_response())
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    params: Result<Query<SelectionParams>, QueryRejection>,
) -> Result<Response, AppError> {
    require_unlocked(&state, &headers)?;

    let Query(params) = params.map_err(|_| AppError::MalformedPayload)?;
    let dataset = state.dataset().await?;
    let explorer = Explorer::build(dataset, params.into_selection());

    Ok(Json(SearchResponse::from(&explorer)).into_response())
}

pub async fn health_handler() -> impl IntoResponse {
    "ok"
}

fn require_unlocked(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    if state.sessions.is_unlocked(headers) {
        Ok(())
    } else {
        Err(AppError::Locked)
    }
}
