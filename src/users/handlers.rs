use anyhow::Context;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRef, Query, State,
    },
    routing::{get, post},
    Form, Json, Router,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    auth::{extractors::AuthUser, jwt::JwtKeys},
    error::{AppError, AppResult},
    state::AppState,
    users::dto::{ApiEnvelope, LoginParams, PublicUser, RegisterRequest, SUCCESS_MESSAGE},
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/UserRegistration", post(register))
        .route("/CheckLogin", post(check_login))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/GetUserData", get(get_user_data))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<Json<ApiEnvelope>> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection, "malformed registration body");
        AppError::validation(rejection.body_text())
    })?;

    state.accounts.register(payload.into()).await?;
    Ok(Json(ApiEnvelope::success(SUCCESS_MESSAGE)))
}

#[instrument(skip_all)]
pub async fn check_login(
    State(state): State<AppState>,
    query: Result<Query<LoginParams>, QueryRejection>,
    form: Option<Form<LoginParams>>,
) -> AppResult<Json<ApiEnvelope>> {
    let Query(query) = query.map_err(|rejection| {
        warn!(error = %rejection, "malformed login query");
        AppError::InvalidCredentials
    })?;
    let params = query.or(form.map(|Form(f)| f).unwrap_or_default());
    let (Some(username), Some(password)) = (params.username, params.password) else {
        warn!("login without username or password");
        return Err(AppError::InvalidCredentials);
    };

    let user = state.accounts.check_login(username.trim(), &password).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.issue(&user).context("sign access token")?;
    info!(user_id = %user.id, "access token issued");

    Ok(Json(ApiEnvelope::success(SUCCESS_MESSAGE).with_token(token)))
}

#[instrument(skip_all)]
pub async fn get_user_data(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> AppResult<Json<ApiEnvelope>> {
    let user = state.accounts.get_current_user(claims.id).await?;
    debug!(user_id = %user.id, "profile resolved");
    let value = serde_json::to_value(PublicUser::from(user)).context("serialize user")?;
    Ok(Json(ApiEnvelope::success(SUCCESS_MESSAGE).with_value(value)))
}
