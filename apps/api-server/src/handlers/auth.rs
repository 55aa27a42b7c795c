//! Authentication handlers.
//!
//! Account-flow failures (bad credentials, duplicate username/email,
//! password mismatch) deliberately answer HTTP 200 with an inline error
//! message, the API equivalent of re-rendering the form. Transport-level
//! problems still use the RFC 7807 error path.

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::{HttpResponse, web};
use std::sync::Arc;

use blogforge_core::domain::User;
use blogforge_core::ports::{PasswordService, TokenService};
use blogforge_shared::dto::{AccountResponse, LoginRequest, SignupRequest, UserResponse};

use crate::middleware::auth::{Identity, SESSION_COOKIE};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        username: user.username.clone(),
        email: user.email.clone(),
        created_at: user.created_at.to_rfc3339(),
    }
}

fn session_cookie(token: String, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age_seconds))
        .finish()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::ZERO)
        .finish()
}

/// POST /api/auth/signup
pub async fn signup(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.password != req.repeat_password {
        return Ok(HttpResponse::Ok().json(AccountResponse::error("Passwords do not match.")));
    }

    if state.users.find_by_username(&req.username).await?.is_some() {
        return Ok(HttpResponse::Ok().json(AccountResponse::error(
            "That username is already taken. Please choose another.",
        )));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User::new(req.username, req.email, password_hash);
    let saved = match state.users.save(user).await {
        Ok(saved) => saved,
        // Username was checked above, so a constraint hit here is the
        // email uniqueness index.
        Err(blogforge_core::error::RepoError::Constraint(msg)) => {
            tracing::debug!(%msg, "signup constraint violation");
            return Ok(HttpResponse::Ok().json(AccountResponse::error(
                "An account with that email already exists.",
            )));
        }
        Err(e) => {
            tracing::error!("unexpected error during signup: {e}");
            return Ok(HttpResponse::Ok().json(AccountResponse::error(
                "An unexpected error occurred. Please try again.",
            )));
        }
    };

    let token = token_service
        .generate_token(saved.id, &saved.username, &saved.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token, token_service.expiration_seconds()))
        .json(AccountResponse::ok(user_response(&saved))))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let invalid = || {
        HttpResponse::Ok().json(AccountResponse::error(
            "Invalid username or password. Please try again.",
        ))
    };

    let Some(user) = state.users.find_by_username(&req.username).await? else {
        return Ok(invalid());
    };

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Ok(invalid());
    }

    let token = token_service
        .generate_token(user.id, &user.username, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token, token_service.expiration_seconds()))
        .json(AccountResponse::ok(user_response(&user))))
}

/// POST /api/auth/logout - clears the session and points back at login.
pub async fn logout(identity: Identity) -> AppResult<HttpResponse> {
    tracing::debug!(username = %identity.username, "logout");

    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/api/auth/login"))
        .cookie(removal_cookie())
        .finish())
}

/// GET /api/auth/me - the authenticated user's profile.
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(user_response(&user)))
}
