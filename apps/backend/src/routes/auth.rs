//! Account endpoints that hand out session tokens.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::jwt::issue_token;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{Validate, ValidatedJson};
use crate::logging::security;
use crate::state::app_state::AppState;
use crate::users::{NewUser, PublicUser, UserRecord};

const MIN_USERNAME_CHARS: usize = 3;
const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), AppError> {
        check_credentials_shape(&self.username, &self.password)?;

        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            if !looks_like_email(email) {
                return Err(AppError::invalid(
                    ErrorCode::ValidationError,
                    "email must be a valid email address",
                ));
            }
        }

        if self.phone.trim().is_empty() {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                "phone is required",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), AppError> {
        check_credentials_shape(&self.username, &self.password)
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

fn check_credentials_shape(username: &str, password: &str) -> Result<(), AppError> {
    if username.chars().count() < MIN_USERNAME_CHARS {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            format!("username must be at least {MIN_USERNAME_CHARS} characters"),
        ));
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            format!("password must be at least {MIN_PASSWORD_CHARS} characters"),
        ));
    }
    Ok(())
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

fn session_response(state: &AppState, user: &UserRecord) -> Result<HttpResponse, AppError> {
    let token = issue_token(user.id, &user.username, state.clock.now(), &state.security)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: PublicUser::from(user),
    }))
}

async fn register(
    state: web::Data<AppState>,
    body: ValidatedJson<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let user = state
        .users
        .create_user(NewUser {
            username: body.username,
            password: body.password,
            email: body.email.filter(|e| !e.is_empty()),
            phone: body.phone,
        })
        .await?;

    info!(user_id = user.id, "user registered");
    session_response(&state, &user)
}

async fn login(
    state: web::Data<AppState>,
    body: ValidatedJson<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let Some(user) = state.users.find_by_username(&body.username).await? else {
        security::login_failed("unknown_user", &body.username);
        return Err(AppError::not_found(
            ErrorCode::UserNotFound,
            "User is not registered",
        ));
    };

    // A token is only ever issued after the password check passes.
    if !user.password_matches(&body.password) {
        security::login_failed("password_mismatch", &body.username);
        return Err(AppError::invalid_credentials());
    }

    info!(user_id = user.id, "user logged in");
    session_response(&state, &user)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}
