//! Member registration and login handlers.

use aide::axum::ApiRouter;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use garden_postgres::PgClient;
use garden_postgres::models::NewMember;
use garden_postgres::queries::MemberRepository;
use garden_postgres::types::MemberRole;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::handler::{Error, ErrorKind, Result};
use crate::service::{AuthHasher, ServiceState, TokenIssuer};

/// Tracing target for authentication handlers.
const TRACING_TARGET: &str = "garden_server::handler::authentication";

/// Request payload for registration.
#[must_use]
#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    /// Email address of the new account.
    #[validate(email)]
    pub email_address: String,
    /// Password of the new account.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// Display name shown on listings.
    #[validate(length(min = 1, max = 64))]
    pub display_name: String,
}

/// Request payload for login.
#[must_use]
#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    /// Email address of the account.
    #[validate(email)]
    pub email_address: String,
    /// Password of the account.
    pub password: String,
}

/// Response returned after successful registration or login.
#[must_use]
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    /// ID of the member account.
    pub member_id: Uuid,
    /// Display name of the member.
    pub display_name: String,
    /// Compact session token for the `Authorization: Bearer` header.
    pub access_token: String,
    /// Expiry of the token as epoch milliseconds.
    pub expires_at_ms: i64,
}

/// The uniform rejection for bad credentials.
///
/// Unknown email and wrong password must be indistinguishable to the caller.
fn invalid_credentials() -> Error<'static> {
    ErrorKind::Unauthorized
        .with_resource("authentication")
        .into_static()
}

/// Creates a new member account and issues a session token.
#[tracing::instrument(skip_all)]
async fn register(
    State(pg_client): State<PgClient>,
    State(auth_hasher): State<AuthHasher>,
    State(token_issuer): State<TokenIssuer>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    request
        .validate()
        .map_err(|e| ErrorKind::BadRequest.with_context(e.to_string()).into_static())?;

    let email = request.email_address.to_lowercase();
    let mut conn = pg_client.get_connection().await?;

    if MemberRepository::find_member_by_email(&mut conn, &email)
        .await?
        .is_some()
    {
        tracing::debug!(target: TRACING_TARGET, "registration with existing email");
        return Err(ErrorKind::Conflict
            .with_message("An account with this email already exists")
            .with_resource("members")
            .into_static());
    }

    let password_hash = auth_hasher.hash_password(&request.password)?;
    let new_member = NewMember {
        email_address: email,
        password_hash,
        display_name: request.display_name,
        role: MemberRole::User,
    };

    let member = MemberRepository::create_member(&mut conn, new_member).await?;
    let token = token_issuer.issue_user_token(&member.id.to_string())?;

    tracing::info!(
        target: TRACING_TARGET,
        member_id = %member.id,
        "member registered"
    );

    let response = SessionResponse {
        member_id: member.id,
        display_name: member.display_name,
        access_token: token.compact,
        expires_at_ms: token.claims.expires_at_ms,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Verifies credentials and issues a session token.
#[tracing::instrument(skip_all)]
async fn login(
    State(pg_client): State<PgClient>,
    State(auth_hasher): State<AuthHasher>,
    State(token_issuer): State<TokenIssuer>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    request
        .validate()
        .map_err(|e| ErrorKind::BadRequest.with_context(e.to_string()).into_static())?;

    let mut conn = pg_client.get_connection().await?;

    let Some(member) =
        MemberRepository::find_member_by_email(&mut conn, &request.email_address).await?
    else {
        tracing::debug!(target: TRACING_TARGET, "login with unknown email");
        return Err(invalid_credentials());
    };

    if auth_hasher
        .verify_password(&request.password, &member.password_hash)
        .is_err()
    {
        tracing::debug!(
            target: TRACING_TARGET,
            member_id = %member.id,
            "login with wrong password"
        );
        return Err(invalid_credentials());
    }

    let token = token_issuer.issue_user_token(&member.id.to_string())?;

    tracing::info!(
        target: TRACING_TARGET,
        member_id = %member.id,
        "member logged in"
    );

    let response = SessionResponse {
        member_id: member.id,
        display_name: member.display_name,
        access_token: token.compact,
        expires_at_ms: token.claims.expires_at_ms,
    };

    Ok(Json(response))
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/auth/register", post(register))
        .api_route("/auth/login", post(login))
}
