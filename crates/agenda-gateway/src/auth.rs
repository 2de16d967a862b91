// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer token middleware for the tool routes.
//!
//! Without a configured token the routes are only open on a loopback bind.
//! Any other bind without a token rejects every request.

use agenda_config::model::ServerConfig;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// Authentication configuration for the tool server.
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Expected bearer token.
    pub bearer_token: Option<String>,
    /// Accept requests without a token. Only set for loopback servers.
    allow_anonymous: bool,
}

impl AuthConfig {
    /// Requires `token`. With no token every request is rejected.
    pub fn bearer(token: Option<String>) -> Self {
        Self {
            bearer_token: token.filter(|t| !t.is_empty()),
            allow_anonymous: false,
        }
    }

    /// No authentication at all.
    pub fn open() -> Self {
        Self {
            bearer_token: None,
            allow_anonymous: true,
        }
    }

    /// The configured token, or open access when the server is bound to
    /// loopback and no token is set.
    pub fn for_server(config: &ServerConfig) -> Self {
        let auth = Self::bearer(config.bearer_token.clone());
        if auth.bearer_token.is_none() && config.is_loopback() {
            Self::open()
        } else {
            auth
        }
    }

    pub fn is_open(&self) -> bool {
        self.bearer_token.is_none() && self.allow_anonymous
    }

    fn accepts(&self, header: Option<&str>) -> bool {
        match &self.bearer_token {
            None => self.allow_anonymous,
            Some(expected) => header
                .and_then(|v| v.strip_prefix("Bearer "))
                .is_some_and(|token| token == expected),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .field("allow_anonymous", &self.allow_anonymous)
            .finish()
    }
}

/// Rejects requests whose `Authorization` header does not carry the
/// configured bearer token.
pub async fn auth_middleware(
    State(auth): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let header = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok());

    if auth.accepts(header) {
        Ok(next.run(request).await)
    } else {
        tracing::debug!(path = %request.uri().path(), "rejected unauthenticated request");
        Err(StatusCode::UNAUTHORIZED)
    }
}
