//! API-key authentication for the REST surface.
//!
//! Keys come from the `API_KEYS` env var as `key1:role1,key2:role2` with roles
//! `trader` and `admin`. When `DISABLE_AUTH=true` or no keys are configured,
//! every request passes with admin rights (dev bypass). Requests present a
//! key via `Authorization: Bearer <key>` or `X-API-Key: <key>`.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;

/// Access role attached to an API key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Submit orders and read the book and trade history.
    Trader,
    /// Trader rights plus book re-initialization.
    Admin,
}

impl Role {
    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("trader") {
            Some(Role::Trader)
        } else if s.eq_ignore_ascii_case("admin") {
            Some(Role::Admin)
        } else {
            None
        }
    }
}

/// Authenticated caller, injected by the middleware.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub key_id: Option<String>,
    pub role: Role,
}

impl Default for AuthUser {
    fn default() -> Self {
        Self {
            key_id: None,
            role: Role::Trader,
        }
    }
}

/// Returns `Ok(())` for admins, otherwise a 403 response ready to bubble up.
pub fn require_admin(user: &AuthUser) -> Result<(), Response> {
    match user.role {
        Role::Admin => Ok(()),
        Role::Trader => Err((StatusCode::FORBIDDEN, "admin role required").into_response()),
    }
}

/// Key → role table plus the dev-bypass flag.
#[derive(Clone)]
pub struct AuthConfig {
    pub disable: bool,
    keys: Arc<HashMap<String, Role>>,
}

impl AuthConfig {
    /// Auth disabled: every request passes with the dev bypass.
    pub fn disabled() -> Self {
        Self {
            disable: true,
            keys: Arc::new(HashMap::new()),
        }
    }

    /// Build from a `key:role,key:role` string. Entries with unknown roles or
    /// empty keys are dropped; an empty table disables auth.
    pub fn from_keys(keys: &str) -> Self {
        let map = parse_keys(keys);
        Self {
            disable: map.is_empty(),
            keys: Arc::new(map),
        }
    }

    /// Load from env: `DISABLE_AUTH=true` or an unset/empty `API_KEYS` means
    /// the bypass is on.
    pub fn from_env() -> Self {
        let disable = std::env::var("DISABLE_AUTH")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let map = std::env::var("API_KEYS")
            .map(|s| parse_keys(&s))
            .unwrap_or_default();
        Self {
            disable: disable || map.is_empty(),
            keys: Arc::new(map),
        }
    }

    pub fn lookup(&self, key: &str) -> Option<Role> {
        self.keys.get(key).copied()
    }
}

fn parse_keys(raw: &str) -> HashMap<String, Role> {
    raw.split(',')
        .filter_map(|part| {
            let mut split = part.trim().splitn(2, ':');
            let key = split.next()?.trim();
            let role = Role::parse(split.next()?.trim())?;
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), role))
        })
        .collect()
}

fn api_key_from_request(req: &Request) -> Option<String> {
    if let Some(v) = req.headers().get(header::AUTHORIZATION) {
        if let Ok(s) = v.to_str() {
            let s = s.trim();
            let is_bearer = s
                .get(..7)
                .map(|p| p.eq_ignore_ascii_case("bearer "))
                .unwrap_or(false);
            if is_bearer {
                return Some(s.get(7..).unwrap_or("").trim().to_string());
            }
        }
    }
    if let Some(v) = req.headers().get("X-API-Key") {
        if let Ok(s) = v.to_str() {
            return Some(s.trim().to_string());
        }
    }
    None
}

/// Middleware: injects [`AuthUser`] on success (or when auth is disabled),
/// 401 on a missing or unknown key. Wire with `middleware::from_fn_with_state`.
pub async fn require_api_key(
    State(config): State<AuthConfig>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if config.disable {
        // Dev bypass: no key, no restrictions.
        req.extensions_mut().insert(AuthUser {
            key_id: None,
            role: Role::Admin,
        });
        return next.run(req).await;
    }

    let key = match api_key_from_request(&req) {
        Some(k) if !k.is_empty() => k,
        _ => {
            return (StatusCode::UNAUTHORIZED, "missing Authorization or X-API-Key")
                .into_response()
        }
    };

    match config.lookup(&key) {
        Some(role) => {
            req.extensions_mut().insert(AuthUser {
                key_id: Some(key),
                role,
            });
            next.run(req).await
        }
        None => (StatusCode::UNAUTHORIZED, "invalid API key").into_response(),
    }
}
