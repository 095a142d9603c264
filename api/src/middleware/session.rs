//! Session gate middleware and principal extractors.
//!
//! The session token travels in the session cookie or an
//! `Authorization: Bearer` header. The gate verifies it once per request and
//! stores the resulting [`SessionPrincipal`] in the request extensions, where
//! the extractors pick it up.

use actix_web::{
    body::EitherBody,
    cookie::Cookie,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderMap},
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use folio_core::domain::value_objects::SessionPrincipal;

use crate::handlers::{handle_domain_error, ApiError};
use crate::state::AppState;

/// Read the session token from the cookie, falling back to a bearer header
pub fn extract_session_token(cookie: Option<Cookie<'static>>, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = cookie {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Verify the request's session token, if any
fn resolve_principal(req: &HttpRequest) -> Option<SessionPrincipal> {
    if let Some(principal) = req.extensions().get::<SessionPrincipal>() {
        return Some(principal.clone());
    }

    let state = req.app_data::<web::Data<AppState>>()?;
    let token = extract_session_token(req.cookie(&state.session_config.cookie_name), req.headers())?;
    state.session_service.verify(&token).ok()
}

/// Login redirect target carrying the original path and query
pub fn login_redirect_location(login_path: &str, path_and_query: &str) -> String {
    format!(
        "{}?callbackUrl={}",
        login_path,
        urlencoding::encode(path_and_query)
    )
}

/// What the gate does with a request that carries no valid session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    /// 401 JSON envelope, for API routes
    Api,
    /// 302 to the login page with a `callbackUrl`, for pages
    Redirect,
}

/// Session gate middleware factory
pub struct SessionGate {
    mode: GateMode,
}

impl SessionGate {
    pub fn api() -> Self {
        Self { mode: GateMode::Api }
    }

    pub fn redirect() -> Self {
        Self {
            mode: GateMode::Redirect,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateMiddleware {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}

/// Session gate middleware service
pub struct SessionGateMiddleware<S> {
    service: Rc<S>,
    mode: GateMode,
}

impl<S, B> Service<ServiceRequest> for SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let mode = self.mode;

        Box::pin(async move {
            if let Some(principal) = resolve_principal(req.request()) {
                req.extensions_mut().insert(principal);
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let response = match mode {
                GateMode::Api => handle_domain_error(&ApiError::unauthenticated().0),
                GateMode::Redirect => {
                    let login_path = req
                        .app_data::<web::Data<AppState>>()
                        .map(|state| state.session_config.login_path.clone())
                        .unwrap_or_else(|| "/login".to_string());
                    let target = req
                        .uri()
                        .path_and_query()
                        .map(|pq| pq.as_str().to_string())
                        .unwrap_or_else(|| req.path().to_string());

                    tracing::debug!(path = %target, "Redirecting unauthenticated request to login");
                    HttpResponse::Found()
                        .insert_header((
                            header::LOCATION,
                            login_redirect_location(&login_path, &target),
                        ))
                        .finish()
                }
            };

            Ok(req.into_response(response).map_into_right_body())
        })
    }
}

/// Extractor for a required session
///
/// Fails with 401 `UNAUTHENTICATED` when the request has no valid session.
#[derive(Debug, Clone)]
pub struct Authenticated(pub SessionPrincipal);

impl FromRequest for Authenticated {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            resolve_principal(req)
                .map(Authenticated)
                .ok_or_else(ApiError::unauthenticated),
        )
    }
}

/// Extractor for an optional session
#[derive(Debug, Clone)]
pub struct OptionalPrincipal(pub Option<SessionPrincipal>);

impl FromRequest for OptionalPrincipal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(OptionalPrincipal(resolve_principal(req))))
    }
}
