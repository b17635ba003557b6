use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::header::LOCATION,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, trace};

use crate::api::constants::{DASHBOARD_PATH, LOGIN_PATH, SESSION_COOKIE_NAME};
use crate::api::state::AppState;

/// 已登录用户，由 [`SessionGuard`] 写入请求扩展
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
}

impl FromRequest for SessionUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionUser>()
                .cloned()
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("Not logged in")),
        )
    }
}

/// `/dashboard` 及其子路径需要登录
fn is_protected(path: &str) -> bool {
    path == DASHBOARD_PATH
        || path
            .strip_prefix(DASHBOARD_PATH)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Route guard for the dashboard and the login page.
///
/// - `/dashboard` and below: no valid session cookie → `302 /login`
/// - `/login`: valid session cookie → `302 /dashboard`
///
/// Other paths pass through untouched, with the session user attached when
/// the cookie validates.
#[derive(Clone, Default)]
pub struct SessionGuard;

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionGuardMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    fn redirect(req: ServiceRequest, location: &'static str) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::Found()
                .insert_header((LOCATION, location))
                .finish()
                .map_into_right_body(),
        )
    }

    /// 校验 Cookie 中的 JWT
    fn session_from_cookie(req: &ServiceRequest) -> Option<SessionUser> {
        let token = req.cookie(SESSION_COOKIE_NAME)?;
        let state = req.app_data::<web::Data<AppState>>()?;

        match state.jwt.validate_session_token(token.value()) {
            Ok(claims) => {
                trace!("Session validated for {}", claims.email);
                Some(SessionUser {
                    id: claims.sub,
                    email: claims.email,
                })
            }
            Err(e) => {
                debug!("Session cookie rejected: {}", e);
                None
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            let session = Self::session_from_cookie(&req);
            let path = req.path().to_string();

            match session {
                None if is_protected(&path) => {
                    debug!("No session for {}, redirecting to login", path);
                    return Ok(Self::redirect(req, LOGIN_PATH));
                }
                Some(_) if path == LOGIN_PATH => {
                    return Ok(Self::redirect(req, DASHBOARD_PATH));
                }
                Some(user) => {
                    req.extensions_mut().insert(user);
                }
                None => {}
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_paths() {
        assert!(is_protected("/dashboard"));
        assert!(is_protected("/dashboard/new"));
        assert!(is_protected("/dashboard/qr/abc/analytics.json"));
        assert!(!is_protected("/dashboards"));
        assert!(!is_protected("/login"));
        assert!(!is_protected("/r/abc123"));
    }
}
