//! Test helpers for inbound HTTP components.
//!
//! Compiled for unit tests and, through the `test-support` feature, for the
//! integration suites under `tests/`.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};
use mockable::DefaultClock;

use crate::Trace;
use crate::domain::{EmptyLookupPolicy, Error, UserId};
use crate::domain::ports::{
    FixtureFilterProductRepository, FixtureUserScanRepository, FixtureWaterQualityRepository,
};
use crate::inbound::http::session::{SESSION_COOKIE_NAME, SessionContext};
use crate::inbound::http::state::{HttpState, Repositories};
use crate::inbound::http::{ApiResult, configure};

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation and disables the `Secure` flag for
/// plain HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// In-memory repositories shared between a test and the state built on them.
pub struct FixtureRepositories {
    pub water: Arc<FixtureWaterQualityRepository>,
    pub filters: Arc<FixtureFilterProductRepository>,
    pub scans: Arc<FixtureUserScanRepository>,
}

impl FixtureRepositories {
    pub fn new() -> Self {
        Self {
            water: Arc::new(FixtureWaterQualityRepository::default()),
            filters: Arc::new(FixtureFilterProductRepository::default()),
            scans: Arc::new(FixtureUserScanRepository::default()),
        }
    }

    /// HTTP state over these repositories with the mock fallback enabled.
    pub fn state(&self) -> HttpState {
        self.state_with(EmptyLookupPolicy::Fallback)
    }

    /// HTTP state over these repositories with an explicit empty-lookup policy.
    pub fn state_with(&self, policy: EmptyLookupPolicy) -> HttpState {
        HttpState::from_repositories(
            Repositories {
                water: self.water.clone(),
                filters: self.filters.clone(),
                scans: self.scans.clone(),
            },
            Arc::new(DefaultClock),
            policy,
        )
    }
}

impl Default for FixtureRepositories {
    fn default() -> Self {
        Self::new()
    }
}

/// Route that stores a user id in the session, standing in for the auth provider.
pub const TEST_LOGIN_PATH: &str = "/test/session/{user_id}";

async fn login_as(session: SessionContext, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let user_id =
        UserId::new(path.into_inner()).map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Session cookie for `user_id`, obtained through [`TEST_LOGIN_PATH`].
pub async fn login_cookie<S, B>(app: &S, user_id: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri(&TEST_LOGIN_PATH.replace("{user_id}", user_id))
        .to_request();
    let res = test::call_service(app, req).await;
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .expect("session cookie set")
        .into_owned()
}

/// App with the API routes, session middleware, and trace ids over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .wrap(Trace)
        .configure(configure)
        .route(TEST_LOGIN_PATH, web::post().to(login_as))
}
