//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Routes are registered from the contract registry, so the paths the client
//! builds and the paths the server answers cannot drift apart.

pub mod error;
pub mod filters;
pub mod health;
pub mod scans;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod validation;
pub mod water;

pub use error::ApiResult;

use actix_web::{FromRequest, Handler, Responder, Route, web};
use water_contract::Operation;
use water_contract::registry::{
    FILTERS_LIST, FILTERS_RECOMMEND, Method, SCANS_CREATE, SCANS_LIST, WATER_AGGREGATE,
    WATER_GET_BY_PLZ,
};

fn bind<F, Args>(operation: &'static Operation, handler: F) -> (&'static Operation, Route)
where
    F: Handler<Args>,
    Args: FromRequest + 'static,
    F::Output: Responder + 'static,
{
    let route = match operation.method {
        Method::Get => web::get(),
        Method::Post => web::post(),
    };
    (operation, route.to(handler))
}

/// Registry operations paired with their handlers.
fn bound_operations() -> Vec<(&'static Operation, Route)> {
    vec![
        bind(&WATER_GET_BY_PLZ, water::get_by_plz),
        bind(&WATER_AGGREGATE, water::aggregate),
        bind(&FILTERS_LIST, filters::list_filters),
        bind(&FILTERS_RECOMMEND, filters::recommend),
        bind(&SCANS_CREATE, scans::create_scan),
        bind(&SCANS_LIST, scans::list_scans),
    ]
}

/// Register every API route plus the JSON error handler.
///
/// Operations sharing a path become one resource with several methods.
/// Literal paths are registered before parameterised ones so
/// `/api/water/aggregate` is not captured by `/api/water/{plz}`. A `GET` on
/// that literal path therefore answers `405` instead of a postal-code lookup;
/// `aggregate` is never a valid postal code.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
///
/// let app = App::new().configure(hydrocheck::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config());

    let mut resources: Vec<(String, actix_web::Resource)> = Vec::new();
    for (operation, route) in bound_operations() {
        let pattern = operation.route_pattern();
        match resources.iter().position(|(existing, _)| *existing == pattern) {
            Some(index) => {
                let (path, resource) = resources.remove(index);
                resources.insert(index, (path, resource.route(route)));
            }
            None => {
                let resource = web::resource(pattern.as_str()).route(route);
                resources.push((pattern, resource));
            }
        }
    }
    resources.sort_by_key(|(pattern, _)| pattern.contains('{'));

    for (_, resource) in resources {
        cfg.service(resource);
    }
}
