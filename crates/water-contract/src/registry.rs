//! Catalogue of API operations.
//!
//! Each [`Operation`] names one endpoint, its HTTP method, the path template,
//! the session requirement, the body validator (if any), and every response
//! status it documents. The backend registers its routes from these values
//! and the client builds its requests from them.

use crate::path::{path_params, route_pattern};

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl Method {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Authentication requirement of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Auth {
    /// Anyone may call the operation.
    Public,
    /// A session carrying a user identity is required.
    Session,
}

/// Identity of the validator applied to an operation's request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// [`crate::CreateScanInput`]
    CreateScan,
    /// [`crate::AggregateInput`]
    Aggregate,
    /// [`crate::RecommendInput`]
    Recommend,
}

/// Shape of a documented response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseShape {
    /// `WaterQualityMetricRecord[]`
    Metrics,
    /// `FilterProductRecord[]`
    Products,
    /// `UserScanRecord`
    Scan,
    /// `UserScanRecord[]`
    Scans,
    /// `AggregateAck`
    Acknowledgement,
    /// `ErrorBody`
    Error,
    /// `text/plain` message.
    Text,
}

/// A documented status code and the body it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Body shape for that status.
    pub shape: ResponseShape,
}

const fn response(status: u16, shape: ResponseShape) -> Response {
    Response { status, shape }
}

/// One entry of the contract registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Dotted logical name, for example `water.getByPlz`.
    pub name: &'static str,
    /// HTTP method.
    pub method: Method,
    /// Path template with `:name` placeholders.
    pub path: &'static str,
    /// Session requirement.
    pub auth: Auth,
    /// Validator applied to the request body.
    pub input: Option<InputKind>,
    /// Documented responses.
    pub responses: &'static [Response],
}

impl Operation {
    /// Path in the `{name}` syntax used by the server router.
    #[must_use]
    pub fn route_pattern(&self) -> String {
        route_pattern(self.path)
    }

    /// Placeholder names the caller must bind before sending.
    pub fn params(&self) -> impl Iterator<Item = &'static str> {
        path_params(self.path)
    }

    /// Documented response for `status`, if any.
    #[must_use]
    pub fn response_for(&self, status: u16) -> Option<&'static Response> {
        self.responses.iter().find(|entry| entry.status == status)
    }

    /// Whether `status` is one of the documented responses.
    #[must_use]
    pub fn accepts_status(&self, status: u16) -> bool {
        self.response_for(status).is_some()
    }

    /// The documented 2xx response.
    #[must_use]
    pub fn success(&self) -> Option<&'static Response> {
        self.responses
            .iter()
            .find(|entry| (200..300).contains(&entry.status))
    }
}

/// `GET /api/water/:plz`
pub const WATER_GET_BY_PLZ: Operation = Operation {
    name: "water.getByPlz",
    method: Method::Get,
    path: "/api/water/:plz",
    auth: Auth::Public,
    input: None,
    responses: &[
        response(200, ResponseShape::Metrics),
        response(404, ResponseShape::Error),
        response(500, ResponseShape::Error),
        response(503, ResponseShape::Error),
    ],
};

/// `POST /api/water/aggregate`
pub const WATER_AGGREGATE: Operation = Operation {
    name: "water.aggregate",
    method: Method::Post,
    path: "/api/water/aggregate",
    auth: Auth::Public,
    input: Some(InputKind::Aggregate),
    responses: &[
        response(200, ResponseShape::Acknowledgement),
        response(400, ResponseShape::Error),
    ],
};

/// `GET /api/filters`
pub const FILTERS_LIST: Operation = Operation {
    name: "filters.list",
    method: Method::Get,
    path: "/api/filters",
    auth: Auth::Public,
    input: None,
    responses: &[
        response(200, ResponseShape::Products),
        response(500, ResponseShape::Error),
        response(503, ResponseShape::Error),
    ],
};

/// `POST /api/filters/recommend`
pub const FILTERS_RECOMMEND: Operation = Operation {
    name: "filters.recommend",
    method: Method::Post,
    path: "/api/filters/recommend",
    auth: Auth::Public,
    input: Some(InputKind::Recommend),
    responses: &[
        response(200, ResponseShape::Products),
        response(400, ResponseShape::Error),
        response(500, ResponseShape::Error),
        response(503, ResponseShape::Error),
    ],
};

/// `POST /api/scans`
pub const SCANS_CREATE: Operation = Operation {
    name: "scans.create",
    method: Method::Post,
    path: "/api/scans",
    auth: Auth::Session,
    input: Some(InputKind::CreateScan),
    responses: &[
        response(201, ResponseShape::Scan),
        response(400, ResponseShape::Error),
        response(401, ResponseShape::Text),
        response(500, ResponseShape::Error),
        response(503, ResponseShape::Error),
    ],
};

/// `GET /api/scans`
pub const SCANS_LIST: Operation = Operation {
    name: "scans.list",
    method: Method::Get,
    path: "/api/scans",
    auth: Auth::Session,
    input: None,
    responses: &[
        response(200, ResponseShape::Scans),
        response(401, ResponseShape::Text),
        response(500, ResponseShape::Error),
        response(503, ResponseShape::Error),
    ],
};

/// Every registered operation.
pub const OPERATIONS: &[Operation] = &[
    WATER_GET_BY_PLZ,
    WATER_AGGREGATE,
    FILTERS_LIST,
    FILTERS_RECOMMEND,
    SCANS_CREATE,
    SCANS_LIST,
];

/// Look up an operation by its logical name.
#[must_use]
pub fn find(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|operation| operation.name == name)
}
