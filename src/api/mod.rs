//! Transport-independent request layer
//!
//! Parses and validates raw request parts into closed types, invokes one
//! engine and serializes the result. The Lambda entry point is a thin
//! adapter over [`Api::handle`].

mod error;
mod requests;

pub use error::ApiError;
pub use requests::{MilestonesRequest, MilestonesResponse, ProjectionQuery, WhatChangedRequest};

use std::collections::HashMap;

use log::{info, warn};
use serde::Serialize;

use crate::attribution::{compute_what_changed, WhatChanged};
use crate::config::EngineConfig;
use crate::milestone::classify_milestones;
use crate::period::Period;
use crate::projection::{ProjectionEngine, ProjectionResult};

/// Raw request parts as handed over by the hosting layer
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub query: &'a HashMap<String, String>,
    pub body: &'a str,
    /// Current month, used when a request does not pin one
    pub today: Period,
}

/// Status code and JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn ok<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(value).map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok(Self { status: 200, body })
    }
}

impl From<ApiError> for ApiResponse {
    fn from(err: ApiError) -> Self {
        Self {
            status: err.status_code(),
            body: err.to_body(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Projection,
    WhatChanged,
    Milestones,
}

impl Route {
    // Matched on the last path segment so stage prefixes are ignored
    fn resolve(path: &str) -> Option<Self> {
        match path.trim_end_matches('/').rsplit('/').next()? {
            "projection" => Some(Route::Projection),
            "what-changed" => Some(Route::WhatChanged),
            "milestones" => Some(Route::Milestones),
            _ => None,
        }
    }

    fn method(&self) -> &'static str {
        match self {
            Route::Projection => "GET",
            Route::WhatChanged | Route::Milestones => "POST",
        }
    }
}

/// Request handler holding only immutable configuration
#[derive(Debug, Clone, Default)]
pub struct Api {
    config: EngineConfig,
}

impl Api {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn handle(&self, request: &ApiRequest<'_>) -> ApiResponse {
        info!("{} {}", request.method, request.path);
        match self.dispatch(request) {
            Ok(response) => response,
            Err(err) => {
                if err.status_code() < 500 {
                    warn!("Rejected {} {}: {}", request.method, request.path, err);
                } else {
                    log::error!("Failed {} {}: {}", request.method, request.path, err);
                }
                err.into()
            }
        }
    }

    fn dispatch(&self, request: &ApiRequest<'_>) -> Result<ApiResponse, ApiError> {
        let route = Route::resolve(request.path).ok_or_else(|| ApiError::NotFound(request.path.to_string()))?;
        if !request.method.eq_ignore_ascii_case(route.method()) {
            return Err(ApiError::MethodNotAllowed {
                method: request.method.to_string(),
                path: request.path.to_string(),
            });
        }

        match route {
            Route::Projection => {
                let query = ProjectionQuery::from_params(request.query)?;
                ApiResponse::ok(&self.projection(&query)?)
            }
            Route::WhatChanged => {
                let body: WhatChangedRequest = serde_json::from_str(request.body)?;
                ApiResponse::ok(&self.what_changed(&body)?)
            }
            Route::Milestones => {
                let body: MilestonesRequest = serde_json::from_str(request.body)?;
                ApiResponse::ok(&self.milestones(&body, request.today)?)
            }
        }
    }

    /// `GET projection`
    pub fn projection(&self, query: &ProjectionQuery) -> Result<ProjectionResult, ApiError> {
        let engine = ProjectionEngine::with_config(query.assumptions.clone(), &self.config)?;
        Ok(engine.run(query.start_value, query.months)?)
    }

    /// `POST what-changed`
    pub fn what_changed(&self, request: &WhatChangedRequest) -> Result<WhatChanged, ApiError> {
        Ok(compute_what_changed(&request.transactions, &request.month, &request.previous_month)?)
    }

    /// `POST milestones`: project over the full horizon, then classify
    pub fn milestones(&self, request: &MilestonesRequest, today: Period) -> Result<MilestonesResponse, ApiError> {
        let as_of = match &request.as_of {
            Some(token) => Period::parse(token)?,
            None => today,
        };
        let engine = ProjectionEngine::with_config(request.assumptions.clone(), &self.config)?;
        let trajectory = engine.project(request.start_value, request.assumptions.horizon_months)?;
        let milestones = classify_milestones(&request.milestones, &trajectory, as_of, &self.config)?;
        Ok(MilestonesResponse { as_of, milestones })
    }
}
