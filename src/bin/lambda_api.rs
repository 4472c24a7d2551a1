//! AWS Lambda HTTP entry point
//!
//! Routes:
//! - GET  /projection    query: months, annualReturn, monthlyContribution, horizonMonths, startValue
//! - POST /what-changed  body: { month, previousMonth, transactions }
//! - POST /milestones    body: { startValue, assumptions, asOf, milestones }

use std::collections::HashMap;

use finance_projection::api::{Api, ApiError, ApiRequest, ApiResponse};
use finance_projection::{EngineConfig, Period};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};

async fn function_handler(api: &Api, event: Request) -> Result<Response<Body>, Error> {
    let query: HashMap<String, String> = event
        .query_string_parameters()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let response = match std::str::from_utf8(event.body().as_ref()) {
        Ok(body) => api.handle(&ApiRequest {
            method: event.method().as_str(),
            path: event.uri().path(),
            query: &query,
            body,
            today: Period::current(),
        }),
        Err(e) => ApiResponse::from(ApiError::InvalidParameter {
            name: "body".to_string(),
            value: e.to_string(),
        }),
    };

    let resp = Response::builder()
        .status(response.status)
        .header("content-type", "application/json")
        .body(Body::from(response.body))
        .map_err(Box::new)?;
    Ok(resp)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = EngineConfig::from_env();
    log::info!("Starting with {:?}", config);

    let api = Api::new(config);
    let api = &api;
    run(service_fn(move |event: Request| async move { function_handler(api, event).await })).await
}
