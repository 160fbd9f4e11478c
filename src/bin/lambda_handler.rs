//! AWS Lambda handler for the stock analysis API
//!
//! Loads the tables once at cold start, then answers `GET /` and
//! `POST /stock-details/` with JSON. Supports Lambda Function URLs for
//! direct HTTP access.

use std::sync::Arc;

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::info;
use stock_event_projection::service::HttpReply;
use stock_event_projection::{StockAnalysisService, TableConfig};

fn to_response(reply: &HttpReply) -> Result<Response<Body>, Error> {
    let body = match reply.body {
        Some(_) => Body::Text(reply.body_text()),
        None => Body::Empty,
    };

    let mut builder = Response::builder().status(reply.status);
    for &(name, value) in reply.headers() {
        builder = builder.header(name, value);
    }
    Ok(builder.body(body)?)
}

/// Lambda handler function
async fn handler(service: &StockAnalysisService, event: Request) -> Result<Response<Body>, Error> {
    let body = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => String::new(),
    };

    let reply = service.handle(event.method().as_str(), event.uri().path(), &body);
    to_response(&reply)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = TableConfig::from_env();
    let service = Arc::new(StockAnalysisService::from_config(&config)?);
    info!("Tables loaded from {}, ready for requests", config.data_dir().display());

    run(service_fn(move |event: Request| {
        let service = Arc::clone(&service);
        async move { handler(&service, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_event_projection::tables::{DataTable, EventTables, MarketData};

    fn service() -> StockAnalysisService {
        let tables = || {
            EventTables::new(
                DataTable::from_reader("Symbol,Latest Close Price\nACME,100\n".as_bytes(), "Symbol").unwrap(),
                DataTable::from_reader("Stock Name,Net Income\nACME,40\n".as_bytes(), "Stock Name").unwrap(),
            )
        };
        StockAnalysisService::new(Arc::new(MarketData::new(tables(), tables())))
    }

    fn header<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
        response.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_preflight_response() {
        let response = to_response(&service().handle("OPTIONS", "/stock-details/", "")).unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(header(&response, "Content-Type"), Some("application/json"));
        assert_eq!(header(&response, "Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(header(&response, "Access-Control-Allow-Methods"), Some("*"));
        assert_eq!(header(&response, "Access-Control-Allow-Headers"), Some("*"));
        assert!(matches!(response.body(), Body::Empty));
    }

    #[test]
    fn test_json_response() {
        let response = to_response(&service().handle(
            "POST",
            "/stock-details",
            r#"{"stock_symbol":"ACME","event_type":"Inflation","expected_rate":2.0,"method":"Simple"}"#,
        ))
        .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(header(&response, "Access-Control-Allow-Origin"), Some("*"));
        match response.body() {
            Body::Text(text) => {
                let body: serde_json::Value = serde_json::from_str(text).unwrap();
                assert_eq!(body["stock_symbol"], "ACME");
            }
            other => panic!("expected text body, got {:?}", other),
        }

        let missing = to_response(&service().handle("GET", "/nowhere", "")).unwrap();
        assert_eq!(missing.status(), 404);
        assert_eq!(header(&missing, "Content-Type"), Some("application/json"));
    }
}
