use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    AllocationState, Calculator, DEFAULT_FIXED, DEFAULT_FIXED_RATE, DEFAULT_INCOME_TAX,
    DEFAULT_SAVINGS_RATE, DEFAULT_TOTAL, InputEvent, Outcome, RateConfig, SummaryView,
};
use crate::error::{Error, Result};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

/// Calculator state as sent by the page. Missing keys take the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StatePayload {
    total: Option<u64>,
    fixed: Option<u64>,
    fixed_rate: Option<f64>,
    savings_rate: Option<f64>,
    income_tax: Option<f64>,
}

impl StatePayload {
    fn into_calculator(self) -> Calculator {
        let total = self.total.unwrap_or(DEFAULT_TOTAL);
        let fixed = self.fixed.unwrap_or(DEFAULT_FIXED);
        if fixed > total {
            debug!(total, fixed, "clamping fixed amount to total");
        }
        Calculator::new(
            AllocationState::new(total, fixed),
            RateConfig {
                fixed_rate: self.fixed_rate.unwrap_or(DEFAULT_FIXED_RATE),
                savings_rate: self.savings_rate.unwrap_or(DEFAULT_SAVINGS_RATE),
                income_tax: self.income_tax.unwrap_or(DEFAULT_INCOME_TAX),
            },
        )
    }
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    state: StatePayload,
    event: InputEvent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StateSnapshot {
    #[serde(flatten)]
    allocation: AllocationState,
    #[serde(flatten)]
    rates: RateConfig,
}

impl From<&Calculator> for StateSnapshot {
    fn from(calc: &Calculator) -> Self {
        Self {
            allocation: calc.allocation(),
            rates: calc.rates(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SummaryResponse {
    state: StateSnapshot,
    view: SummaryView,
}

#[derive(Debug, Serialize)]
struct EventResponse {
    state: StateSnapshot,
    outcome: Outcome,
    view: SummaryView,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::InvalidNumber { .. } | Error::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, &self.to_string())
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidPayload(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidPayload(rejection.body_text())
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/summary",
            get(summary_get_handler).post(summary_post_handler),
        )
        .route("/api/event", post(event_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "deposit split HTTP server listening");
    info!("Local access: http://127.0.0.1:{}/", addr.port());

    axum::serve(listener, router()).await?;
    Ok(())
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn summary_get_handler(
    payload: std::result::Result<Query<StatePayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => summary_response(payload),
        Err(rejection) => rejected(rejection.into()),
    }
}

async fn summary_post_handler(
    payload: std::result::Result<Json<StatePayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => summary_response(payload),
        Err(rejection) => rejected(rejection.into()),
    }
}

async fn event_handler(
    payload: std::result::Result<Json<EventPayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => json_response(StatusCode::OK, apply_event(payload)),
        Err(rejection) => rejected(rejection.into()),
    }
}

fn summary_response(payload: StatePayload) -> Response {
    let calc = payload.into_calculator();
    json_response(
        StatusCode::OK,
        SummaryResponse {
            state: StateSnapshot::from(&calc),
            view: SummaryView::build(&calc),
        },
    )
}

fn apply_event(payload: EventPayload) -> EventResponse {
    let mut calc = payload.state.into_calculator();
    debug!(event = ?payload.event, "applying input event");
    let outcome = calc.apply(payload.event);
    EventResponse {
        state: StateSnapshot::from(&calc),
        outcome,
        view: SummaryView::build(&calc),
    }
}

fn rejected(err: Error) -> Response {
    warn!(error = %err, "rejected request");
    err.into_response()
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    fn event_payload_from_json(json: &str) -> EventPayload {
        serde_json::from_str(json).expect("json should parse")
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be json")
    }

    #[test]
    fn state_payload_defaults_missing_keys() {
        let payload: StatePayload = serde_json::from_str(r#"{"fixed": 250000}"#).expect("parse");
        let calc = payload.into_calculator();
        assert_eq!(calc.allocation().total(), 1_000_000);
        assert_eq!(calc.allocation().fixed(), 250_000);
        assert_eq!(calc.rates(), RateConfig::default());
    }

    #[test]
    fn state_payload_clamps_fixed_to_total() {
        let payload: StatePayload =
            serde_json::from_str(r#"{"total": 1000, "fixed": 5000, "incomeTax": 0}"#)
                .expect("parse");
        let calc = payload.into_calculator();
        assert_eq!(calc.allocation().fixed(), 1_000);
        assert_eq!(calc.rates().income_tax, 0.0);
    }

    #[test]
    fn apply_event_returns_new_state_and_view() {
        let payload = event_payload_from_json(
            r#"{
              "state": {"total": 1000000, "fixed": 800000},
              "event": {"kind": "totalText", "value": "500,000"}
            }"#,
        );
        let response = apply_event(payload);
        assert_eq!(response.outcome, Outcome::Applied);
        assert_eq!(response.state.allocation.total(), 500_000);
        assert_eq!(response.state.allocation.fixed(), 500_000);
        assert_eq!(response.view.total_input, "500,000");
    }

    #[test]
    fn apply_event_reports_ignored_edits() {
        let payload = event_payload_from_json(
            r#"{"state": {"total": 1000}, "event": {"kind": "fixedText", "value": "5000"}}"#,
        );
        let response = apply_event(payload);
        assert!(matches!(response.outcome, Outcome::Ignored { .. }));
        assert_eq!(response.state.allocation.fixed(), 0);
    }

    #[test]
    fn chained_events_keep_earlier_edits() {
        let first = apply_event(event_payload_from_json(
            r#"{"event": {"kind": "fixedRate", "value": "18"}}"#,
        ));
        let state = serde_json::to_value(&first.state).expect("serialize");
        let second = apply_event(event_payload_from_json(
            &serde_json::json!({
                "state": state,
                "event": {"kind": "incomeTax", "value": "13"}
            })
            .to_string(),
        ));
        assert_eq!(second.state.rates.fixed_rate, 18.0);
        assert_eq!(second.state.rates.income_tax, 13.0);
        assert_eq!(second.view.rows[0].rate, 18.0);
    }

    #[test]
    fn page_script_applies_events_one_at_a_time() {
        assert!(APP_JS.contains("queue = queue.then(task)"));
        assert!(APP_JS.contains("return enqueue(async () =>"));
        assert!(APP_JS.contains(r#"request("/api/event", { state, event })"#));
    }

    #[test]
    fn event_response_serialization_uses_camel_case_state() {
        let payload = event_payload_from_json(
            r#"{"event": {"kind": "slider", "value": 499800}}"#,
        );
        let json = serde_json::to_value(apply_event(payload)).expect("serialize");
        assert_eq!(json["state"]["fixed"], 500_000);
        assert_eq!(json["state"]["fixedRate"], 16.5);
        assert_eq!(json["state"]["incomeTax"], 12.0);
        assert_eq!(json["outcome"]["status"], "applied");
        assert_eq!(json["view"]["slider"]["stepLabel"], "Step: 500,00");
        assert_eq!(json["view"]["rows"][0]["who"], "fixed");
    }

    #[tokio::test]
    async fn summary_query_renders_default_view() {
        let response = summary_get_handler(Ok(Query(StatePayload::default()))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
        let body = body_json(response).await;
        assert_eq!(body["view"]["rows"][1]["daily"], "241,10");
        assert_eq!(body["state"]["total"], 1_000_000);
    }

    #[tokio::test]
    async fn invalid_payload_maps_to_bad_request() {
        let response = rejected(Error::InvalidPayload("missing field `event`".into()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(
            body["error"]
                .as_str()
                .expect("error string")
                .contains("missing field")
        );
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let response = not_found_handler().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Not found");
    }
}
