use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tokio::sync::Notify;
use tokio_test::{assert_err, assert_ok};

use courier_deriver::models::{ApprovalStatus, OrderStatus};
use courier_ops_client::{
    BillingPeriod, ClientConfig, ClientError, EntityKind, OperationsClient, OrderQuery,
    PaymentStatus, PaymentUpdate, RefreshLoop, Session,
};

#[derive(Debug, Clone)]
struct Recorded {
    path: String,
    request_id: Option<String>,
    authorization: Option<String>,
    body: Value,
}

#[derive(Clone, Default)]
struct Stub {
    recorded: Arc<Mutex<Vec<Recorded>>>,
    /// Signalled when a held request reaches the stub
    received: Arc<Notify>,
    /// Lets a held request answer
    release: Arc<Notify>,
}

impl Stub {
    fn record(&self, path: String, headers: &HeaderMap, body: Value) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.recorded.lock().unwrap().push(Recorded {
            path,
            request_id: header("x-request-id"),
            authorization: header("authorization"),
            body,
        });
    }

    fn recorded(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }
}

async fn list_networks() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [
            {"id": 1, "name": "Lakeside Health", "status": "approved", "hospitals": [
                {"id": 10, "name": "Lakeside General", "is_main_hospital": true}
            ]},
            {"id": 2, "name": "Hillcrest", "status": "pending_hq_approval", "hospitals": null}
        ]
    }))
}

async fn get_network(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "error": {"code": "NOT_FOUND", "message": "Hospital network missing not found"}
            })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "data": {"id": id, "name": "Lakeside Health"}})),
    )
}

async fn approve_network(
    State(stub): State<Stub>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    stub.record(format!("hospital-networks/{id}/approve"), &headers, body);
    if id == "2" {
        return Json(json!({
            "success": false,
            "error": {"code": "ALREADY_APPROVED", "message": "Hillcrest is already approved"}
        }));
    }
    Json(json!({"success": true, "data": {"id": id, "status": "approved"}}))
}

async fn expired_token() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "success": false,
            "error": {"code": "TOKEN_EXPIRED", "message": "Token expired"}
        })),
    )
}

async fn held_expired_token(State(stub): State<Stub>) -> (StatusCode, Json<Value>) {
    stub.received.notify_one();
    stub.release.notified().await;
    expired_token().await
}

async fn wrong_role() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "success": false,
            "error": {"code": "FORBIDDEN_ROLE", "message": "HQ role required"}
        })),
    )
}

async fn list_orders(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    stub.record("orders".to_string(), &headers, json!(params));
    Json(json!({
        "success": true,
        "data": [{"id": "o1", "order_number": "ORD-1", "status": "in_transit", "center_id": 4}]
    }))
}

async fn reject_fails(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    stub.record("approvals/reject".to_string(), &headers, body);
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn record_payment(
    State(stub): State<Stub>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    stub.record(format!("subscriptions/{id}/payment"), &headers, body);
    Json(json!({"success": true}))
}

async fn spawn_stub() -> (String, Stub) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let stub = Stub::default();
    let app = Router::new()
        .route("/api/hospital-networks", get(list_networks))
        .route("/api/hospital-networks/:id", get(get_network))
        .route("/api/hospital-networks/:id/approve", post(approve_network))
        .route("/api/subscriptions", get(expired_token))
        .route("/api/subscriptions/:id/payment", put(record_payment))
        .route("/api/qr-logs", get(wrong_role))
        .route("/api/orders", get(list_orders))
        .route("/api/approvals/reject", post(reject_fails))
        .route("/api/analytics/monthly-trends", get(held_expired_token))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), stub)
}

fn client(base_url: &str, session: Arc<Session>) -> OperationsClient {
    let config = ClientConfig::new(base_url.to_string()).with_timeout_secs(5);
    OperationsClient::new(&config, session).unwrap()
}

#[tokio::test]
async fn test_list_networks_decodes_envelope() {
    let (base_url, _stub) = spawn_stub().await;
    let client = client(&base_url, Arc::new(Session::with_token("tok-1")));

    let networks = assert_ok!(client.list_networks().await);
    assert_eq!(networks.len(), 2);
    assert_eq!(networks[0].id, "1");
    assert_eq!(networks[0].hospitals[0].id, "10");
    assert_eq!(networks[1].status, ApprovalStatus::PendingHqApproval);
    assert!(networks[1].hospitals.is_empty());
}

#[tokio::test]
async fn test_not_found_surfaces_backend_message() {
    let (base_url, _stub) = spawn_stub().await;
    let client = client(&base_url, Arc::new(Session::new()));

    let err = assert_err!(client.get_network("missing").await);
    match err {
        ClientError::Http { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Hospital network missing not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_expired_token_clears_session() {
    let (base_url, _stub) = spawn_stub().await;
    let session = Arc::new(Session::with_token("stale"));
    let client = client(&base_url, Arc::clone(&session));

    let err = assert_err!(client.list_subscriptions().await);
    assert!(matches!(err, ClientError::TokenExpired));
    assert!(!session.is_authenticated().await);
}

#[tokio::test]
async fn test_late_expiry_keeps_newer_sign_in() {
    let (base_url, stub) = spawn_stub().await;
    let session = Arc::new(Session::with_token("old-token"));
    let client = client(&base_url, Arc::clone(&session));

    let pending = tokio::spawn(async move { client.list_monthly_trends().await });
    stub.received.notified().await;
    session.sign_in("fresh-token").await;
    stub.release.notify_one();

    let err = assert_err!(pending.await.unwrap());
    assert!(matches!(err, ClientError::TokenExpired));
    assert_eq!(session.token().await.as_deref(), Some("fresh-token"));
}

#[tokio::test]
async fn test_other_unauthorized_keeps_session() {
    let (base_url, _stub) = spawn_stub().await;
    let session = Arc::new(Session::with_token("rider-token"));
    let client = client(&base_url, Arc::clone(&session));

    let err = assert_err!(client.list_qr_logs().await);
    match err {
        ClientError::AccessDenied(message) => assert_eq!(message, "HQ role required"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(session.is_authenticated().await);
}

#[tokio::test]
async fn test_approve_sends_request_id_and_token() {
    let (base_url, stub) = spawn_stub().await;
    let client = client(&base_url, Arc::new(Session::with_token("tok-1")));

    let outcome = assert_ok!(client.approve_network("1", Some("documents verified")).await);
    assert_eq!(outcome.data, Some(json!({"id": "1", "status": "approved"})));

    let recorded = stub.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].path, "hospital-networks/1/approve");
    assert_eq!(recorded[0].body, json!({"notes": "documents verified"}));
    assert_eq!(recorded[0].authorization.as_deref(), Some("Bearer tok-1"));
    assert_eq!(
        recorded[0].request_id.as_deref(),
        Some(outcome.request_id.to_string().as_str())
    );
}

#[tokio::test]
async fn test_rejected_command_reports_api_error() {
    let (base_url, _stub) = spawn_stub().await;
    let client = client(&base_url, Arc::new(Session::with_token("tok-1")));

    let err = assert_err!(client.approve_network("2", None).await);
    assert_eq!(err.to_string(), "Hillcrest is already approved");
    assert!(matches!(err, ClientError::Api { ref code, .. } if code == "ALREADY_APPROVED"));
}

#[tokio::test]
async fn test_failed_command_is_not_retried() {
    let (base_url, stub) = spawn_stub().await;
    let client = client(&base_url, Arc::new(Session::with_token("tok-1")));

    let err = assert_err!(
        client
            .reject(EntityKind::HospitalNetwork, "7", "incomplete paperwork")
            .await
    );
    assert!(matches!(err, ClientError::Http { status: 500, .. }));

    let recorded = stub.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(
        recorded[0].body,
        json!({"type": "hospital_network", "id": "7", "reason": "incomplete paperwork"})
    );
}

#[tokio::test]
async fn test_payment_update_body() {
    let (base_url, stub) = spawn_stub().await;
    let client = client(&base_url, Arc::new(Session::with_token("tok-1")));

    let payment = PaymentUpdate::new(
        PaymentStatus::Paid,
        2400.0,
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        BillingPeriod::Yearly,
    );
    let outcome = assert_ok!(client.update_subscription_payment("12", &payment).await);
    assert!(outcome.data.is_none());

    let recorded = stub.recorded();
    assert_eq!(recorded[0].path, "subscriptions/12/payment");
    assert_eq!(
        recorded[0].body,
        json!({"status": "paid", "amount": 2400.0, "date": "2024-07-01", "period": "yearly"})
    );
}

#[tokio::test]
async fn test_order_query_parameters() {
    let (base_url, stub) = spawn_stub().await;
    let client = client(&base_url, Arc::new(Session::with_token("tok-1")));

    let query = OrderQuery::new()
        .with_status(OrderStatus::InTransit)
        .with_center("4");
    let orders = assert_ok!(client.list_orders(&query).await);
    assert_eq!(orders[0].status, OrderStatus::InTransit);
    assert_eq!(orders[0].center_id.as_deref(), Some("4"));

    let recorded = stub.recorded();
    assert_eq!(recorded[0].body, json!({"status": "in_transit", "center_id": "4"}));
    assert!(recorded[0].request_id.is_none());
}

#[tokio::test]
async fn test_refresh_keeps_last_good_snapshot() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut refresh = RefreshLoop::spawn(Duration::from_millis(20), {
        let calls = Arc::clone(&calls);
        move || {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if call == 0 {
                    Ok(vec!["north", "south"])
                } else {
                    Err(ClientError::api("UNAVAILABLE", "backend unavailable"))
                }
            }
        }
    });

    let mut updates = refresh.subscribe();
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if updates.borrow_and_update().last_error.is_some() {
                break;
            }
            updates.changed().await.unwrap();
        }
    })
    .await
    .unwrap();

    let snapshot = refresh.snapshot();
    assert_eq!(snapshot.data.as_deref(), Some(&vec!["north", "south"]));
    assert_eq!(snapshot.last_error.as_deref(), Some("backend unavailable"));
    assert!(snapshot.refreshed_at.is_some());

    refresh.stop();
    assert!(!refresh.is_running());
}

#[tokio::test]
async fn test_refresh_discards_results_after_stop() {
    let mut refresh = RefreshLoop::spawn(Duration::from_secs(60), || async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok::<_, ClientError>(42u32)
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    refresh.stop();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(refresh.latest().is_none());
}

#[tokio::test]
async fn test_refresh_over_http() {
    let (base_url, _stub) = spawn_stub().await;
    let client = client(&base_url, Arc::new(Session::with_token("tok-1")));

    let refresh = RefreshLoop::spawn(Duration::from_secs(30), move || {
        let client = client.clone();
        async move { client.list_networks().await }
    });

    let mut updates = refresh.subscribe();
    tokio::time::timeout(Duration::from_secs(5), updates.changed())
        .await
        .unwrap()
        .unwrap();

    let networks = refresh.latest().unwrap();
    assert_eq!(networks.len(), 2);
}
