//! HTTP client for the operations backend.
//!
//! Reads decode the response envelope into the deriver's models. Commands are
//! sent exactly once with a fresh `X-Request-Id`; callers re-fetch the affected
//! lists after a successful command.

use std::sync::Arc;

use courier_deriver::models::{
    CollectionCenter, FeatureRequest, HospitalNetwork, MonthlyTrend, Order, QrLog, Subscription,
};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::commands::{
    ApprovalBody, EntityKind, FeatureToggleBody, OrderQuery, PaymentUpdate, RejectionBody,
    RiderStatus, RiderStatusBody,
};
use crate::config::ClientConfig;
use crate::envelope::ApiResponse;
use crate::error::{ClientError, ClientResult, TOKEN_EXPIRED};
use crate::session::Session;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Result of an accepted command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub request_id: Uuid,
    /// Whatever the backend returned as `data`, if anything
    pub data: Option<serde_json::Value>,
}

/// A request together with the bearer token it was built with
struct Outgoing {
    builder: RequestBuilder,
    token: Option<String>,
}

impl Outgoing {
    fn map(self, f: impl FnOnce(RequestBuilder) -> RequestBuilder) -> Self {
        Self {
            builder: f(self.builder),
            token: self.token,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OperationsClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl OperationsClient {
    /// Build a client for `config.base_url` sharing `session`
    pub fn new(config: &ClientConfig<'_>, session: Arc<Session>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Session whose token is attached to every request
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request(&self, method: Method, path: &str) -> Outgoing {
        let builder = self.http.request(method, self.url(path));
        let token = self.session.token().await;
        let builder = match &token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        Outgoing { builder, token }
    }

    /// Send one request and decode its envelope.
    ///
    /// A 401 with `TOKEN_EXPIRED` clears the session, but only if it still
    /// holds the token this request was sent with.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: Outgoing,
    ) -> ClientResult<ApiResponse<T>> {
        let response = request.builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            let error = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error);
            return match error {
                Some(error) if error.code == TOKEN_EXPIRED => {
                    tracing::warn!("token expired");
                    if let Some(sent) = request.token.as_deref() {
                        self.session.clear_if(sent).await;
                    }
                    Err(ClientError::TokenExpired)
                }
                Some(error) => Err(ClientError::AccessDenied(error.message)),
                None => Err(ClientError::AccessDenied(body)),
            };
        }

        if !status.is_success() {
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .map(|error| error.message)
                .unwrap_or(body);
            tracing::debug!(status = status.as_u16(), %message, "request failed");
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Vec<T>> {
        let request = self.request(Method::GET, path).await;
        self.execute::<Vec<T>>(request).await?.into_list()
    }

    async fn get_one<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::GET, path).await;
        self.execute::<T>(request).await?.into_data()
    }

    async fn command<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<CommandOutcome> {
        let request_id = Uuid::new_v4();
        tracing::info!(%request_id, %method, path, "sending command");

        let request = self.request(method, path).await.map(|builder| {
            builder
                .header(REQUEST_ID_HEADER, request_id.to_string())
                .json(body)
        });
        let envelope = self.execute::<serde_json::Value>(request).await?.check()?;

        Ok(CommandOutcome {
            request_id,
            data: envelope.data.filter(|data| !data.is_null()),
        })
    }

    /// All hospital networks with their hospitals
    pub async fn list_networks(&self) -> ClientResult<Vec<HospitalNetwork>> {
        self.get_list("hospital-networks").await
    }

    /// One hospital network by id
    pub async fn get_network(&self, network_id: &str) -> ClientResult<HospitalNetwork> {
        self.get_one(&format!("hospital-networks/{network_id}")).await
    }

    /// All collection centers
    pub async fn list_centers(&self) -> ClientResult<Vec<CollectionCenter>> {
        self.get_list("collection-centers").await
    }

    /// One collection center with its hospital relationships
    pub async fn get_center(&self, center_id: &str) -> ClientResult<CollectionCenter> {
        self.get_one(&format!("collection-centers/{center_id}")).await
    }

    /// Billing records of every network
    pub async fn list_subscriptions(&self) -> ClientResult<Vec<Subscription>> {
        self.get_list("subscriptions").await
    }

    /// Orders narrowed server-side by `query`
    pub async fn list_orders(&self, query: &OrderQuery<'_>) -> ClientResult<Vec<Order>> {
        let request = self
            .request(Method::GET, "orders")
            .await
            .map(|builder| builder.query(query));
        self.execute::<Vec<Order>>(request).await?.into_list()
    }

    /// One order with its stage timestamps
    pub async fn get_order(&self, order_id: &str) -> ClientResult<Order> {
        self.get_one(&format!("orders/{order_id}")).await
    }

    /// QR scan log for compliance
    pub async fn list_qr_logs(&self) -> ClientResult<Vec<QrLog>> {
        self.get_list("qr-logs").await
    }

    /// Feature requests of one center
    pub async fn list_center_features(
        &self,
        center_id: &str,
    ) -> ClientResult<Vec<FeatureRequest>> {
        self.get_list(&format!("collection-centers/{center_id}/features"))
            .await
    }

    /// Monthly performance trend rows
    pub async fn list_monthly_trends(&self) -> ClientResult<Vec<MonthlyTrend>> {
        self.get_list("analytics/monthly-trends").await
    }

    /// Approve a pending hospital network
    pub async fn approve_network(
        &self,
        network_id: &str,
        notes: Option<&str>,
    ) -> ClientResult<CommandOutcome> {
        self.command(
            Method::POST,
            &format!("hospital-networks/{network_id}/approve"),
            &ApprovalBody { notes },
        )
        .await
    }

    /// Approve a pending collection center
    pub async fn approve_center(
        &self,
        center_id: &str,
        notes: Option<&str>,
    ) -> ClientResult<CommandOutcome> {
        self.command(
            Method::POST,
            &format!("collection-centers/{center_id}/approve"),
            &ApprovalBody { notes },
        )
        .await
    }

    /// Reject a pending network, hospital or center
    pub async fn reject(
        &self,
        kind: EntityKind,
        id: &str,
        reason: &str,
    ) -> ClientResult<CommandOutcome> {
        self.command(
            Method::POST,
            "approvals/reject",
            &RejectionBody { kind, id, reason },
        )
        .await
    }

    /// Turn a feature on or off for a center
    pub async fn enable_center_feature(
        &self,
        center_id: &str,
        feature_id: &str,
        enabled: bool,
        notes: Option<&str>,
    ) -> ClientResult<CommandOutcome> {
        self.command(
            Method::POST,
            &format!("collection-centers/{center_id}/features/{feature_id}"),
            &FeatureToggleBody { enabled, notes },
        )
        .await
    }

    /// Record a payment against a network's subscription
    pub async fn update_subscription_payment(
        &self,
        network_id: &str,
        payment: &PaymentUpdate,
    ) -> ClientResult<CommandOutcome> {
        self.command(
            Method::PUT,
            &format!("subscriptions/{network_id}/payment"),
            payment,
        )
        .await
    }

    /// Change a rider's availability
    pub async fn update_rider_status(
        &self,
        rider_id: &str,
        status: RiderStatus,
        notes: Option<&str>,
    ) -> ClientResult<CommandOutcome> {
        self.command(
            Method::PUT,
            &format!("riders/{rider_id}/status"),
            &RiderStatusBody { status, notes },
        )
        .await
    }
}
