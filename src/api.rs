// REST client for the marketplace backend.
//
// Every request carries the stored bearer token. A 401 triggers exactly one
// silent refresh followed by one retry; if that fails the stored tokens are
// dropped and the caller gets `ApiError::Unauthorized`.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use reqwest::Method;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::{
    config::ClientConfig,
    error::{ApiError, ClientError},
    filters::{HotelFilters, QueryParams, TourFilters},
    models::{
        Accommodation, AuthSession, AuthTokens, Booking, BookingRequest, CreateTourRequest,
        LoginRequest, OnboardingProfile, OnboardingStatus, RefreshRequest, RegisterRequest, Tour,
        User,
    },
    tokens::{MemoryTokenStore, TokenStore},
    transport::{ApiRequest, ApiResponse, HttpTransport, Transport},
};

pub const REFRESH_PATH: &str = "/auth/refresh";

// Whether a 401 on this request may trigger the silent refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Session,
    Anonymous,
}

#[derive(Debug, Default)]
pub struct ClientStats {
    pub requests_sent: AtomicUsize,
    pub requests_succeeded: AtomicUsize,
    pub requests_failed: AtomicUsize,
    pub token_refreshes: AtomicUsize,
    pub sessions_expired: AtomicUsize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub requests_sent: usize,
    pub requests_succeeded: usize,
    pub requests_failed: usize,
    pub token_refreshes: usize,
    pub sessions_expired: usize,
}

impl ClientStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests_sent: self.requests_sent.load(Ordering::SeqCst),
            requests_succeeded: self.requests_succeeded.load(Ordering::SeqCst),
            requests_failed: self.requests_failed.load(Ordering::SeqCst),
            token_refreshes: self.token_refreshes.load(Ordering::SeqCst),
            sessions_expired: self.sessions_expired.load(Ordering::SeqCst),
        }
    }
}

// The refresh endpoint may omit a rotated refresh token
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
    refresh_token: Option<String>,
}

pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
    stats: ClientStats,
}

impl ApiClient {
    // Create a client on the reqwest transport with in-memory token storage
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_parts(
            config,
            Arc::new(transport),
            Arc::new(MemoryTokenStore::new()),
        ))
    }

    pub fn with_parts(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            config,
            transport,
            tokens,
            stats: ClientStats::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.access_token().is_some()
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut request = request.clone();
        request.bearer = self.tokens.access_token();

        self.stats.requests_sent.fetch_add(1, Ordering::SeqCst);
        let result = self.transport.send(&request).await;
        match &result {
            Ok(response) => debug!(
                method = %request.method,
                path = %request.path,
                status = response.status,
                "api response"
            ),
            Err(e) => warn!(
                method = %request.method,
                path = %request.path,
                error = %e,
                "api request failed"
            ),
        }
        result
    }

    async fn execute(&self, request: ApiRequest, auth: Auth) -> Result<ApiResponse, ApiError> {
        let response = match self.dispatch(&request).await {
            Ok(response) => response,
            Err(e) => {
                self.stats.requests_failed.fetch_add(1, Ordering::SeqCst);
                return Err(e);
            }
        };

        if response.status != 401 || auth == Auth::Anonymous {
            return self.finish(response);
        }
        self.stats.requests_failed.fetch_add(1, Ordering::SeqCst);

        if let Err(e) = self.refresh_tokens().await {
            warn!(path = %request.path, error = %e, "token refresh failed");
            return self.expire_session();
        }

        let retried = match self.dispatch(&request).await {
            Ok(response) => response,
            Err(e) => {
                self.stats.requests_failed.fetch_add(1, Ordering::SeqCst);
                return Err(e);
            }
        };
        if retried.status == 401 {
            warn!(path = %request.path, "request rejected after token refresh");
            self.stats.requests_failed.fetch_add(1, Ordering::SeqCst);
            return self.expire_session();
        }
        self.finish(retried)
    }

    fn finish(&self, response: ApiResponse) -> Result<ApiResponse, ApiError> {
        if response.is_success() {
            self.stats.requests_succeeded.fetch_add(1, Ordering::SeqCst);
            Ok(response)
        } else {
            self.stats.requests_failed.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::ApiResponseError {
                status_code: response.status,
                message: response.error_message(),
            })
        }
    }

    fn expire_session(&self) -> Result<ApiResponse, ApiError> {
        self.stats.sessions_expired.fetch_add(1, Ordering::SeqCst);
        self.tokens.clear()?;
        Err(ApiError::Unauthorized)
    }

    async fn refresh_tokens(&self) -> Result<(), ApiError> {
        let refresh_token = self.tokens.refresh_token().ok_or(ApiError::Unauthorized)?;
        let body = serde_json::to_value(RefreshRequest {
            refresh_token: refresh_token.clone(),
        })?;
        let request = ApiRequest::new(Method::POST, REFRESH_PATH).with_body(body);
        // dispatched directly: a 401 here must never start another refresh
        let response = match self.dispatch(&request).await {
            Ok(response) => response,
            Err(e) => {
                self.stats.requests_failed.fetch_add(1, Ordering::SeqCst);
                return Err(e);
            }
        };
        let refreshed: RefreshResponse = self.finish(response)?.json()?;

        self.tokens.store(&AuthTokens {
            access_token: refreshed.access_token,
            refresh_token: refreshed.refresh_token.unwrap_or(refresh_token),
        })?;
        self.stats.token_refreshes.fetch_add(1, Ordering::SeqCst);
        info!("access token refreshed");
        Ok(())
    }

    // Generic verbs

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.execute(ApiRequest::new(Method::GET, path), Auth::Session)
            .await?
            .json()
    }

    pub async fn get_with_query<R: DeserializeOwned>(
        &self,
        path: &str,
        query: QueryParams,
    ) -> Result<R, ApiError> {
        let request = ApiRequest::new(Method::GET, path).with_query(query);
        self.execute(request, Auth::Session).await?.json()
    }

    /// Like [`ApiClient::get`], but a 404 means "no such record" rather than an error.
    pub async fn get_optional<R: DeserializeOwned>(&self, path: &str) -> Result<Option<R>, ApiError> {
        match self.get(path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body, Auth::Session).await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body, Auth::Session).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.execute(ApiRequest::new(Method::DELETE, path), Auth::Session)
            .await?
            .json()
    }

    async fn send_json<B, R>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = ApiRequest::new(method, path).with_body(serde_json::to_value(body)?);
        self.execute(request, auth).await?.json()
    }

    // Auth

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let session: AuthSession = self
            .send_json(Method::POST, "/auth/login", &request, Auth::Anonymous)
            .await?;
        self.tokens.store(&session.tokens)?;
        info!(user = %session.user.id, "signed in");
        Ok(session)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, ApiError> {
        let session: AuthSession = self
            .send_json(Method::POST, "/auth/register", request, Auth::Anonymous)
            .await?;
        self.tokens.store(&session.tokens)?;
        info!(user = %session.user.id, "registered");
        Ok(session)
    }

    // Server-side logout is best effort; local tokens are always dropped
    pub async fn logout(&self) -> Result<(), ApiError> {
        if self.is_authenticated() {
            let result: Result<Value, ApiError> = self
                .send_json(Method::POST, "/auth/logout", &json!({}), Auth::Anonymous)
                .await;
            if let Err(e) = result {
                warn!(error = %e, "logout request failed, clearing tokens anyway");
            }
        }
        self.tokens.clear()?;
        Ok(())
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get("/auth/me").await
    }

    pub async fn refresh_session(&self) -> Result<(), ApiError> {
        match self.refresh_tokens().await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = %e, "explicit token refresh failed");
                self.expire_session().map(|_| ())
            }
        }
    }

    // Accommodations

    pub async fn list_accommodations(
        &self,
        filters: &HotelFilters,
    ) -> Result<Vec<Accommodation>, ApiError> {
        self.get_with_query("/accommodations", filters.query_params())
            .await
    }

    pub async fn get_accommodation(&self, id: &str) -> Result<Option<Accommodation>, ApiError> {
        self.get_optional(&format!("/accommodations/{id}")).await
    }

    // Tours

    pub async fn list_tours(&self, filters: &TourFilters) -> Result<Vec<Tour>, ApiError> {
        self.get_with_query("/tours", filters.query_params()).await
    }

    pub async fn get_tour(&self, id: &str) -> Result<Option<Tour>, ApiError> {
        self.get_optional(&format!("/tours/{id}")).await
    }

    pub async fn create_tour(&self, request: &CreateTourRequest) -> Result<Tour, ApiError> {
        self.post("/tours", request).await
    }

    // Bookings

    pub async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, ApiError> {
        self.post("/bookings", request).await
    }

    pub async fn my_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.get("/bookings/my").await
    }

    pub async fn get_booking(&self, id: &str) -> Result<Booking, ApiError> {
        self.get(&format!("/bookings/{id}")).await
    }

    pub async fn cancel_booking(&self, id: &str) -> Result<Booking, ApiError> {
        self.put(&format!("/bookings/{id}/cancel"), &json!({})).await
    }

    // Onboarding

    pub async fn onboarding_status(&self) -> Result<OnboardingStatus, ApiError> {
        self.get("/onboarding/status").await
    }

    pub async fn complete_onboarding(
        &self,
        profile: &OnboardingProfile,
    ) -> Result<OnboardingStatus, ApiError> {
        self.post("/onboarding/complete", profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterState;
    use crate::models::{BookingStatus, ListingKind, UserRole};
    use crate::tokens::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
    use crate::transport::mock::MockTransport;
    use chrono::NaiveDate;

    fn user_json() -> Value {
        json!({ "id": "u1", "email": "host@example.com", "firstName": "Ada", "lastName": "Ng", "role": "host" })
    }

    fn tour_json(id: &str) -> Value {
        json!({
            "id": id,
            "title": "Old Town Food Walk",
            "destination": "Lisbon",
            "category": "food",
            "duration": "half-day",
            "price": 65.0,
            "currency": "EUR"
        })
    }

    fn booking_json(status: &str) -> Value {
        json!({
            "id": "b1",
            "listingId": "acc-1",
            "listingKind": "accommodation",
            "status": status,
            "startDate": "2025-09-01",
            "endDate": "2025-09-04",
            "totalPrice": 540.0,
            "currency": "EUR"
        })
    }

    fn client_with(transport: Arc<MockTransport>) -> ApiClient {
        ApiClient::with_parts(
            ClientConfig::default(),
            transport,
            Arc::new(MemoryTokenStore::new()),
        )
    }

    fn signed_in(transport: Arc<MockTransport>) -> ApiClient {
        let client = client_with(transport);
        client
            .tokens()
            .store(&AuthTokens {
                access_token: "stale".to_string(),
                refresh_token: "refresh-1".to_string(),
            })
            .unwrap();
        client
    }

    #[tokio::test]
    async fn test_login_stores_tokens_and_sends_bearer() -> anyhow::Result<()> {
        let transport = Arc::new(MockTransport::new());
        transport.respond(
            Method::POST,
            "/auth/login",
            200,
            json!({ "user": user_json(), "accessToken": "a1", "refreshToken": "r1" }),
        );
        transport.respond(Method::GET, "/auth/me", 200, user_json());
        let client = client_with(transport.clone());

        let session = client.login("host@example.com", "secret").await?;
        assert_eq!(session.user.role, UserRole::Host);
        assert!(client.is_authenticated());
        assert_eq!(client.tokens().get(REFRESH_TOKEN_KEY).as_deref(), Some("r1"));

        let me = client.current_user().await?;
        assert_eq!(me.first_name, "Ada");
        let sent = transport.requests_to("/auth/me");
        assert_eq!(sent[0].bearer.as_deref(), Some("a1"));
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_credentials_do_not_trigger_refresh() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(
            Method::POST,
            "/auth/login",
            401,
            json!({ "message": "Invalid credentials" }),
        );
        let client = client_with(transport.clone());

        let err = client.login("a@b.c", "wrong").await.unwrap_err();
        match err {
            ApiError::ApiResponseError {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 401);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(transport.requests_to(REFRESH_PATH).is_empty());
    }

    #[tokio::test]
    async fn test_401_refreshes_once_and_retries() -> anyhow::Result<()> {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::GET, "/bookings/my", 401, json!({ "message": "expired" }));
        transport.respond(Method::GET, "/bookings/my", 200, json!([booking_json("confirmed")]));
        transport.respond(
            Method::POST,
            REFRESH_PATH,
            200,
            json!({ "accessToken": "fresh" }),
        );
        let client = signed_in(transport.clone());

        let bookings = client.my_bookings().await?;
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].status, BookingStatus::Confirmed);

        let calls = transport.requests_to("/bookings/my");
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].bearer.as_deref(), Some("stale"));
        assert_eq!(calls[1].bearer.as_deref(), Some("fresh"));

        let refresh = transport.requests_to(REFRESH_PATH);
        assert_eq!(refresh.len(), 1);
        assert_eq!(refresh[0].body, Some(json!({ "refreshToken": "refresh-1" })));

        // rotated refresh token absent, so the old one is kept
        assert_eq!(client.tokens().get(ACCESS_TOKEN_KEY).as_deref(), Some("fresh"));
        assert_eq!(client.tokens().get(REFRESH_TOKEN_KEY).as_deref(), Some("refresh-1"));
        let stats = client.stats();
        assert_eq!(stats.token_refreshes, 1);
        assert_eq!(stats.requests_sent, 3);
        assert_eq!(stats.requests_succeeded, 2);
        assert_eq!(stats.requests_failed, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_tokens() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::GET, "/auth/me", 401, Value::Null);
        transport.respond(Method::POST, REFRESH_PATH, 401, json!({ "message": "revoked" }));
        let client = signed_in(transport.clone());

        let err = client.current_user().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(!client.is_authenticated());
        assert!(client.tokens().refresh_token().is_none());
        assert_eq!(transport.requests_to("/auth/me").len(), 1);
        assert_eq!(transport.requests_to(REFRESH_PATH).len(), 1);
        let stats = client.stats();
        assert_eq!(stats.sessions_expired, 1);
        assert_eq!(stats.requests_sent, 2);
        assert_eq!(stats.requests_failed, 2);
    }

    #[tokio::test]
    async fn test_second_401_after_refresh_gives_up() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::GET, "/auth/me", 401, Value::Null);
        transport.respond(
            Method::POST,
            REFRESH_PATH,
            200,
            json!({ "accessToken": "fresh", "refreshToken": "refresh-2" }),
        );
        let client = signed_in(transport.clone());

        let err = client.current_user().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert_eq!(transport.requests_to("/auth/me").len(), 2);
        assert_eq!(transport.requests_to(REFRESH_PATH).len(), 1);
        assert!(client.tokens().access_token().is_none());
        let stats = client.stats();
        assert_eq!(stats.requests_sent, 3);
        assert_eq!(stats.requests_succeeded + stats.requests_failed, 3);
    }

    #[tokio::test]
    async fn test_401_without_refresh_token_expires_session() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::GET, "/bookings/my", 401, Value::Null);
        let client = client_with(transport.clone());
        client.tokens().set(ACCESS_TOKEN_KEY, "orphan").unwrap();

        let err = client.my_bookings().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(transport.requests_to(REFRESH_PATH).is_empty());
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_404_detail_is_none() -> anyhow::Result<()> {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::GET, "/tours/t1", 200, tour_json("t1"));
        let client = client_with(transport);

        assert_eq!(client.get_tour("t1").await?.map(|t| t.id), Some("t1".to_string()));
        assert!(client.get_tour("missing").await?.is_none());
        assert!(client.get_accommodation("missing").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_server_errors_surface_with_message() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(
            Method::GET,
            "/tours/t1",
            500,
            json!({ "message": "database down" }),
        );
        let client = client_with(transport);

        let err = client.get_tour("t1").await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert!(err.to_string().contains("database down"));
        assert_eq!(client.stats().requests_failed, 1);
    }

    #[tokio::test]
    async fn test_listing_sends_filters_as_query() -> anyhow::Result<()> {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::GET, "/tours", 200, json!([tour_json("t1"), tour_json("t2")]));
        let client = client_with(transport.clone());

        let state = FilterState::from_query_str("mode=tours&category=food&adults=3");
        let tours = client.list_tours(state.tours()).await?;
        assert_eq!(tours.len(), 2);

        let sent = &transport.requests_to("/tours")[0];
        assert_eq!(
            sent.query,
            vec![
                ("adults".to_string(), "3".to_string()),
                ("category".to_string(), "food".to_string())
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_booking_lifecycle() -> anyhow::Result<()> {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::POST, "/bookings", 201, booking_json("pending"));
        transport.respond(Method::GET, "/bookings/b1", 200, booking_json("confirmed"));
        transport.respond(Method::PUT, "/bookings/b1/cancel", 200, booking_json("cancelled"));
        let client = signed_in(transport.clone());

        let request = BookingRequest {
            listing_id: "acc-1".to_string(),
            listing_kind: ListingKind::Accommodation,
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 9, 4).unwrap(),
            adults: 2,
            children: 0,
            rooms: Some(1),
            special_requests: None,
        };
        let booking = client.create_booking(&request).await?;
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(client.get_booking("b1").await?.status, BookingStatus::Confirmed);
        assert_eq!(client.cancel_booking("b1").await?.status, BookingStatus::Cancelled);

        let posted = &transport.requests_to("/bookings")[0];
        assert_eq!(posted.body.as_ref().unwrap()["listingId"], "acc-1");
        assert_eq!(posted.bearer.as_deref(), Some("stale"));
        Ok(())
    }

    #[tokio::test]
    async fn test_booking_validation_error_is_returned() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(
            Method::POST,
            "/bookings",
            422,
            json!({ "error": "Dates unavailable" }),
        );
        let client = signed_in(transport);

        let request = BookingRequest {
            listing_id: "acc-1".to_string(),
            listing_kind: ListingKind::Accommodation,
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 9, 2).unwrap(),
            adults: 1,
            children: 0,
            rooms: None,
            special_requests: Some("late arrival".to_string()),
        };
        let err = client.create_booking(&request).await.unwrap_err();
        assert_eq!(err.to_string(), "API error: 422 - Dates unavailable");
    }

    #[tokio::test]
    async fn test_logout_accepts_message_body() -> anyhow::Result<()> {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::POST, "/auth/logout", 200, json!({ "message": "Logged out" }));
        let client = signed_in(transport.clone());

        client.logout().await?;
        assert!(!client.is_authenticated());
        let stats = client.stats();
        assert_eq!(stats.requests_succeeded, 1);
        assert_eq!(stats.requests_failed, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_logout_clears_tokens_even_when_server_fails() -> anyhow::Result<()> {
        let transport = Arc::new(MockTransport::new());
        transport.fail_next_requests(1);
        let client = signed_in(transport.clone());

        client.logout().await?;
        assert!(!client.is_authenticated());
        assert_eq!(transport.requests_to("/auth/logout").len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_onboarding_calls() -> anyhow::Result<()> {
        let transport = Arc::new(MockTransport::new());
        transport.respond(
            Method::GET,
            "/onboarding/status",
            200,
            json!({ "completed": false, "currentStep": "profile" }),
        );
        transport.respond(
            Method::POST,
            "/onboarding/complete",
            200,
            json!({ "completed": true, "role": "host" }),
        );
        let client = signed_in(transport);

        let status = client.onboarding_status().await?;
        assert!(!status.completed);
        assert_eq!(status.current_step.as_deref(), Some("profile"));

        let done = client
            .complete_onboarding(&OnboardingProfile {
                role: UserRole::Host,
                phone: None,
                country: Some("PT".to_string()),
                interests: vec!["food".to_string()],
            })
            .await?;
        assert!(done.completed);
        assert_eq!(done.role, UserRole::Host);
        Ok(())
    }

    #[tokio::test]
    async fn test_network_error_is_propagated() {
        let transport = Arc::new(MockTransport::new());
        transport.fail_next_requests(1);
        let client = client_with(transport);

        let err = client
            .list_accommodations(&HotelFilters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NetworkError(_)));
        let stats = client.stats();
        assert_eq!(stats.requests_sent, 1);
        assert_eq!(stats.requests_failed, 1);
    }
}
