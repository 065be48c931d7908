#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower::ServiceExt;

use jsonwebtoken::{encode, get_current_timestamp, EncodingKey, Header};
use villa_api::auth::jwt::{Claims, JwtConfig};
use villa_api::clients::{
    IdentityProvider, ImageUpload, LocalJwtIdentity, LocalVillaDirectory, MediaStore, VillaLookup,
    MEDIA_SERVICE,
};
use villa_api::config::{IdentityConfig, ServerConfig, ServiceRole};
use villa_api::router::build_app_router;
use villa_api::state::AppState;
use villa_core::error::CoreError;
use villa_core::roles::{ROLE_ADMIN, ROLE_MEMBER};
use villa_core::types::DbId;
use villa_db::models::villa::{Villa, VillaInput};
use villa_db::repositories::VillaRepo;

/// User id carried by [`admin_token`].
pub const ADMIN_ID: DbId = 1;

const MULTIPART_BOUNDARY: &str = "villa-test-boundary";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
    }
}

/// Build a test `ServerConfig` serving both villas and reservations.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        service_role: ServiceRole::All,
        villa_service_url: None,
        media_service_url: "http://media.invalid".to_string(),
        upstream_timeout_secs: 5,
        identity: IdentityConfig::Local(test_jwt_config()),
    }
}

// ---------------------------------------------------------------------------
// Stub collaborators
// ---------------------------------------------------------------------------

/// In-memory media service. Returns a URL derived from the file name and
/// counts uploads.
#[derive(Default)]
pub struct StubMedia {
    pub uploads: AtomicUsize,
}

impl StubMedia {
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaStore for StubMedia {
    async fn upload(&self, image: ImageUpload) -> Result<String, CoreError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://media.test/images/{}", image.file_name))
    }
}

/// Villa lookup that always fails, as if the directory were down. Counts calls.
#[derive(Default)]
pub struct DownVillaDirectory {
    pub calls: AtomicUsize,
}

#[async_trait]
impl VillaLookup for DownVillaDirectory {
    async fn fetch_rates(
        &self,
        _villa_id: DbId,
    ) -> Result<Option<villa_core::pricing::VillaRates>, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CoreError::UpstreamUnavailable {
            service: villa_api::clients::VILLA_SERVICE,
            reason: "connection refused".into(),
        })
    }
}

/// Media service that always fails.
pub struct DownMedia;

#[async_trait]
impl MediaStore for DownMedia {
    async fn upload(&self, _image: ImageUpload) -> Result<String, CoreError> {
        Err(CoreError::UpstreamUnavailable {
            service: MEDIA_SERVICE,
            reason: "503 Service Unavailable".into(),
        })
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Assemble the app from explicit collaborators, behind the production
/// middleware stack.
pub fn build_app_with(
    pool: PgPool,
    config: ServerConfig,
    villas: Arc<dyn VillaLookup>,
    media: Arc<dyn MediaStore>,
) -> Router {
    let identity: Arc<dyn IdentityProvider> = Arc::new(LocalJwtIdentity::new(test_jwt_config()));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        identity,
        villas,
        media,
    };
    build_app_router(state, &config)
}

/// Full app with local JWT identity, the co-located villa table and a stub
/// media service.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_media(pool, Arc::new(StubMedia::default()))
}

pub fn build_test_app_with_media(pool: PgPool, media: Arc<dyn MediaStore>) -> Router {
    let villas = Arc::new(LocalVillaDirectory::new(pool.clone()));
    build_app_with(pool, test_config(), villas, media)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Sign a token the way the identity service does, valid for 30 minutes.
pub fn sign_token(user_id: DbId, role: &str) -> String {
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: get_current_timestamp() + 30 * 60,
    };
    let key = EncodingKey::from_secret(test_jwt_config().secret.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

pub fn admin_token() -> String {
    sign_token(ADMIN_ID, ROLE_ADMIN)
}

pub fn member_token(user_id: DbId) -> String {
    sign_token(user_id, ROLE_MEMBER)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Villa with base capacity 4, maximum 6, 100 per night and 20 per extra guest.
pub fn villa_input(city: &str) -> VillaInput {
    VillaInput {
        title: format!("Villa in {city}"),
        city: city.to_string(),
        address: "12 Shore Road".to_string(),
        base_capacity: 4,
        maximum_capacity: 6,
        area: 180.0,
        bed_count: 3,
        has_pool: true,
        has_cooling_system: true,
        base_price_per_night: Decimal::from(100),
        extra_person_price: Decimal::from(20),
        rating: 4.5,
    }
}

pub async fn seed_villa(pool: &PgPool, city: &str) -> Villa {
    VillaRepo::create(pool, &villa_input(city), "https://media.test/images/seed.jpg")
        .await
        .expect("villa seed should succeed")
}

pub fn villa_json(city: &str) -> serde_json::Value {
    serde_json::json!({
        "title": format!("Villa in {city}"),
        "city": city,
        "address": "12 Shore Road",
        "base_capacity": 4,
        "maximum_capacity": 6,
        "area": 180.0,
        "bed_count": 3,
        "has_pool": true,
        "has_cooling_system": false,
        "base_price_per_night": "100.00",
        "extra_person_price": "20.00",
        "rating": 4.0
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn with_auth(
    builder: axum::http::request::Builder,
    token: Option<&str>,
) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = with_auth(Request::builder().uri(uri), Some(token))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let request = with_auth(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json"),
        token,
    )
    .body(Body::from(body.to_string()))
    .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = with_auth(
        Request::builder().method(Method::DELETE).uri(uri),
        Some(token),
    )
    .body(Body::empty())
    .unwrap();
    send(app, request).await
}

/// Send a multipart villa form: a `villa` JSON part plus an optional
/// `image` file part.
pub async fn send_villa_form(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    villa: &serde_json::Value,
    image: Option<(&str, &[u8])>,
) -> Response<Body> {
    let mut body: Vec<u8> = Vec::new();
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"villa\"\r\n\
             Content-Type: application/json\r\n\r\n\
             {villa}\r\n"
        )
        .as_bytes(),
    );
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\n\
                 Content-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let request = with_auth(
        Request::builder().method(method).uri(uri).header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        ),
        token,
    )
    .body(Body::from(body))
    .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a money field serialized as a decimal string.
pub fn money(value: &serde_json::Value) -> Decimal {
    value
        .as_str()
        .expect("money fields serialize as strings")
        .parse()
        .expect("money field should parse as a decimal")
}
