use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use bearer_gate::{
    app,
    auth::{ConfigOptions, Configuration},
    state::AppState,
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

const RSA_PRIVATE_PEM: &str = include_str!("fixtures/rsa_private.pem");
const RSA_PUBLIC_PEM: &str = include_str!("fixtures/rsa_public.pem");
const OTHER_RSA_PRIVATE_PEM: &str = include_str!("fixtures/other_rsa_private.pem");

fn router() -> Router {
    // RS256 is the default algorithm, only the key is configured.
    let config = Configuration::with_options(ConfigOptions::new().verification_key(RSA_PUBLIC_PEM));
    app::build_router(AppState::new(config))
}

fn sign(claims: &Value, private_pem: &str) -> String {
    let key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).unwrap();
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), claims, &key).unwrap()
}

async fn get(router: Router, authorization: Option<&str>) -> Response {
    let mut req = Request::get("/api/v1/hello");
    if let Some(value) = authorization {
        req = req.header(header::AUTHORIZATION, value);
    }
    router.oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
}

async fn body_string(res: Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn assert_rejected(res: Response, message: &str) {
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "application/json");

    let body: Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(body, json!({ "error": message }));
}

#[tokio::test]
async fn valid_token_reaches_handler() {
    let token = sign(&json!({"data": "test"}), RSA_PRIVATE_PEM);

    let res = get(router(), Some(&format!("Bearer {token}"))).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(body_string(res).await, "Hello, World!\n{\"data\":\"test\"}");
}

#[tokio::test]
async fn missing_header_is_rejected() {
    assert_rejected(get(router(), None).await, "Unauthorized. Token missing").await;
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected_as_missing() {
    let res = get(router(), Some("Basic dXNlcjpwYXNzd29yZA==")).await;
    assert_rejected(res, "Unauthorized. Token missing").await;
}

#[tokio::test]
async fn token_from_other_key_is_invalid() {
    let token = sign(&json!({"data": "test"}), OTHER_RSA_PRIVATE_PEM);

    let res = get(router(), Some(&format!("Bearer {token}"))).await;

    assert_rejected(res, "Unauthorized. Token invalid").await;
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let exp = chrono::Utc::now().timestamp() - 3600;
    let token = sign(&json!({"data": "test", "exp": exp}), RSA_PRIVATE_PEM);

    let res = get(router(), Some(&format!("Bearer {token}"))).await;

    assert_rejected(res, "Unauthorized. Token expired").await;
}

#[tokio::test]
async fn garbage_token_is_malformed() {
    let res = get(router(), Some("Bearer not-a-jwt")).await;
    assert_rejected(res, "Unauthorized. Token malformed").await;
}

#[tokio::test]
async fn unconfigured_key_rejects_everything() {
    let token = sign(&json!({"data": "test"}), RSA_PRIVATE_PEM);
    let router = app::build_router(AppState::new(Configuration::new()));

    let res = get(router, Some(&format!("Bearer {token}"))).await;

    assert_rejected(res, "Unauthorized. Verification key not configured").await;
}

#[tokio::test]
async fn health_is_not_gated() {
    let res = router()
        .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn reconfiguration_applies_to_next_request() {
    let config = Configuration::new();
    let router = app::build_router(AppState::new(config.clone()));
    let token = sign(&json!({"data": "test"}), RSA_PRIVATE_PEM);
    let bearer = format!("Bearer {token}");

    let res = get(router.clone(), Some(&bearer)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    config.configure(ConfigOptions::new().verification_key(RSA_PUBLIC_PEM));

    let res = get(router, Some(&bearer)).await;
    assert_eq!(res.status(), StatusCode::OK);
}
