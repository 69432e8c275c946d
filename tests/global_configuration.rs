// Only test in this binary touching the process-wide instance.
use bearer_gate::auth::{ConfigOptions, Configuration, TokenVerifier};
use bearer_gate::{AuthFailure, Outcome};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::json;

#[test]
fn global_configuration_lifecycle() {
    let global = Configuration::global();
    let verifier = TokenVerifier::new(global.clone());
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS384),
        &json!({"data": "test"}),
        &EncodingKey::from_secret(b"global-secret"),
    )
    .unwrap();

    assert_eq!(
        verifier.verify(Some(&token)),
        Outcome::Failure(AuthFailure::MissingConfiguration)
    );

    global.configure(
        ConfigOptions::new()
            .verification_key("global-secret")
            .algorithm(Algorithm::HS384),
    );
    assert_eq!(
        verifier.verify(Some(&token)),
        Outcome::Success(json!({"data": "test"}))
    );
    assert!(std::ptr::eq(global, Configuration::global()));

    global.reset();
    assert_eq!(
        verifier.verify(Some(&token)).failure(),
        AuthFailure::MissingConfiguration
    );
}
