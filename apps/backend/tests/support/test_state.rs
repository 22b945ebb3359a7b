use coffee_backend::infra::state::build_state;
use coffee_backend::state::app_state::AppState;
use coffee_backend::state::security_config::SecurityConfig;

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";
pub const TEST_ISSUER: &str = "https://coffee-shop.test/";
pub const TEST_AUDIENCE: &str = "drinks";

/// HS256 settings shared by the token helpers in `support::auth`.
pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET.to_vec(), TEST_ISSUER, TEST_AUDIENCE)
}

/// Fresh migrated in-memory database with [`test_security`].
pub async fn build_test_state() -> AppState {
    build_test_state_with(test_security()).await
}

pub async fn build_test_state_with(security: SecurityConfig) -> AppState {
    build_state()
        .with_security(security)
        .build()
        .await
        .expect("build in-memory test state")
}
