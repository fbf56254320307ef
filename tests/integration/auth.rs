//! Integration tests for Kerberos logins through a SPNEGO provider

use super::*;
use lenses_client::auth::{KerberosMethod, KerberosWithPassword, SpnegoProvider};
use lenses_client::{LensesError, LensesResult};
use parking_lot::Mutex;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::Mock;

#[derive(Default)]
struct FixedTicket {
    principals: Mutex<Vec<String>>,
}

impl SpnegoProvider for FixedTicket {
    fn init_sec_context(
        &self,
        method: KerberosMethod<'_>,
        service_principal: &str,
    ) -> LensesResult<Vec<u8>> {
        assert!(matches!(method, KerberosMethod::Password(p) if p.username == "alice"));
        self.principals.lock().push(service_principal.to_string());
        Ok(b"ticket".to_vec())
    }
}

fn kerberos_config(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .host(server.uri())
        .authentication(Authentication::KerberosWithPassword(KerberosWithPassword {
            username: "alice".to_string(),
            password: SecretString::new("pw".to_string()),
            realm: Some("EXAMPLE.COM".to_string()),
            config_file: "/etc/krb5.conf".into(),
        }))
        .build()
        .expect("valid config")
}

#[tokio::test]
async fn test_kerberos_login_sends_negotiate_header() {
    let mock_server = setup_mock_server().await;

    // base64("ticket")
    Mock::given(method("GET"))
        .and(path("/api/auth/kerberos"))
        .and(header("authorization", "Negotiate dGlja2V0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("krb-session"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = Arc::new(FixedTicket::default());
    let client = LensesClient::connect(
        kerberos_config(&mock_server),
        vec![ConnectOption::Spnego(provider.clone())],
    )
    .await
    .expect("kerberos login");

    assert!(client.rest().has_token());
    assert_eq!(provider.principals.lock().as_slice(), ["HTTP/127.0.0.1"]);
}

#[tokio::test]
async fn test_kerberos_without_provider() {
    let mock_server = setup_mock_server().await;

    let result = LensesClient::connect(kerberos_config(&mock_server), vec![]).await;

    assert!(matches!(result, Err(LensesError::Authentication { .. })));
}
