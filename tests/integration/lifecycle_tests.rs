//! Resource lifecycle integration tests
//!
//! Every test drives the provider through the real HTTP client against the
//! in-memory API.

#[cfg(test)]
mod tests {
    use crate::common::FakeAppclacks;
    use crate::common::fixtures::*;
    use appclacks_provider::client::HealthcheckApi;
    use appclacks_provider::{HealthcheckType, ResourceError};
    use serde_json::{Value, json};
    use tokio_test::{assert_err, assert_ok};

    fn id_of(state: &Value) -> String {
        state["id"].as_str().expect("state has an id").to_string()
    }

    // ==================== Scenarios ====================

    #[tokio::test]
    async fn test_tcp_lifecycle() {
        let fake = FakeAppclacks::start().await;
        let provider = fake.provider();

        let created = provider.create_resource(TCP, tcp_config()).await.unwrap();
        let id = id_of(&created);
        assert_eq!(created["name"], "tf_acc_tcp");
        assert_eq!(created["target"], "google.com");
        assert_eq!(created["port"], 443);
        assert_eq!(created["interval"], "35s");
        assert_eq!(created["timeout"], "7s");
        assert_eq!(created["enabled"], true);
        assert_eq!(created["should_fail"], false);

        let read = provider
            .read_resource(TCP, created.clone())
            .await
            .unwrap()
            .expect("healthcheck exists");
        assert_eq!(read, created);

        let updated_config = with(&with(&tcp_config(), "target", json!("google.fr")), "port", json!(80));
        let updated = provider
            .update_resource(TCP, &id, updated_config)
            .await
            .unwrap();
        assert_eq!(id_of(&updated), id);
        assert_eq!(updated["target"], "google.fr");
        assert_eq!(updated["port"], 80);
        for unchanged in ["name", "interval", "timeout", "enabled", "should_fail"] {
            assert_eq!(updated[unchanged], created[unchanged], "{unchanged} changed");
        }

        assert_ok!(provider.delete_resource(TCP, updated).await);
        let err = fake.client().get_healthcheck(&id).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(fake.is_empty());
    }

    #[tokio::test]
    async fn test_http_valid_status_is_a_set() {
        let fake = FakeAppclacks::start().await;
        let provider = fake.provider();

        let created = provider.create_resource(HTTP, http_config()).await.unwrap();
        assert_eq!(created["valid_status"], json!([200]));
        assert_eq!(created["protocol"], "http");
        assert_eq!(created["path"], "/foo");
        assert_eq!(created["method"], "GET");

        let id = id_of(&created);
        let updated = provider
            .update_resource(
                HTTP,
                &id,
                with(&http_config(), "valid_status", json!([404, 200, 201])),
            )
            .await
            .unwrap();
        assert_eq!(updated["valid_status"], json!([200, 201, 404]));
    }

    #[tokio::test]
    async fn test_dns_tls_and_command_round_trip() {
        let fake = FakeAppclacks::start().await;
        let provider = fake.provider();

        let dns = provider.create_resource(DNS, dns_config()).await.unwrap();
        assert_eq!(dns["expected_ips"], json!(["10.0.0.1", "10.0.0.2"]));
        let stored = fake.get(&id_of(&dns)).unwrap();
        assert_eq!(stored["type"], "dns");
        assert_eq!(stored["domain"], "appclacks.com");

        let tls = provider.create_resource(TLS, tls_config()).await.unwrap();
        assert_eq!(tls["server_name"], "appclacks.com");
        assert_eq!(tls["expiration_delay"], "168h");
        assert_eq!(tls["insecure"], false);
        assert_eq!(tls["key"], Value::Null);
        let stored = fake.get(&id_of(&tls)).unwrap();
        assert_eq!(stored["server-name"], "appclacks.com");

        let command = provider
            .create_resource(COMMAND, command_config())
            .await
            .unwrap();
        assert_eq!(
            command["arguments"],
            json!(["--verbose", "--host", "appclacks.com"])
        );

        assert_eq!(fake.len(), 3);
    }

    // ==================== Edge cases ====================

    #[tokio::test]
    async fn test_removed_out_of_band_drops_from_state() {
        let fake = FakeAppclacks::start().await;
        let provider = fake.provider();

        let created = provider.create_resource(TCP, tcp_config()).await.unwrap();
        assert!(fake.remove(&id_of(&created)));

        let read = provider.read_resource(TCP, created.clone()).await.unwrap();
        assert_eq!(read, None);

        let err = assert_err!(provider.delete_resource(TCP, created).await);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_clearing_description_and_labels() {
        let fake = FakeAppclacks::start().await;
        let provider = fake.provider();

        let config = with(
            &with(&tcp_config(), "description", json!("primary site")),
            "labels",
            json!({"env": "prod"}),
        );
        let created = provider.create_resource(TCP, config).await.unwrap();
        assert_eq!(created["description"], "primary site");
        assert_eq!(created["labels"], json!({"env": "prod"}));

        let updated = provider
            .update_resource(TCP, &id_of(&created), tcp_config())
            .await
            .unwrap();
        assert_eq!(updated["description"], Value::Null);
        assert_eq!(updated["labels"], json!({}));
    }

    #[tokio::test]
    async fn test_import_by_name_and_by_id() {
        let fake = FakeAppclacks::start().await;
        let provider = fake.provider();
        let created = provider.create_resource(TCP, tcp_config()).await.unwrap();

        let by_name = provider.import_resource(TCP, "tf_acc_tcp").await.unwrap();
        let by_id = provider
            .import_resource(TCP, &id_of(&created))
            .await
            .unwrap();
        assert_eq!(by_name["id"], created["id"]);
        assert_eq!(by_name, by_id);

        let err = provider.import_resource(TCP, "missing").await.unwrap_err();
        assert!(matches!(err, ResourceError::ImportNotFound { .. }));
    }

    #[tokio::test]
    async fn test_importing_another_type_is_rejected() {
        let fake = FakeAppclacks::start().await;
        let id = fake.insert(json!({
            "name": "resolver",
            "type": "dns",
            "interval": "60s",
            "timeout": "10s",
            "enabled": true,
            "domain": "appclacks.com"
        }));

        let err = fake
            .provider()
            .import_resource(TCP, &id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ResourceError::InvalidDefinition {
                expected: HealthcheckType::Tcp,
                actual: HealthcheckType::Dns
            }
        ));
    }

    #[tokio::test]
    async fn test_validation_failure_sends_no_request() {
        let fake = FakeAppclacks::start().await;
        let provider = fake.provider();

        let config = with(&command_config(), "command", json!("x".repeat(513)));
        let err = provider.create_resource(COMMAND, config).await.unwrap_err();
        assert!(matches!(err, ResourceError::Validation(_)));

        let requests = fake.server.received_requests().await.unwrap_or_default();
        assert!(requests.is_empty());
        assert!(fake.is_empty());
    }
}
