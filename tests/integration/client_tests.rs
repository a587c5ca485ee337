//! API client integration tests

#[cfg(test)]
mod tests {
    use crate::common::FakeAppclacks;
    use appclacks_provider::client::{
        AppclacksClient, ClientConfig, ClientConfigBuilder, ClientError, HealthcheckApi,
    };
    use appclacks_provider::types::*;
    use std::collections::BTreeMap;

    fn tcp_input(name: &str) -> CreateHealthcheckInput {
        CreateHealthcheckInput {
            name: name.to_string(),
            description: Some("created by the client tests".to_string()),
            labels: BTreeMap::from([("suite".to_string(), "client".to_string())]),
            interval: "60s".to_string(),
            timeout: "10s".to_string(),
            enabled: false,
            definition: TcpDefinition {
                target: "appclacks.com".to_string(),
                port: 443,
                should_fail: true,
            }
            .into(),
        }
    }

    #[tokio::test]
    async fn test_create_get_list_delete() {
        let fake = FakeAppclacks::start().await;
        let client = fake.client();

        let created = client.create_healthcheck(tcp_input("web-1")).await.unwrap();
        client.create_healthcheck(tcp_input("web-2")).await.unwrap();
        client.create_healthcheck(tcp_input("db-1")).await.unwrap();

        assert_eq!(created.kind(), HealthcheckType::Tcp);
        assert!(!created.enabled);
        assert!(created.created_at.is_some());
        assert_eq!(created.labels.get("suite").map(String::as_str), Some("client"));

        let by_name = client.get_healthcheck("web-1").await.unwrap();
        assert_eq!(by_name, created);

        let listed = client
            .list_healthchecks(ListHealthchecksInput {
                name_pattern: Some("^web-".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(listed.result.len(), 2);

        let all = client
            .list_healthchecks(ListHealthchecksInput::default())
            .await
            .unwrap();
        assert_eq!(all.result.len(), 3);

        let response = client.delete_healthcheck(&created.id).await.unwrap();
        assert_eq!(response.messages, vec!["Healthcheck deleted".to_string()]);
        assert!(client.get_healthcheck(&created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_with_partial_patch() {
        let fake = FakeAppclacks::start().await;
        let client = fake.client();
        let created = client.create_healthcheck(tcp_input("web")).await.unwrap();

        let patch = HealthcheckPatch {
            enabled: Some(true),
            ..Default::default()
        };
        let updated = client
            .update_healthcheck(
                &created.id,
                UpdateHealthcheckInput::new(
                    patch,
                    TcpDefinition {
                        target: "appclacks.fr".to_string(),
                        port: 8443,
                        should_fail: false,
                    },
                ),
            )
            .await
            .unwrap();

        assert!(updated.enabled);
        assert_eq!(updated.name, "web");
        assert_eq!(updated.description, created.description);
        assert_eq!(
            updated.definition,
            HealthcheckDefinition::Tcp(TcpDefinition {
                target: "appclacks.fr".to_string(),
                port: 8443,
                should_fail: false,
            })
        );
    }

    #[tokio::test]
    async fn test_update_with_another_type_is_rejected() {
        let fake = FakeAppclacks::start().await;
        let client = fake.client();
        let created = client.create_healthcheck(tcp_input("web")).await.unwrap();

        let err = client
            .update_healthcheck(
                &created.id,
                UpdateHealthcheckInput::new(
                    HealthcheckPatch::default(),
                    DnsDefinition {
                        domain: "appclacks.com".to_string(),
                        expected_ips: vec![],
                    },
                ),
            )
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_wrong_token_is_an_api_error() {
        let fake = FakeAppclacks::start().await;
        let config = ClientConfigBuilder::from_config(ClientConfig::from_env_with(|_| None))
            .endpoint(fake.uri())
            .token("org", "wrong")
            .build()
            .unwrap();
        let client = AppclacksClient::new(config).unwrap();

        let err = client.get_healthcheck("anything").await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 401, .. }));
        assert!(err.to_string().starts_with("the API returned an error: status 401\n"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_transport_error() {
        let config = ClientConfigBuilder::new()
            .endpoint("http://127.0.0.1:1")
            .token("org", "tok")
            .build()
            .unwrap();
        let client = AppclacksClient::new(config).unwrap();

        let err = client.get_healthcheck("anything").await.unwrap_err();
        assert!(err.is_transport());
        assert!(!err.is_not_found());
    }
}
