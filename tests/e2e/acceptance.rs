//! Acceptance tests
//!
//! Run with `cargo test -- --ignored` and `APPCLACKS_ORGANIZATION_ID`,
//! `APPCLACKS_TOKEN` (and optionally `APPCLACKS_API_URL`) set.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::*;
    use crate::skip_without_env;
    use appclacks_provider::Provider;
    use serde_json::json;

    fn provider() -> Provider {
        let _ = dotenvy::dotenv();
        let mut provider = Provider::new();
        provider
            .configure(json!({}))
            .expect("provider configured from the environment");
        provider
    }

    #[tokio::test]
    #[ignore]
    async fn test_tcp_acceptance() {
        skip_without_env!("APPCLACKS_TOKEN");
        let provider = provider();

        let created = provider.create_resource(TCP, tcp_config()).await.unwrap();
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["enabled"], true);

        let updated = provider
            .update_resource(
                TCP,
                &id,
                with(&with(&tcp_config(), "target", json!("google.fr")), "port", json!(80)),
            )
            .await
            .unwrap();
        assert_eq!(updated["target"], "google.fr");
        assert_eq!(updated["port"], 80);

        provider.delete_resource(TCP, updated).await.unwrap();
        let gone = provider.read_resource(TCP, created).await.unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    #[ignore]
    async fn test_http_acceptance() {
        skip_without_env!("APPCLACKS_TOKEN");
        let provider = provider();

        let created = provider.create_resource(HTTP, http_config()).await.unwrap();
        assert_eq!(created["valid_status"], json!([200]));
        assert_eq!(created["protocol"], "http");
        assert_eq!(created["path"], "/foo");

        provider.delete_resource(HTTP, created).await.unwrap();
    }
}
