//! Healthcheck endpoints

use super::client::{AppclacksClient, encode_body};
use super::errors::Result;
use crate::types::{
    CreateHealthcheckInput, Healthcheck, ListHealthchecksInput, ListHealthchecksOutput, Response,
    UpdateHealthcheckInput,
};
use async_trait::async_trait;
use reqwest::Method;

const API_PREFIX: [&str; 3] = ["api", "v1", "healthcheck"];

/// Healthcheck operations of the Appclacks API.
///
/// Resource adapters only see this trait, so they can run against a fake.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthcheckApi: Send + Sync {
    /// `POST /api/v1/healthcheck/{type}`
    async fn create_healthcheck(&self, input: CreateHealthcheckInput) -> Result<Healthcheck>;

    /// `PUT /api/v1/healthcheck/{type}/{id}` with the merged flat body
    async fn update_healthcheck(
        &self,
        id: &str,
        input: UpdateHealthcheckInput,
    ) -> Result<Healthcheck>;

    /// `GET /api/v1/healthcheck/{identifier}`; the identifier is a name or an
    /// ID, resolved by the server
    async fn get_healthcheck(&self, identifier: &str) -> Result<Healthcheck>;

    /// `DELETE /api/v1/healthcheck/{id}`
    async fn delete_healthcheck(&self, id: &str) -> Result<Response>;

    /// `GET /api/v1/healthcheck`
    async fn list_healthchecks(&self, input: ListHealthchecksInput)
    -> Result<ListHealthchecksOutput>;
}

#[async_trait]
impl HealthcheckApi for AppclacksClient {
    async fn create_healthcheck(&self, input: CreateHealthcheckInput) -> Result<Healthcheck> {
        let kind = input.kind();
        let body = encode_body(&input)?;
        self.send_request(
            Method::POST,
            &[API_PREFIX[0], API_PREFIX[1], API_PREFIX[2], kind.as_str()],
            Some(body),
            &[],
        )
        .await
    }

    async fn update_healthcheck(
        &self,
        id: &str,
        input: UpdateHealthcheckInput,
    ) -> Result<Healthcheck> {
        let kind = input.kind();
        let body = encode_body(&input)?;
        self.send_request(
            Method::PUT,
            &[API_PREFIX[0], API_PREFIX[1], API_PREFIX[2], kind.as_str(), id],
            Some(body),
            &[],
        )
        .await
    }

    async fn get_healthcheck(&self, identifier: &str) -> Result<Healthcheck> {
        self.send_request(
            Method::GET,
            &[API_PREFIX[0], API_PREFIX[1], API_PREFIX[2], identifier],
            None,
            &[],
        )
        .await
    }

    async fn delete_healthcheck(&self, id: &str) -> Result<Response> {
        self.send_request(
            Method::DELETE,
            &[API_PREFIX[0], API_PREFIX[1], API_PREFIX[2], id],
            None,
            &[],
        )
        .await
    }

    async fn list_healthchecks(
        &self,
        input: ListHealthchecksInput,
    ) -> Result<ListHealthchecksOutput> {
        self.send_request(Method::GET, &API_PREFIX, None, &input.query_params())
            .await
    }
}
