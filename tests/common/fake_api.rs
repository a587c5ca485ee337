//! Stateful in-memory Appclacks API
//!
//! Serves the healthcheck endpoints from a map guarded by a mutex, so a
//! full create/read/update/delete sequence can run through the real client.

use appclacks_provider::client::{AppclacksClient, ClientConfigBuilder};
use appclacks_provider::Provider;
use regex::Regex;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use wiremock::matchers::path_regex;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const ORGANIZATION_ID: &str = "org-test";
pub const TOKEN: &str = "token-test";

/// Keys every healthcheck carries regardless of its type
const ENVELOPE_KEYS: [&str; 9] = [
    "id",
    "name",
    "description",
    "type",
    "labels",
    "interval",
    "timeout",
    "enabled",
    "created-at",
];

#[derive(Default)]
struct Store {
    healthchecks: BTreeMap<String, Map<String, Value>>,
    next_id: u64,
}

#[derive(Clone)]
struct Responder {
    store: Arc<Mutex<Store>>,
}

/// Fake API server plus a handle on its state
pub struct FakeAppclacks {
    pub server: MockServer,
    store: Arc<Mutex<Store>>,
}

impl FakeAppclacks {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(Mutex::new(Store::default()));
        Mock::given(path_regex("^/api/v1/healthcheck"))
            .respond_with(Responder {
                store: Arc::clone(&store),
            })
            .mount(&server)
            .await;
        Self { server, store }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Client authenticated with the test token
    pub fn client(&self) -> AppclacksClient {
        let config = ClientConfigBuilder::new()
            .endpoint(self.uri())
            .token(ORGANIZATION_ID, TOKEN)
            .build()
            .expect("valid client config");
        AppclacksClient::new(config).expect("client")
    }

    /// Provider configured against this server, ignoring the process
    /// environment
    pub fn provider(&self) -> Provider {
        let mut provider = Provider::new();
        provider
            .configure_with_env(
                json!({
                    "api_url": self.uri(),
                    "organization_id": ORGANIZATION_ID,
                    "token": TOKEN
                }),
                |_| None,
            )
            .expect("provider configuration");
        provider
    }

    /// Store a healthcheck directly, bypassing the API
    pub fn insert(&self, healthcheck: Value) -> String {
        let mut store = lock(&self.store);
        let mut object = healthcheck.as_object().cloned().unwrap_or_default();
        let id = store.assign_id();
        object.insert("id".to_string(), json!(id));
        store.healthchecks.insert(id.clone(), object);
        id
    }

    /// Delete a healthcheck behind the provider's back
    pub fn remove(&self, id: &str) -> bool {
        lock(&self.store).healthchecks.remove(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<Value> {
        lock(&self.store)
            .healthchecks
            .get(id)
            .cloned()
            .map(Value::Object)
    }

    pub fn len(&self) -> usize {
        lock(&self.store).healthchecks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock(store: &Mutex<Store>) -> MutexGuard<'_, Store> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Store {
    fn assign_id(&mut self) -> String {
        self.next_id += 1;
        format!("00000000-0000-4000-8000-{:012}", self.next_id)
    }

    fn find(&self, identifier: &str) -> Option<&Map<String, Value>> {
        self.healthchecks.get(identifier).or_else(|| {
            self.healthchecks
                .values()
                .find(|h| h.get("name").and_then(Value::as_str) == Some(identifier))
        })
    }
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({"messages": ["Not found"]}))
}

fn bad_request(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({"messages": [message]}))
}

impl Respond for Responder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let authorized = request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some(&format!("Bearer {}", TOKEN)[..]);
        if !authorized {
            return ResponseTemplate::new(401).set_body_json(json!({"messages": ["Unauthorized"]}));
        }

        let segments: Vec<String> = request
            .url
            .path_segments()
            .map(|s| s.map(str::to_string).collect())
            .unwrap_or_default();
        let rest: Vec<&str> = segments.iter().skip(3).map(String::as_str).collect();
        let mut store = lock(&self.store);

        match (request.method.as_str(), rest.as_slice()) {
            ("GET", []) => {
                let pattern = request
                    .url
                    .query_pairs()
                    .find(|(k, _)| k == "name-pattern")
                    .and_then(|(_, v)| Regex::new(&v).ok());
                let result: Vec<Value> = store
                    .healthchecks
                    .values()
                    .filter(|h| match &pattern {
                        Some(re) => h
                            .get("name")
                            .and_then(Value::as_str)
                            .is_some_and(|name| re.is_match(name)),
                        None => true,
                    })
                    .cloned()
                    .map(Value::Object)
                    .collect();
                ResponseTemplate::new(200).set_body_json(json!({ "result": result }))
            }
            ("GET", [identifier]) => match store.find(identifier) {
                Some(healthcheck) => ResponseTemplate::new(200).set_body_json(healthcheck),
                None => not_found(),
            },
            ("POST", [kind]) => {
                let Ok(Value::Object(mut body)) = serde_json::from_slice::<Value>(&request.body)
                else {
                    return bad_request("invalid body");
                };
                if body.get("name").and_then(Value::as_str).is_none_or(str::is_empty) {
                    return bad_request("name is mandatory");
                }
                let id = store.assign_id();
                body.insert("id".to_string(), json!(id));
                body.insert("type".to_string(), json!(kind));
                body.insert("created-at".to_string(), json!("2023-03-14T15:09:26Z"));
                store.healthchecks.insert(id, body.clone());
                ResponseTemplate::new(200).set_body_json(body)
            }
            ("PUT", [kind, id]) => {
                let Ok(Value::Object(body)) = serde_json::from_slice::<Value>(&request.body) else {
                    return bad_request("invalid body");
                };
                let Some(existing) = store.healthchecks.get_mut(*id) else {
                    return not_found();
                };
                if existing.get("type").and_then(Value::as_str) != Some(*kind) {
                    return bad_request("healthcheck type mismatch");
                }
                // The definition is replaced wholesale, envelope fields only when sent
                existing.retain(|key, _| ENVELOPE_KEYS.contains(&key.as_str()));
                for (key, value) in body {
                    if key != "id" && key != "type" && key != "created-at" {
                        existing.insert(key, value);
                    }
                }
                if existing.get("description").and_then(Value::as_str) == Some("") {
                    existing.remove("description");
                }
                ResponseTemplate::new(200).set_body_json(existing.clone())
            }
            ("DELETE", [id]) => match store.healthchecks.remove(*id) {
                Some(_) => ResponseTemplate::new(200)
                    .set_body_json(json!({"messages": ["Healthcheck deleted"]})),
                None => not_found(),
            },
            _ => ResponseTemplate::new(405),
        }
    }
}
