//! Resource configurations shared by the lifecycle tests

use serde_json::{Value, json};

pub const TCP: &str = "appclacks_healthcheck_tcp";
pub const TLS: &str = "appclacks_healthcheck_tls";
pub const HTTP: &str = "appclacks_healthcheck_http";
pub const DNS: &str = "appclacks_healthcheck_dns";
pub const COMMAND: &str = "appclacks_healthcheck_command";

pub fn tcp_config() -> Value {
    json!({
        "name": "tf_acc_tcp",
        "target": "google.com",
        "port": 443,
        "interval": "35s",
        "timeout": "7s"
    })
}

pub fn http_config() -> Value {
    json!({
        "name": "tf_acc_http",
        "target": "appclacks.com",
        "port": 80,
        "valid_status": [200],
        "protocol": "http",
        "path": "/foo"
    })
}

pub fn dns_config() -> Value {
    json!({
        "name": "tf_acc_dns",
        "domain": "appclacks.com",
        "expected_ips": ["10.0.0.2", "10.0.0.1"]
    })
}

pub fn tls_config() -> Value {
    json!({
        "name": "tf_acc_tls",
        "target": "appclacks.com",
        "port": 443,
        "server_name": "appclacks.com",
        "expiration_delay": "168h"
    })
}

pub fn command_config() -> Value {
    json!({
        "name": "tf_acc_command",
        "command": "check.sh",
        "arguments": ["--verbose", "--host", "appclacks.com"]
    })
}

/// Copy of `config` with `key` replaced
pub fn with(config: &Value, key: &str, value: Value) -> Value {
    let mut config = config.clone();
    config[key] = value;
    config
}
