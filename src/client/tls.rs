//! TLS material loading for the API client

use super::config::TlsConfig;
use super::errors::{ClientError, Result};
use reqwest::{Certificate, ClientBuilder, Identity};
use std::path::Path;
use tracing::debug;

const PEM_CERTIFICATE_MARKER: &str = "-----BEGIN CERTIFICATE-----";

/// Apply client identity, extra root CA and verification mode to `builder`
pub(crate) fn apply_tls(mut builder: ClientBuilder, tls: &TlsConfig) -> Result<ClientBuilder> {
    if !tls.is_enabled() {
        return Ok(builder);
    }
    builder = builder.use_rustls_tls();

    match (&tls.cert, &tls.key) {
        (Some(cert), Some(key)) => {
            builder = builder.identity(load_identity(cert, key)?);
        }
        (None, None) => {}
        _ => {
            return Err(ClientError::Config(
                "TLS key and certificate must be configured together".to_string(),
            ));
        }
    }

    if let Some(cacert) = &tls.cacert {
        builder = builder.add_root_certificate(load_ca_certificate(cacert)?);
    }

    if tls.insecure {
        debug!("TLS certificate verification disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }

    Ok(builder)
}

fn load_identity(cert_path: &Path, key_path: &Path) -> Result<Identity> {
    let mut pem = read_pem(cert_path, "fail to load certificates")?;
    pem.push(b'\n');
    pem.extend(read_pem(key_path, "fail to load certificates")?);

    Identity::from_pem(&pem)
        .map_err(|e| ClientError::Config(format!("fail to load certificates: {}", e)))
}

fn load_ca_certificate(path: &Path) -> Result<Certificate> {
    let pem = read_pem(path, "fail to load ca certificate")?;
    let parseable = std::str::from_utf8(&pem)
        .map(|text| text.contains(PEM_CERTIFICATE_MARKER))
        .unwrap_or(false);
    if !parseable {
        return Err(ClientError::Config(format!(
            "fail to read ca certificate on {}",
            path.display()
        )));
    }

    Certificate::from_pem(&pem).map_err(|e| {
        ClientError::Config(format!(
            "fail to read ca certificate on {}: {}",
            path.display(),
            e
        ))
    })
}

fn read_pem(path: &Path, context: &str) -> Result<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| ClientError::Config(format!("{} ({}): {}", context, path.display(), e)))
}
