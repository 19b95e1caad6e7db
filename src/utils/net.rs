// Network pre-flight checks

use reqwest::Url;
use tracing::{debug, warn};

use crate::types::{AppError, AppResult};

/// Resolve the host of `endpoint` without connecting.
pub async fn resolve_endpoint_host(endpoint: &str) -> AppResult<()> {
    let url = Url::parse(endpoint)
        .map_err(|e| AppError::Configuration(format!("invalid endpoint {}: {}", endpoint, e)))?;
    let host = url
        .host_str()
        .ok_or_else(|| AppError::Configuration(format!("endpoint without host: {}", endpoint)))?;
    let port = url.port_or_known_default().unwrap_or(443);

    let result = match tokio::net::lookup_host((host, port)).await {
        Ok(mut addrs) => match addrs.next() {
            Some(addr) => {
                debug!(host, addr = %addr, "DNS resolution succeeded");
                Ok(())
            }
            None => Err(AppError::Transport(format!("DNS returned no address for {}", host))),
        },
        Err(e) => {
            warn!(host, error = %e, "DNS resolution failed");
            Err(AppError::Transport(format!("DNS resolution failed for {}: {}", host, e)))
        }
    };
    result
}
