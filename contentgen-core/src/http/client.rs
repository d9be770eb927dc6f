//! HTTP client construction using reqwest

use crate::providers::{GeneratorError, GeneratorResult};
use reqwest::{Client, ClientBuilder, Proxy};
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Build the client an adapter owns for its whole session.
///
/// No overall request timeout is set; streams stay open while the backend
/// keeps sending.
pub fn build_client(proxy: Option<&str>, user_agent: Option<&str>) -> GeneratorResult<Client> {
    let mut builder = ClientBuilder::new()
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .gzip(true);

    if let Some(user_agent) = user_agent {
        builder = builder.user_agent(user_agent);
    }

    if let Some(proxy) = proxy {
        debug!(proxy, "routing provider traffic through proxy");
        let proxy = Proxy::all(proxy)
            .map_err(|e| GeneratorError::Configuration(format!("Invalid proxy '{proxy}': {e}")))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| GeneratorError::Configuration(format!("Failed to create HTTP client: {e}")))
}
