//! Generic request helpers every endpoint namespace delegates to.

use log::{debug, trace};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, RawResponse, RequestConfig};
use crate::transport::Transport;

/// Issue one transport call and return the response unmodified.
///
/// Status codes are left to the caller.
pub async fn request<T>(
    transport: &T,
    uri: &str,
    config: Option<&RequestConfig>,
) -> Result<RawResponse, ApiError>
where
    T: Transport + ?Sized,
{
    let method = config.map_or(HttpMethod::Get, |c| c.method);
    debug!("{} {uri}", method.as_str());

    let response = transport.fetch(uri, config).await?;
    trace!("{} {uri} -> {}", method.as_str(), response.status);
    Ok(response)
}

/// Issue one transport call and parse the body as JSON.
///
/// The status code is deliberately not inspected: a 4xx/5xx with a JSON
/// body resolves to that body. Only a non-JSON body is a `Parse` error.
pub async fn request_with_json_data<R, T>(
    transport: &T,
    uri: &str,
    config: Option<&RequestConfig>,
) -> Result<R, ApiError>
where
    R: DeserializeOwned,
    T: Transport + ?Sized,
{
    request(transport, uri, config).await?.json()
}
