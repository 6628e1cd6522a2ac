//! Federation lifecycle endpoints.

use reqwest::Client;

use crate::endpoints::encode_path_segment;
use crate::endpoints::send_request_with_retry;
use crate::error::Result;
use crate::models::{FederationConfig, InviteRequest, JoinRequest, SyncStat};

/// Create a new federation.
///
/// The response payload is backend-defined; it is returned as opaque JSON.
pub async fn create_federation(
    client: &Client,
    base_url: &str,
    config: &FederationConfig,
    max_retries: usize,
) -> Result<serde_json::Value> {
    let url = format!("{}/fed/create", base_url);

    let builder = client.post(&url).json(config);
    let response = send_request_with_retry(builder, max_retries, "/fed/create", "POST").await?;

    Ok(response.json().await?)
}

/// Generate an invitation payload for a federation.
///
/// The returned JSON is the opaque invite blob; callers display and
/// forward it without interpreting its contents.
pub async fn generate_invite(
    client: &Client,
    base_url: &str,
    pid: &str,
    password: &str,
    max_retries: usize,
) -> Result<serde_json::Value> {
    let encoded_pid = encode_path_segment(pid);
    let path = format!("/fed/{}/invite", encoded_pid);
    let url = format!("{}{}", base_url, path);

    let body = InviteRequest {
        password: password.to_string(),
    };

    let builder = client.post(&url).json(&body);
    let response = send_request_with_retry(builder, max_retries, &path, "POST").await?;

    Ok(response.json().await?)
}

/// Join an existing federation using an invite payload.
pub async fn join_federation(
    client: &Client,
    base_url: &str,
    request: &JoinRequest,
    max_retries: usize,
) -> Result<serde_json::Value> {
    let url = format!("{}/fed/join", base_url);

    let builder = client.post(&url).json(request);
    let response = send_request_with_retry(builder, max_retries, "/fed/join", "POST").await?;

    Ok(response.json().await?)
}

/// Enable periodic peer synchronization for a federation.
pub async fn start_pulsing(
    client: &Client,
    base_url: &str,
    pid: &str,
    max_retries: usize,
) -> Result<()> {
    let encoded_pid = encode_path_segment(pid);
    let path = format!("/fed/{}/startPulsing", encoded_pid);
    let url = format!("{}{}", base_url, path);

    let builder = client.get(&url);
    let _response = send_request_with_retry(builder, max_retries, &path, "GET").await?;

    Ok(())
}

/// Disable periodic peer synchronization for a federation.
pub async fn stop_pulsing(
    client: &Client,
    base_url: &str,
    pid: &str,
    max_retries: usize,
) -> Result<()> {
    let encoded_pid = encode_path_segment(pid);
    let path = format!("/fed/{}/stopPulsing", encoded_pid);
    let url = format!("{}{}", base_url, path);

    let builder = client.get(&url);
    let _response = send_request_with_retry(builder, max_retries, &path, "GET").await?;

    Ok(())
}

/// Fetch the latest synchronization statistics for a federation.
pub async fn get_sync_stats(
    client: &Client,
    base_url: &str,
    pid: &str,
    max_retries: usize,
) -> Result<Vec<SyncStat>> {
    let encoded_pid = encode_path_segment(pid);
    let path = format!("/fed/{}/syncStats", encoded_pid);
    let url = format!("{}{}", base_url, path);

    let builder = client.get(&url);
    let response = send_request_with_retry(builder, max_retries, &path, "GET").await?;

    Ok(response.json().await?)
}
