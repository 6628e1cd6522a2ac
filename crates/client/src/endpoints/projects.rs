//! Analysis project endpoints.

use reqwest::Client;

use crate::endpoints::encode_path_segment;
use crate::endpoints::send_request_with_retry;
use crate::error::Result;
use crate::models::{CreateProjectParams, ExploreMetric, ExploreRequest};

/// Create an analysis project.
pub async fn create_project(
    client: &Client,
    base_url: &str,
    params: &CreateProjectParams,
    max_retries: usize,
) -> Result<serde_json::Value> {
    let url = format!("{}/projects", base_url);

    let builder = client.post(&url).json(params);
    let response = send_request_with_retry(builder, max_retries, "/projects", "POST").await?;

    Ok(response.json().await?)
}

/// Push raw CSV data into a project.
///
/// The CSV text travels as the request body with `Content-Type: text/csv`;
/// no client-side parsing or validation happens here.
pub async fn push_data(
    client: &Client,
    base_url: &str,
    pid: &str,
    csv_text: String,
    max_retries: usize,
) -> Result<serde_json::Value> {
    let encoded_pid = encode_path_segment(pid);
    let path = format!("/projects/{}/learn", encoded_pid);
    let url = format!("{}{}", base_url, path);

    let builder = client
        .post(&url)
        .header("Content-Type", "text/csv")
        .body(csv_text);
    let response = send_request_with_retry(builder, max_retries, &path, "POST").await?;

    Ok(response.json().await?)
}

/// Run an exploration query against a project.
///
/// The analysis mode travels as the `metric` query parameter; cohort and
/// attribute selection travel in the body.
pub async fn explore(
    client: &Client,
    base_url: &str,
    pid: &str,
    metric: ExploreMetric,
    request: &ExploreRequest,
    max_retries: usize,
) -> Result<serde_json::Value> {
    let encoded_pid = encode_path_segment(pid);
    let path = format!("/projects/{}/explore", encoded_pid);
    let url = format!("{}{}", base_url, path);

    let builder = client
        .post(&url)
        .query(&[("metric", metric.as_str())])
        .json(request);
    let response = send_request_with_retry(builder, max_retries, &path, "POST").await?;

    Ok(response.json().await?)
}
