use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::{Body, Client};
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("could not build http client")]
    Client(#[source] reqwest::Error),

    #[error("webhook request deadline exceeded")]
    DeadlineExceeded(#[source] reqwest::Error),

    #[error("webhook request failed")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read response body")]
    ResponseRead(#[source] reqwest::Error),
}

pub fn client(timeout: Duration) -> Result<Client, WebhookError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(WebhookError::Client)
}

/// POSTs `body` to `url` once and returns the whole response body.
///
/// The body is sent as `application/json` without looking at it. Any HTTP
/// status counts as delivered; only transport and read failures are errors.
pub fn post(url: &str, client: &Client, body: impl Into<Body>) -> Result<Vec<u8>, WebhookError> {
    let resp = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .map_err(|err| {
            if err.is_timeout() {
                WebhookError::DeadlineExceeded(err)
            } else {
                WebhookError::Transport(err)
            }
        })?;

    let status = resp.status();
    if status.is_success() {
        debug!("webhook responded with status {status}");
    } else {
        warn!("webhook responded with status {status}");
    }

    let bytes = resp.bytes().map_err(|err| {
        if err.is_timeout() {
            WebhookError::DeadlineExceeded(err)
        } else {
            WebhookError::ResponseRead(err)
        }
    })?;

    Ok(bytes.to_vec())
}
