//! Periodic self-ping for hosts that put idle services to sleep.

use std::time::Duration;

use reqwest::StatusCode;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::{PokedexError, Result};

pub async fn ping(client: &reqwest::Client, url: &str) -> Result<StatusCode> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| PokedexError::upstream(err.to_string()))?;
    Ok(response.status())
}

/// Pings `url` every `period` until the returned handle is aborted. The
/// first ping happens one period after start.
pub fn spawn(client: reqwest::Client, url: String, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match ping(&client, &url).await {
                Ok(status) if status.is_success() => {
                    tracing::info!(%url, "keep-alive ping sent");
                }
                Ok(status) => {
                    tracing::warn!(%url, status = status.as_u16(), "keep-alive ping failed");
                }
                Err(err) => {
                    tracing::warn!(%url, %err, "keep-alive ping failed");
                }
            }
        }
    })
}
