use reqwest::Client;
use tracing::{instrument, Level};
use url::Url;

use crate::error::{Error, Result};

pub fn make_client() -> Client {
    Client::builder()
        .gzip(true)
        .build()
        .expect("client creation should succeed")
}

/// Fetches the station index page. One GET, no retries; any non-2xx status
/// is a fetch error.
#[instrument(skip(client), level = Level::DEBUG)]
pub async fn index_page(client: &Client, base_url: &Url) -> Result<String> {
    let response = client.get(base_url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Fetch {
            url: base_url.clone(),
            status,
        });
    }
    Ok(response.text().await?)
}
