#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod error;
mod fetch;
mod parse;
mod render;
mod scrape;
mod workbook;

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use tokio::time::sleep;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::render::{Renderer, WebDriver};
use crate::workbook::Workbook;

pub use error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://m.cafcp.org";
const DEFAULT_WORKBOOK: &str = "soss_data.xlsx";
const DEFAULT_WEBDRIVER: &str = "http://localhost:9515";

/// Pause between cycles. A cycle's own duration is not counted against it,
/// so the real period grows with station count and page latency.
const CYCLE_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base_url: Url = env::var("SOSS_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
        .parse()
        .map_err(parse::Error::from)?;
    let workbook_path =
        PathBuf::from(env::var("SOSS_WORKBOOK").unwrap_or_else(|_| DEFAULT_WORKBOOK.to_string()));
    let webdriver_url =
        env::var("SOSS_WEBDRIVER").unwrap_or_else(|_| DEFAULT_WEBDRIVER.to_string());

    if !workbook_path.exists() {
        Workbook::empty().save(&workbook_path)?;
        info!(path = %workbook_path.display(), "created empty workbook");
    }

    let client = fetch::make_client();
    let mut renderer = WebDriver::connect(&webdriver_url).await?;
    info!(%base_url, "starting scrape loop");

    tokio::select! {
        () = scrape_loop(&client, &mut renderer, &base_url, &workbook_path) => {}
        _ = tokio::signal::ctrl_c() => info!("received ctrl-c, shutting down"),
    }

    renderer.close().await?;
    Ok(())
}

async fn scrape_loop<R: Renderer>(
    client: &reqwest::Client,
    renderer: &mut R,
    base_url: &Url,
    workbook_path: &Path,
) {
    loop {
        match run_cycle(client, renderer, base_url).await {
            Ok(cycle) if cycle.is_empty() => {
                warn!("no stations found on the index page, skipping merge");
            }
            Ok(cycle) => match workbook::merge(workbook_path, &cycle) {
                Ok(()) => info!(stations = cycle.records().len(), "cycle merged into workbook"),
                Err(e) => warn!("workbook merge failed: {e}"),
            },
            // a failed scrape has no usable records, so the merge is skipped
            // rather than writing a stale column
            Err(e) => warn!("scrape cycle failed: {e}"),
        }
        sleep(CYCLE_INTERVAL).await;
    }
}

async fn run_cycle<R: Renderer>(
    client: &reqwest::Client,
    renderer: &mut R,
    base_url: &Url,
) -> Result<scrape::ScrapeCycle> {
    let index_html = fetch::index_page(client, base_url).await?;
    scrape::scrape_all(&index_html, base_url, renderer).await
}
