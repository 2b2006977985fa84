use async_trait::async_trait;
use fantoccini::ClientBuilder;
use thiserror::Error as ThisError;
use url::Url;

#[derive(Debug, ThisError)]
pub enum RenderError {
    #[error("webdriver session could not be established: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),
    #[error("webdriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),
}

/// Something that can load a page in a real browser and hand back the DOM as
/// it currently stands, after client-side scripts have run. The station
/// detail pages fill in their status blocks from script, so a plain GET is
/// not enough for them.
#[async_trait]
pub trait Renderer {
    async fn navigate(&mut self, url: &Url) -> Result<(), RenderError>;
    async fn page_source(&mut self) -> Result<String, RenderError>;
}

/// Renderer backed by a WebDriver session (chromedriver or geckodriver).
/// One session is reused serially for every station across every cycle.
pub struct WebDriver {
    client: fantoccini::Client,
}

impl WebDriver {
    pub async fn connect(webdriver_url: &str) -> Result<Self, RenderError> {
        let client = ClientBuilder::native().connect(webdriver_url).await?;
        // keep the browser window out of the operator's way
        if let Err(e) = client.minimize_window().await {
            tracing::debug!("could not minimize browser window: {e}");
        }
        Ok(Self { client })
    }

    pub async fn close(self) -> Result<(), RenderError> {
        self.client.close().await?;
        Ok(())
    }
}

#[async_trait]
impl Renderer for WebDriver {
    async fn navigate(&mut self, url: &Url) -> Result<(), RenderError> {
        self.client.goto(url.as_str()).await?;
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, RenderError> {
        Ok(self.client.source().await?)
    }
}
