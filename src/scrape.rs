use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Local};
use scraper::Html;
use tokio::time::sleep;
use tracing::{debug, instrument, trace, Level};
use url::Url;

use crate::error::{Error, Result};
use crate::parse::{GradeReading, Stations, StatusReport};
use crate::render::Renderer;

/// How long to wait between reads of the rendered page while its client-side
/// content populates.
pub const RENDER_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// How many reads to attempt before giving up on a station page. Pages that
/// never render a timestamp fail the cycle instead of looping forever.
pub const MAX_RENDER_ATTEMPTS: u32 = 8;

/// One station's readings for one cycle, keyed by station name in the
/// enclosing [`ScrapeCycle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    legacy: bool,
    report: StatusReport,
}

impl StationRecord {
    pub(crate) const fn new(legacy: bool, report: StatusReport) -> Self {
        Self { legacy, report }
    }

    pub const fn legacy(&self) -> bool {
        self.legacy
    }

    pub fn date(&self) -> &str {
        self.report.date()
    }

    pub fn time(&self) -> &str {
        self.report.time()
    }

    pub fn alert(&self) -> Option<&str> {
        self.report.alert()
    }

    pub fn h35_status(&self) -> Option<&str> {
        self.report.h35().map(GradeReading::status)
    }

    pub fn h35_inventory(&self) -> Option<&str> {
        self.report.h35().map(GradeReading::inventory)
    }

    pub fn h70_status(&self) -> Option<&str> {
        self.report.h70().map(GradeReading::status)
    }

    pub fn h70_inventory(&self) -> Option<&str> {
        self.report.h70().map(GradeReading::inventory)
    }
}

/// The full output of one fetch-and-scrape pass, stamped with the moment the
/// pass started. Lives only until it has been merged into the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeCycle {
    started_at: DateTime<Local>,
    records: BTreeMap<String, StationRecord>,
}

impl ScrapeCycle {
    pub(crate) const fn new(
        started_at: DateTime<Local>,
        records: BTreeMap<String, StationRecord>,
    ) -> Self {
        Self {
            started_at,
            records,
        }
    }

    pub const fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub const fn records(&self) -> &BTreeMap<String, StationRecord> {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Scrapes every station listed on the index page, sequentially, through the
/// one shared renderer. Any structural failure on any page aborts the whole
/// cycle; missing optional sections do not.
#[instrument(skip_all, level = Level::DEBUG)]
pub async fn scrape_all<R: Renderer>(
    index_html: &str,
    base_url: &Url,
    renderer: &mut R,
) -> Result<ScrapeCycle> {
    let started_at = Local::now();
    let stations = {
        let document = Html::parse_document(index_html);
        Stations::from_html_element(document.root_element(), base_url)?
    };
    debug!(count = stations.len(), "parsed station index");

    let mut records = BTreeMap::new();
    for station in stations.iter() {
        let report = station_report(renderer, station.url()).await?;
        trace!(name = station.name(), date = report.date(), time = report.time(), "scraped station");
        records.insert(
            station.name().to_owned(),
            StationRecord::new(station.legacy(), report),
        );
    }

    Ok(ScrapeCycle::new(started_at, records))
}

/// Navigates to a station detail page and polls the rendered source until the
/// update timestamp appears, up to [`MAX_RENDER_ATTEMPTS`] reads.
#[instrument(skip(renderer), fields(url = %url), level = Level::TRACE)]
async fn station_report<R: Renderer>(renderer: &mut R, url: &Url) -> Result<StatusReport> {
    renderer.navigate(url).await?;
    for attempt in 1..=MAX_RENDER_ATTEMPTS {
        sleep(RENDER_POLL_INTERVAL).await;
        let source = renderer.page_source().await?;
        let parsed = {
            let document = Html::parse_document(&source);
            StatusReport::from_html_element(document.root_element())
        };
        match parsed {
            Ok(report) => return Ok(report),
            Err(e) if e.is_pending() => {
                trace!(attempt, "station page still rendering: {e}");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(Error::RenderTimeout {
        url: url.clone(),
        attempts: MAX_RENDER_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderError;
    use async_trait::async_trait;
    use std::fs;

    /// Scripted renderer: serves one canned page source per read, repeating
    /// the last one once the script runs out.
    struct FakeRenderer {
        pages: Vec<String>,
        navigations: usize,
        reads: usize,
    }

    impl FakeRenderer {
        fn from_files(names: &[&str]) -> Self {
            let pages = names
                .iter()
                .map(|n| {
                    fs::read_to_string(format!("./src/parse/html_examples/station_page/{n}"))
                        .unwrap()
                })
                .collect();
            Self {
                pages,
                navigations: 0,
                reads: 0,
            }
        }
    }

    #[async_trait]
    impl Renderer for FakeRenderer {
        async fn navigate(&mut self, _url: &Url) -> std::result::Result<(), RenderError> {
            self.navigations += 1;
            Ok(())
        }

        async fn page_source(&mut self) -> std::result::Result<String, RenderError> {
            let index = self.reads.min(self.pages.len() - 1);
            self.reads += 1;
            Ok(self.pages[index].clone())
        }
    }

    fn index_html() -> String {
        fs::read_to_string("./src/parse/html_examples/index_page/stations.html").unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_scrape_all_legacy_flags_and_grades() {
        let base: Url = "https://m.cafcp.org".parse().unwrap();
        let mut renderer = FakeRenderer::from_files(&["h35_only.html"]);

        let cycle = scrape_all(&index_html(), &base, &mut renderer).await.unwrap();

        assert_eq!(cycle.records().len(), 3);
        assert_eq!(renderer.navigations, 3);

        let a = &cycle.records()["Station A"];
        assert!(!a.legacy());
        assert_eq!(a.h35_status(), Some("Open"));
        assert_eq!(a.h70_status(), None);
        assert_eq!(a.h70_inventory(), None);
        assert_eq!(a.date(), "6/15/2022");
        assert_eq!(a.time(), "2:34PM");
        assert_eq!(a.alert(), None);

        let b = &cycle.records()["Station B"];
        assert!(b.legacy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_timestamp_polls_again() {
        let mut renderer = FakeRenderer::from_files(&["unloaded.html", "complete.html"]);
        let url: Url = "https://m.cafcp.org/stations/station-a".parse().unwrap();

        let report = station_report(&mut renderer, &url).await.unwrap();

        // one navigation, one extra read after the pending first pass
        assert_eq!(renderer.navigations, 1);
        assert_eq!(renderer.reads, 2);
        assert_eq!(report.date(), "6/15/2022");
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_rendering_page_times_out() {
        let mut renderer = FakeRenderer::from_files(&["unloaded.html"]);
        let url: Url = "https://m.cafcp.org/stations/station-a".parse().unwrap();

        let err = station_report(&mut renderer, &url).await.unwrap_err();

        assert_eq!(renderer.reads as u32, MAX_RENDER_ATTEMPTS);
        assert!(matches!(err, Error::RenderTimeout { attempts, .. } if attempts == MAX_RENDER_ATTEMPTS));
    }

    #[tokio::test(start_paused = true)]
    async fn test_structural_error_fails_fast() {
        let mut renderer = FakeRenderer::from_files(&["no_pump_status.html"]);
        let url: Url = "https://m.cafcp.org/stations/station-a".parse().unwrap();

        let err = station_report(&mut renderer, &url).await.unwrap_err();

        assert_eq!(renderer.reads, 1);
        assert!(matches!(err, Error::Parse(_)));
    }
}
