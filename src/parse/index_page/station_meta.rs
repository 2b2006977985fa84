use url::Url;

use crate::parse::error::Result;
use crate::parse::text::child_text;
use crate::parse::{normalize_whitespace, Error};
use crate::selector;

/// One row of the station index: the station's display name, whether it is a
/// legacy (nonretail) station, and the absolute URL of its detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationMeta {
    name: String,
    legacy: bool,
    url: Url,
}

impl StationMeta {
    /// Builds a station from a `tr.retail` or `tr.nonretail` row. The name
    /// cell holds an anchor to the detail page with the name in a nested
    /// span; hrefs are relative and get resolved against `base`.
    pub(super) fn from_row(row: scraper::ElementRef, base: &Url, legacy: bool) -> Result<Self> {
        selector!(LINK_SELECTOR <- "td.name a");
        selector!(NAME_SELECTOR <- "td.name a span");

        let link = row
            .select(&LINK_SELECTOR)
            .next()
            .ok_or_else(|| Error::html_parse_error("station row has no name link"))?;
        let href = link
            .attr("href")
            .ok_or_else(|| Error::html_parse_error("station link has no href attr"))?;
        let url = base.join(href)?;

        let name = child_text(&NAME_SELECTOR, row, "station row", "name span")?;
        let name = normalize_whitespace(name.trim()).into_owned();

        Ok(Self { name, legacy, url })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn legacy(&self) -> bool {
        self.legacy
    }

    pub const fn url(&self) -> &Url {
        &self.url
    }
}
