use std::slice::Iter;

use url::Url;

use crate::parse::error::Result;
use crate::selector;

use super::station_meta::StationMeta;

/// Every station listed on the index page, retail rows first, then legacy
/// (nonretail) rows, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stations {
    stations: Vec<StationMeta>,
}

impl Stations {
    pub fn from_html_element(element: scraper::ElementRef, base: &Url) -> Result<Self> {
        selector!(RETAIL_SELECTOR <- "tr.retail");
        selector!(NONRETAIL_SELECTOR <- "tr.nonretail");

        let mut stations = Vec::new();
        for row in element.select(&RETAIL_SELECTOR) {
            stations.push(StationMeta::from_row(row, base, false)?);
        }
        for row in element.select(&NONRETAIL_SELECTOR) {
            stations.push(StationMeta::from_row(row, base, true)?);
        }

        Ok(Self { stations })
    }

    pub fn iter(&self) -> Iter<'_, StationMeta> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
