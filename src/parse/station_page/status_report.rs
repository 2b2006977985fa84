use scraper::ElementRef;

use crate::parse::error::Result;
use crate::parse::text::inner_text;
use crate::parse::{normalize_whitespace, Error};
use crate::selector;

use super::grade::{Grade, GradeReading};

/// Everything extracted from one station detail page after its client-side
/// content has rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    date: String,
    time: String,
    alert: Option<String>,
    h35: Option<GradeReading>,
    h70: Option<GradeReading>,
}

impl StatusReport {
    /// Extracts a report from the rendered page. A missing `pump-status`
    /// wrapper or `last-update` element is a structural error; a present but
    /// still-empty timestamp is `TimestampPending`, which callers treat as
    /// "read the rendered source again". The alert and grade blocks are
    /// optional and never produce errors by their absence.
    pub fn from_html_element(element: ElementRef) -> Result<Self> {
        selector!(PUMP_STATUS_SELECTOR <- "div.pump-status");
        selector!(LAST_UPDATE_SELECTOR <- "div.last-update");
        selector!(ALERT_SELECTOR <- "div.info-text");

        let pump_status = element
            .select(&PUMP_STATUS_SELECTOR)
            .next()
            .ok_or_else(|| Error::html_parse_error("pump-status wrapper not found"))?;

        let last_update = pump_status
            .select(&LAST_UPDATE_SELECTOR)
            .next()
            .ok_or_else(|| Error::html_parse_error("last-update element not found"))?;
        let (date, time) = parse_last_update(last_update)?;

        let alert = match element.select(&ALERT_SELECTOR).next() {
            Some(info) => Some(normalize_whitespace(inner_text(info, "alert")?.trim()).into_owned()),
            None => None,
        };

        let h35 = GradeReading::from_pump_status(pump_status, Grade::H35)?;
        let h70 = GradeReading::from_pump_status(pump_status, Grade::H70)?;

        Ok(Self {
            date,
            time,
            alert,
            h35,
            h70,
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub const fn h35(&self) -> Option<&GradeReading> {
        self.h35.as_ref()
    }

    pub const fn h70(&self) -> Option<&GradeReading> {
        self.h70.as_ref()
    }
}

/// The rendered timestamp looks like `Wednesday, 6/15/2022, 2:34 PM` and sits
/// in the last text node of the element, after a label span. Fewer than four
/// whitespace-separated tokens means the script has not filled it in yet.
fn parse_last_update(element: ElementRef) -> Result<(String, String)> {
    let raw = element
        .text()
        .filter(|t| !t.trim().is_empty())
        .last()
        .ok_or_else(|| Error::timestamp_pending("last-update has no text"))?;

    let cleaned = raw.replace(',', "");
    // the weekday token is not recorded
    let mut tokens = cleaned.split_whitespace().skip(1);
    let (Some(date), Some(time), Some(meridiem)) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(Error::timestamp_pending("last-update text is incomplete"));
    };

    Ok((date.to_owned(), format!("{time}{meridiem}")))
}
