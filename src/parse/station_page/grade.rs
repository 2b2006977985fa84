use scraper::{ElementRef, Selector};

use crate::parse::error::Result;
use crate::parse::text::{child_text, inner_text};
use crate::selector;

/// The two fuel tiers a station may dispense. Each has its own pair of
/// status/capacity blocks on the detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Grade {
    H35,
    H70,
}

impl Grade {
    fn status_selector(self) -> &'static Selector {
        match self {
            Self::H35 => {
                selector!(SEL <- "div.h35status span");
                &SEL
            }
            Self::H70 => {
                selector!(SEL <- "div.h70status span");
                &SEL
            }
        }
    }

    fn capacity_selector(self) -> &'static Selector {
        match self {
            Self::H35 => {
                selector!(SEL <- "div.h35capacity span");
                &SEL
            }
            Self::H70 => {
                selector!(SEL <- "div.h70capacity span");
                &SEL
            }
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::H35 => "h35",
            Self::H70 => "h70",
        }
    }
}

/// Status and remaining inventory for one grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeReading {
    status: String,
    inventory: String,
}

impl GradeReading {
    /// The grade's blocks are optional as a unit: a station that does not
    /// carry the grade has neither a status nor a capacity element, and both
    /// fields come back as `None`. When the status block is present, the
    /// paired capacity element must be there too.
    pub(super) fn from_pump_status(pump_status: ElementRef, grade: Grade) -> Result<Option<Self>> {
        let Some(status_element) = pump_status.select(grade.status_selector()).next() else {
            return Ok(None);
        };

        let status = inner_text(status_element, "grade status")?.trim().to_owned();
        let inventory = child_text(
            grade.capacity_selector(),
            pump_status,
            "pump-status",
            &format!("{} capacity", grade.label()),
        )?
        .trim()
        .to_owned();

        Ok(Some(Self { status, inventory }))
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn inventory(&self) -> &str {
        &self.inventory
    }
}
