use thiserror::Error as ThisError;
use url::Url;

use crate::{parse, render};

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("fetch of {url} failed with status {status}")]
    Fetch { url: Url, status: reqwest::StatusCode },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error(transparent)]
    Parse(#[from] parse::Error),
    #[error(transparent)]
    Render(#[from] render::RenderError),
    #[error("station page {url} still incomplete after {attempts} render attempts")]
    RenderTimeout { url: Url, attempts: u32 },
    #[error("unable to read workbook: {0}")]
    WorkbookRead(#[from] calamine::XlsxError),
    #[error("workbook sheet {sheet:?} is missing its Station/Legacy header columns")]
    WorkbookSchema { sheet: &'static str },
    #[error("unable to write workbook: {0}")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, Error>;
