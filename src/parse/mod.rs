pub(crate) mod cached_selector;
mod error;
mod index_page;
mod normalize_whitespace;
mod station_page;
mod text;

pub use error::Error;
pub use index_page::{StationMeta, Stations};
pub use normalize_whitespace::normalize_whitespace;
pub use station_page::{GradeReading, StatusReport};
