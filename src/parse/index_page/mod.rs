mod station_meta;
mod stations;

pub use station_meta::StationMeta;
pub use stations::Stations;
