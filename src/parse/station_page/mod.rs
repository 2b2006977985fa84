mod grade;
mod status_report;

pub use grade::GradeReading;
pub use status_report::StatusReport;
