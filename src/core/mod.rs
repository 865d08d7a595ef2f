pub mod calculator;
pub mod jobs;
pub mod logic;
pub mod report;
pub mod service;

pub use jobs::ReportJobs;
pub use service::{ReportService, ReportSettings};
