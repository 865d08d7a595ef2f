pub mod business_hours;
pub mod metrics;
pub mod period;
pub mod report;
pub mod sample;
pub mod status;
