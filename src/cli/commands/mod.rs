pub mod config;
pub mod db;
pub mod init;
pub mod log;
pub mod report;
pub mod summary;
