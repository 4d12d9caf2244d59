pub mod config;
pub mod credentials;
pub mod model;
pub mod output;
pub mod ranking;
pub mod report;
pub mod scoring;
pub mod source;
