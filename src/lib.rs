pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod shop;
pub mod uploader;
