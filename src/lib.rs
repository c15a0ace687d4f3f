pub mod config;
pub mod dlq;
pub mod domain;
pub mod engine;
pub mod ingestion;
pub mod logging;
pub mod output_repository;
pub mod send_money;
