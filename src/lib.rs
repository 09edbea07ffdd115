pub mod address;
pub mod archive;
pub mod cli;
pub mod errors;
pub mod graph;
pub mod identity;
pub mod memory_store;
pub mod mutual;
pub mod persistence;
pub mod pipeline;
pub mod result;
pub mod scanner;
pub mod service;
pub mod service_configuration;
pub mod store;
pub mod ui;
