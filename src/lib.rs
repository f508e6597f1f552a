pub mod allocator;
pub mod config;
pub mod error;
pub mod registry;
pub mod service;
pub mod types;
pub mod workload;
