pub mod api;
pub mod app;
pub mod codegen;
pub mod config;
pub mod models;
pub mod redirect;
pub mod registry;
pub mod stats;
pub mod storage;

pub use app::create_app;
