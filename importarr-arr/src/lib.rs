pub mod client;
pub mod config;
pub mod movies;
pub mod series;
pub mod types;

pub use client::ArrClient;
pub use config::{BackendSettings, ImportConfig, config_path};
pub use movies::RadarrBackend;
pub use series::SonarrBackend;
