pub mod client;

pub use client::{BASE_URL_ENV, ClientConfig, ConfigError, DEFAULT_BASE_URL};
