// src/lib.rs

pub mod actions;
pub mod api;
pub mod config;
pub mod connection;
pub mod context;
pub mod host;
pub mod http;
pub mod tasks;
pub mod utils;

pub use tarkovbot_common::{models, protocol, Error};
pub use api::{ApiEndpoints, RemoteDataClient};
pub use config::PluginConfig;
pub use context::PluginContext;
pub use host::HostHandle;
pub use http::{DefaultHttpClient, HttpClient, HttpResponse};
