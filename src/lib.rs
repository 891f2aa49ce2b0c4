pub mod builder;
pub mod config;
pub mod error;
pub mod languages;
pub mod models;
pub mod project;
pub mod server;
pub mod service;
pub mod transport;
pub mod visual;

pub use crate::error::{CodesmithError, Result};
pub use crate::models::{Mode, RenderModel};
pub use crate::service::CodesmithService;
