pub mod config;
pub mod core;
pub mod dom;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::CatalogConfig};
pub use core::{
    lifecycle::{LifecycleState, PageLifecycle},
    page::CoursePage,
    renderer::{render, wire_smooth_scroll},
    site::{render_course_html, SiteEngine, SiteReport},
};
pub use domain::model::{Course, ModuleDescriptor, PageLayout};
pub use utils::error::{Result, TopicsError};
