pub mod lifecycle;
pub mod page;
pub mod renderer;
pub mod site;

pub use crate::domain::model::{Course, ModuleDescriptor, PageLayout};
pub use crate::domain::ports::{ContentSource, Storage};
pub use crate::utils::error::Result;
