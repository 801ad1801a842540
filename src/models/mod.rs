pub mod config;
pub mod template;

pub use config::AppConfig;
pub use template::{TemplateError, TemplateSpec, TemplateSummary};
