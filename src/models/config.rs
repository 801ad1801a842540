use crate::assets::AssetLoader;
use crate::models::template::TemplateSpec;
use serde::Deserialize;
use std::collections::HashMap;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Template used when a request names none
    #[serde(default = "default_template")]
    pub default_template: String,

    /// Largest accepted PNG upload in bytes
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,

    /// Most pages accepted in one detection run
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Report templates by name
    #[serde(default)]
    pub templates: HashMap<String, TemplateSpec>,
}

fn default_template() -> String {
    "cardiometabolic-v1".to_string()
}

fn default_max_upload() -> usize {
    25 * 1024 * 1024
}

fn default_max_pages() -> usize {
    8
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    ///
    /// Templates that fail validation are dropped with a warning so that one
    /// broken layout does not take the others down.
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(mut config) => {
                    config.templates.retain(|name, spec| match spec.validate() {
                        Ok(()) => true,
                        Err(e) => {
                            tracing::warn!(template = %name, %e, "Ignoring invalid template");
                            false
                        }
                    });
                    tracing::info!(
                        templates = config.templates.len(),
                        default = %config.default_template,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Resolve a template by name, falling back to the default template.
    pub fn template(&self, name: Option<&str>) -> Option<(&str, &TemplateSpec)> {
        let name = name.unwrap_or(self.default_template.as_str());
        self.templates
            .get_key_value(name)
            .map(|(name, spec)| (name.as_str(), spec))
    }

    /// Template names in sorted order
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_template: default_template(),
            max_upload_bytes: default_max_upload(),
            max_pages: default_max_pages(),
            templates: HashMap::new(),
        }
    }
}
