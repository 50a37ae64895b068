//! Run configuration.
//!
//! Values come from an optional JSON file (`--config`) and are then
//! overridden by command-line flags.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub doxygen_xml_input_folder_path: PathBuf,
    pub output_folder_path: PathBuf,
    pub base_url: String,
    pub api_base_path: String,
    pub doc_id_prefix: String,
    pub sidebar_file_path: PathBuf,
    pub sidebar_category_label: String,
    pub menu_file_path: Option<PathBuf>,
    pub menu_dropdown_label: String,
    pub redirects_output_folder_path: Option<PathBuf>,
    pub suggest_to_do_descriptions: bool,
    pub render_program_listing: bool,
    pub render_index_pages: bool,
    pub max_parallel_writes: usize,
    pub verbose: bool,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            doxygen_xml_input_folder_path: PathBuf::from("doxygen/xml"),
            output_folder_path: PathBuf::from("docs/api"),
            base_url: "/".to_string(),
            api_base_path: "api".to_string(),
            doc_id_prefix: "api".to_string(),
            sidebar_file_path: PathBuf::from("sidebar-category-doxygen.json"),
            sidebar_category_label: "API Reference".to_string(),
            menu_file_path: None,
            menu_dropdown_label: "Reference".to_string(),
            redirects_output_folder_path: None,
            suggest_to_do_descriptions: false,
            render_program_listing: false,
            render_index_pages: true,
            max_parallel_writes: 8,
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Read a JSON configuration file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_parallel_writes == 0 {
            bail!("max_parallel_writes must be at least 1");
        }
        let input = normalize_dir(&self.doxygen_xml_input_folder_path);
        let output = normalize_dir(&self.output_folder_path);
        // The output folder is wiped at the start of every run.
        if output.as_os_str().is_empty() || output.as_path() == Path::new("/") || input.starts_with(&output) {
            bail!(
                "refusing to use {} as output folder: it would delete the input",
                self.output_folder_path.display()
            );
        }
        Ok(())
    }

    /// Absolute URL prefix of every page: `{base_url}{api_base_path}`
    /// without a trailing slash.
    pub fn url_prefix(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let api = self.api_base_path.trim_matches('/');
        if api.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, api)
        }
    }

    /// Site route of the API root, without the base URL: `/api`.
    pub fn route_prefix(&self) -> String {
        let api = self.api_base_path.trim_matches('/');
        if api.is_empty() {
            String::new()
        } else {
            format!("/{}", api)
        }
    }

    /// Sidebar document id of a page identifier.
    pub fn doc_id(&self, page_id: &str) -> String {
        let prefix = self.doc_id_prefix.trim_matches('/');
        if prefix.is_empty() {
            page_id.to_string()
        } else {
            format!("{}/{}", prefix, page_id)
        }
    }
}

fn normalize_dir(path: &Path) -> PathBuf {
    path.components().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_prefix_joins_base_and_api_path() {
        let mut config = Config::default();
        assert_eq!(config.url_prefix(), "/api");
        config.base_url = "https://example.org/docs/".to_string();
        config.api_base_path = "/reference/".to_string();
        assert_eq!(config.url_prefix(), "https://example.org/docs/reference");
        assert_eq!(config.route_prefix(), "/reference");
        config.api_base_path = String::new();
        assert_eq!(config.url_prefix(), "https://example.org/docs");
        assert_eq!(config.route_prefix(), "");
    }

    #[test]
    fn doc_id_uses_prefix() {
        let config = Config::default();
        assert_eq!(config.doc_id("classes/geo-Widget"), "api/classes/geo-Widget");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "base_url": "/site/", "render_index_pages": false }"#).unwrap();
        assert_eq!(config.base_url, "/site/");
        assert!(!config.render_index_pages);
        assert_eq!(config.max_parallel_writes, 8);
        assert_eq!(config.output_folder_path, PathBuf::from("docs/api"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{ "baseUrl": "/" }"#).is_err());
    }

    #[test]
    fn output_containing_input_is_rejected() {
        let config = Config {
            doxygen_xml_input_folder_path: PathBuf::from("build/xml"),
            output_folder_path: PathBuf::from("build"),
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn zero_parallel_writes_is_rejected() {
        let config = Config {
            max_parallel_writes: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
