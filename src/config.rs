use anyhow::{Context, Result};
use indentml::Options;
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILE: &str = "indentml.json";

/// Top-level indentml.json schema.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImlConfig {
    /// Transpiler options (`formatOutput`, `selfClosingMode`, `indentUnit`).
    #[serde(flatten)]
    pub options: Options,

    /// Source file extension picked up by `iml build`.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Output directory for `iml build`.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

fn default_extension() -> String {
    "haml".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Default for ImlConfig {
    fn default() -> Self {
        Self {
            options: Options::default(),
            extension: default_extension(),
            out_dir: default_out_dir(),
        }
    }
}

/// Load config from an indentml.json file, or return defaults if missing.
pub fn load_config(dir: &Path) -> Result<ImlConfig> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: ImlConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        log::debug!("loaded {}", config_path.display());
        Ok(config)
    } else {
        Ok(ImlConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indentml::SelfClosingMode;
    use std::path::PathBuf;

    /// Fresh directory unique to this test and process.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("iml-config-{name}-{}", std::process::id()));
        if dir.exists() {
            std::fs::remove_dir_all(&dir).unwrap();
        }
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "formatOutput": false,
            "selfClosingMode": "html5",
            "indentUnit": 4,
            "extension": "iml",
            "outDir": "public"
        }"#;

        let config: ImlConfig = serde_json::from_str(json).unwrap();
        assert!(!config.options.format_output);
        assert_eq!(config.options.self_closing_mode, SelfClosingMode::Html5);
        assert_eq!(config.options.indent_unit, 4);
        assert_eq!(config.extension, "iml");
        assert_eq!(config.out_dir, "public");
    }

    #[test]
    fn test_defaults() {
        let config: ImlConfig = serde_json::from_str("{}").unwrap();
        assert!(config.options.format_output);
        assert_eq!(config.options.self_closing_mode, SelfClosingMode::Xhtml);
        assert_eq!(config.options.indent_unit, 2);
        assert_eq!(config.extension, "haml");
        assert_eq!(config.out_dir, "dist");
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result = serde_json::from_str::<ImlConfig>(r#"{ "selfClosingMode": "sgml" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = scratch_dir("missing");
        let config = load_config(&dir).unwrap();
        assert_eq!(config.out_dir, "dist");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_on_disk_is_read() {
        let dir = scratch_dir("present");
        std::fs::write(dir.join(CONFIG_FILE), r#"{ "outDir": "site" }"#).unwrap();
        let config = load_config(&dir).unwrap();
        assert_eq!(config.out_dir, "site");
        assert_eq!(config.extension, "haml");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
