use super::schema::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "./.config/pm-md.yaml";

/// Values given on the command line. They take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub statuses: Option<String>,
    pub show_response_names: bool,
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub replace: bool,
}

/// Load configuration from file or return default
pub fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config_path = match custom_path {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(DEFAULT_CONFIG_PATH),
    };

    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        log::debug!("Loaded config from {:?}", config_path);
        Ok(config)
    } else if custom_path.is_some() {
        // Custom path specified but doesn't exist - error
        anyhow::bail!("Config file not found: {:?}", config_path);
    } else {
        Ok(Config::default())
    }
}

/// Merge config with CLI arguments (CLI takes precedence)
pub fn merge_with_cli_args(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(statuses) = cli.statuses {
        config.statuses = Some(statuses);
    }
    if let Some(template) = cli.template {
        config.template = Some(template);
    }
    if let Some(output) = cli.output {
        config.output = Some(output);
    }

    // Flags can only switch these on
    config.show_response_names |= cli.show_response_names;
    config.replace |= cli.replace;

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_yaml_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "statuses: \"200-299\"\nshowResponseNames: true\ntemplate: custom.tera\nreplace: true"
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.statuses.as_deref(), Some("200-299"));
        assert!(config.show_response_names);
        assert_eq!(config.template, Some(PathBuf::from("custom.tera")));
        assert_eq!(config.output, None);
        assert!(config.replace);
    }

    #[test]
    fn missing_custom_config_is_an_error() {
        assert!(load_config(Some(Path::new("nonexistent-config.yaml"))).is_err());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "statuses: [unclosed").unwrap();
        assert!(load_config(Some(file.path())).is_err());
    }

    #[test]
    fn cli_takes_precedence() {
        let config = Config {
            statuses: Some("200".to_string()),
            template: Some(PathBuf::from("file.tera")),
            output: Some(PathBuf::from("out.md")),
            ..Config::default()
        };
        let cli = CliOverrides {
            statuses: Some("400-499".to_string()),
            show_response_names: true,
            ..CliOverrides::default()
        };

        let merged = merge_with_cli_args(config, cli);
        assert_eq!(merged.statuses.as_deref(), Some("400-499"));
        assert_eq!(merged.template, Some(PathBuf::from("file.tera")));
        assert_eq!(merged.output, Some(PathBuf::from("out.md")));
        assert!(merged.show_response_names);
        assert!(!merged.replace);
    }
}
