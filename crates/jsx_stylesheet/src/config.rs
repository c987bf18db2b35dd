use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

/// Stylesheet extensions recognised when no configuration overrides them
pub const DEFAULT_STYLE_SHEET_EXTENSIONS: [&str; 4] = [".css", ".scss", ".less", ".sass"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid JSON configuration: {0}")]
  InvalidJson(#[from] serde_json::Error),
  #[error("Invalid stylesheet extension: {0:?}")]
  InvalidExtension(String),
}

/// Execution environment the transformed code is built for.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentMode {
  Development,
  #[default]
  Production,
  #[serde(other)]
  Other,
}

impl EnvironmentMode {
  /// Map an environment name such as `NODE_ENV` onto a mode.
  pub fn from_env_name(name: &str) -> Self {
    match name.trim() {
      "development" => EnvironmentMode::Development,
      "production" => EnvironmentMode::Production,
      _ => EnvironmentMode::Other,
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsxStylesheetConfig {
  /// Keep the `className` attribute next to the generated `style`
  #[serde(default)]
  pub retain_class_name: bool,
  #[serde(default = "default_style_sheet_extensions")]
  pub style_sheet_extensions: HashSet<String>,
  /// When unset, the host decides (SWC plugin metadata, `NODE_ENV`)
  #[serde(default)]
  pub environment_mode: Option<EnvironmentMode>,
}

fn default_style_sheet_extensions() -> HashSet<String> {
  DEFAULT_STYLE_SHEET_EXTENSIONS
    .iter()
    .map(|extension| extension.to_string())
    .collect()
}

impl Default for JsxStylesheetConfig {
  fn default() -> JsxStylesheetConfig {
    JsxStylesheetConfig {
      retain_class_name: false,
      style_sheet_extensions: default_style_sheet_extensions(),
      environment_mode: None,
    }
  }
}

impl JsxStylesheetConfig {
  pub fn from_json(json: &str) -> Result<Self, ConfigError> {
    let config: JsxStylesheetConfig = serde_json::from_str(json)?;
    config.normalized()
  }

  /// Accept extensions written with or without the leading dot.
  pub fn normalized(mut self) -> Result<Self, ConfigError> {
    self.style_sheet_extensions = self
      .style_sheet_extensions
      .into_iter()
      .map(|extension| {
        let bare = extension.trim().trim_start_matches('.');
        if bare.is_empty() || bare.contains(['/', '\\', '.']) {
          return Err(ConfigError::InvalidExtension(extension));
        }
        Ok(format!(".{bare}"))
      })
      .collect::<Result<_, _>>()?;

    Ok(self)
  }

  pub fn is_development(&self) -> bool {
    self.environment_mode == Some(EnvironmentMode::Development)
  }

  pub fn is_style_sheet(&self, source: &str) -> bool {
    let Some(extension) = Path::new(source).extension().and_then(|e| e.to_str()) else {
      return false;
    };

    self
      .style_sheet_extensions
      .contains(&format!(".{extension}"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = JsxStylesheetConfig::from_json("{}").unwrap();

    assert!(!config.retain_class_name);
    assert!(!config.is_development());
    assert_eq!(config.environment_mode, None);
    for extension in ["./a.css", "./a.scss", "./a.less", "a.sass"] {
      assert!(config.is_style_sheet(extension), "{extension}");
    }
    assert!(!config.is_style_sheet("./a.js"));
    assert!(!config.is_style_sheet("rax"));
  }

  #[test]
  fn test_camel_case_keys() {
    let config = JsxStylesheetConfig::from_json(
      r#"{ "retainClassName": true, "styleSheetExtensions": ["styl", ".pcss"], "environmentMode": "development" }"#,
    )
    .unwrap();

    assert!(config.retain_class_name);
    assert!(config.is_development());
    assert!(config.is_style_sheet("./theme.styl"));
    assert!(config.is_style_sheet("./theme.pcss"));
    assert!(!config.is_style_sheet("./theme.css"));
  }

  #[test]
  fn test_unknown_environment_is_not_development() {
    let config = JsxStylesheetConfig::from_json(r#"{ "environmentMode": "staging" }"#).unwrap();

    assert_eq!(config.environment_mode, Some(EnvironmentMode::Other));
    assert!(!config.is_development());
  }

  #[test]
  fn test_invalid_configuration() {
    assert!(matches!(
      JsxStylesheetConfig::from_json("{ retainClassName: true }"),
      Err(ConfigError::InvalidJson(_))
    ));
    assert!(matches!(
      JsxStylesheetConfig::from_json(r#"{ "styleSheetExtensions": [""] }"#),
      Err(ConfigError::InvalidExtension(_))
    ));
  }

  #[test]
  fn test_environment_names() {
    assert_eq!(
      EnvironmentMode::from_env_name("development"),
      EnvironmentMode::Development
    );
    assert_eq!(
      EnvironmentMode::from_env_name("production"),
      EnvironmentMode::Production
    );
    assert_eq!(EnvironmentMode::from_env_name("test"), EnvironmentMode::Other);
  }
}
