use crate::core::ConfigProvider;
use crate::utils::error::{CpfError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_REPORT_FILENAME: &str = "cpf_report";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    #[serde(default = "default_filename")]
    pub filename: String,
    #[serde(default)]
    pub only_invalid: bool,
}

fn default_formats() -> Vec<String> {
    vec!["csv".to_string()]
}

fn default_filename() -> String {
    DEFAULT_REPORT_FILENAME.to_string()
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CpfError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CpfError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${INPUT_DIR})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn job_name(&self) -> &str {
        &self.job.name
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn report_filename(&self) -> &str {
        &self.output.filename
    }

    fn only_invalid(&self) -> bool {
        self.output.only_invalid
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("job.name", &self.job.name)?;
        validation::validate_path("input.path", &self.input.path)?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_output_formats("output.formats", &self.output.formats)?;
        validation::validate_file_stem("output.filename", &self.output.filename)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[job]
name = "monthly-customers"

[input]
path = "customers.txt"

[output]
path = "./reports"
formats = ["csv", "json"]
only_invalid = true
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.job_name(), "monthly-customers");
        assert_eq!(config.input_path(), "customers.txt");
        assert_eq!(config.output_formats(), &["csv".to_string(), "json".to_string()]);
        assert_eq!(config.report_filename(), DEFAULT_REPORT_FILENAME);
        assert!(config.only_invalid());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_optional_output_fields() {
        let toml_content = r#"
[job]
name = "defaults"

[input]
path = "in.txt"

[output]
path = "out"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_formats(), &["csv".to_string()]);
        assert!(!config.only_invalid());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CPF_CHECK_TEST_INPUT", "/data/cpfs.txt");

        let toml_content = r#"
[job]
name = "env"

[input]
path = "${CPF_CHECK_TEST_INPUT}"

[output]
path = "${CPF_CHECK_TEST_UNSET_VAR}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input_path(), "/data/cpfs.txt");
        assert_eq!(config.output_path(), "${CPF_CHECK_TEST_UNSET_VAR}");

        std::env::remove_var("CPF_CHECK_TEST_INPUT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[job]
name = "bad"

[input]
path = ""

[output]
path = "out"
formats = ["xlsx"]
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(CpfError::InvalidConfigValueError { ref field, .. }) if field == "input.path"
        ));
    }

    #[test]
    fn test_missing_section_is_config_error() {
        let result = TomlConfig::from_toml_str("[job]\nname = \"x\"\n");
        assert!(matches!(result, Err(CpfError::ConfigError { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.output_path(), "./reports");
    }
}
