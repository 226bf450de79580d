use crate::config::ClientConfig;
use crate::utils::error::{CpStarsError, Result};
use crate::utils::validation::{validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub client: Option<ClientSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSection {
    pub host_address: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    pub client_side_validation: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CpStarsError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CpStarsError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CPSTARS_HOST})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| CpStarsError::Config {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 把檔案中有設定的欄位套用到既有的 ClientConfig 上
    pub fn apply_to(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(client) = &self.client {
            if let Some(host) = &client.host_address {
                config.host_address = host.clone();
            }
            if let Some(timeout) = client.timeout_seconds {
                config.timeout_seconds = Some(timeout);
            }
            if let Some(user_agent) = &client.user_agent {
                config.user_agent = user_agent.clone();
            }
            if let Some(validation) = client.client_side_validation {
                config.client_side_validation = validation;
            }
        }
        config
    }

    pub fn output_format(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.format.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(host) = self.client.as_ref().and_then(|c| c.host_address.as_deref()) {
            validate_url("client.host_address", host)?;
        }

        if let Some(format) = self.output_format() {
            let valid_formats = ["json", "csv"];
            if !valid_formats.contains(&format) {
                return Err(CpStarsError::InvalidConfigValue {
                    field: "output.format".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}
