use crate::core::output::SUPPORTED_FORMATS;
use crate::core::policies::{BONUS_BY_PROFIT, SIMPLE_REVENUE};
use crate::core::{ConfigProvider, DataSource};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub report: ReportConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub policies: PoliciesConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

/// `data` 與 `sellers`/`products`/`purchase_records` 擇一
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub data: Option<String>,
    pub sellers: Option<String>,
    pub products: Option<String>,
    pub purchase_records: Option<String>,
    pub base_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoliciesConfig {
    #[serde(default = "default_revenue_policy")]
    pub revenue: String,
    #[serde(default = "default_bonus_policy")]
    pub bonus: String,
}

impl Default for PoliciesConfig {
    fn default() -> Self {
        Self {
            revenue: default_revenue_policy(),
            bonus: default_bonus_policy(),
        }
    }
}

fn default_revenue_policy() -> String {
    SIMPLE_REVENUE.to_string()
}

fn default_bonus_policy() -> String {
    BONUS_BY_PROFIT.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReportError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("report.name", &self.report.name)?;

        match &self.source.data {
            Some(data) => {
                validation::validate_path("source.data", data)?;
                if self.source.sellers.is_some()
                    || self.source.products.is_some()
                    || self.source.purchase_records.is_some()
                {
                    return Err(ReportError::ConfigValidationError {
                        field: "source".to_string(),
                        message: "use either 'data' or the per-collection files, not both"
                            .to_string(),
                    });
                }
            }
            None => {
                let sellers =
                    validation::validate_required_field("source.sellers", &self.source.sellers)?;
                let products =
                    validation::validate_required_field("source.products", &self.source.products)?;
                let purchase_records = validation::validate_required_field(
                    "source.purchase_records",
                    &self.source.purchase_records,
                )?;
                validation::validate_path("source.sellers", sellers)?;
                validation::validate_path("source.products", products)?;
                validation::validate_path("source.purchase_records", purchase_records)?;
            }
        }

        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats(
            "load.output_formats",
            &self.load.output_formats,
            &SUPPORTED_FORMATS,
        )?;

        validation::validate_non_empty_string("policies.revenue", &self.policies.revenue)?;
        validation::validate_non_empty_string("policies.bonus", &self.policies.bonus)?;

        Ok(())
    }

    /// 輸入檔案的根目錄
    pub fn base_dir(&self) -> &str {
        self.source.base_dir.as_deref().unwrap_or(".")
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn data_source(&self) -> DataSource {
        match &self.source.data {
            Some(path) => DataSource::Combined(path.clone()),
            None => DataSource::Split {
                sellers: self.source.sellers.clone().unwrap_or_default(),
                products: self.source.products.clone().unwrap_or_default(),
                purchase_records: self.source.purchase_records.clone().unwrap_or_default(),
            },
        }
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn revenue_policy(&self) -> &str {
        &self.policies.revenue
    }

    fn bonus_policy(&self) -> &str {
        &self.policies.bonus
    }

    fn compression_enabled(&self) -> bool {
        self.load.compression.as_ref().map(|c| c.enabled).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
