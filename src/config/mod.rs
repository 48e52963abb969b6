pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::output::SUPPORTED_FORMATS;
#[cfg(feature = "cli")]
use crate::core::policies::{BONUS_BY_PROFIT, SIMPLE_REVENUE};
#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, DataSource};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "sales-report")]
#[command(about = "Per-seller sales performance report")]
pub struct CliConfig {
    /// Combined dataset with sellers, products and purchase_records
    #[arg(long, conflicts_with_all = ["sellers", "products", "purchase_records"])]
    pub data: Option<String>,

    #[arg(long)]
    pub sellers: Option<String>,

    #[arg(long)]
    pub products: Option<String>,

    #[arg(long)]
    pub purchase_records: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "json")]
    pub formats: Vec<String>,

    #[arg(long, default_value = SIMPLE_REVENUE)]
    pub revenue_policy: String,

    #[arg(long, default_value = BONUS_BY_PROFIT)]
    pub bonus_policy: String,

    #[arg(long, help = "Bundle the report files into a ZIP archive")]
    pub zip: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    fn input_files(&self) -> Vec<String> {
        match self.data_source() {
            DataSource::Combined(path) => vec![path],
            DataSource::Split {
                sellers,
                products,
                purchase_records,
            } => vec![sellers, products, purchase_records],
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn data_source(&self) -> DataSource {
        match &self.data {
            Some(path) => DataSource::Combined(path.clone()),
            None => DataSource::Split {
                sellers: self.sellers.clone().unwrap_or_default(),
                products: self.products.clone().unwrap_or_default(),
                purchase_records: self.purchase_records.clone().unwrap_or_default(),
            },
        }
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn revenue_policy(&self) -> &str {
        &self.revenue_policy
    }

    fn bonus_policy(&self) -> &str {
        &self.bonus_policy
    }

    fn compression_enabled(&self) -> bool {
        self.zip
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.data.is_none() {
            validation::validate_required_field("sellers", &self.sellers)?;
            validation::validate_required_field("products", &self.products)?;
            validation::validate_required_field("purchase_records", &self.purchase_records)?;
        }
        for file in self.input_files() {
            validation::validate_path("input", &file)?;
        }
        validation::validate_file_extensions("input", &self.input_files(), &["json"])?;

        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats, &SUPPORTED_FORMATS)?;
        validation::validate_non_empty_string("revenue_policy", &self.revenue_policy)?;
        validation::validate_non_empty_string("bonus_policy", &self.bonus_policy)?;
        Ok(())
    }
}
