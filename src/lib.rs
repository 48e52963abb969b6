pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{
    analyzer::analyze,
    etl::ReportEngine,
    pipeline::ReportPipeline,
    policies::{AnalysisOptions, BonusByProfit, SimpleRevenue},
};
pub use domain::model::{LineItem, Product, PurchaseRecord, ReportRow, SalesData, Seller, TopProduct};
pub use domain::ports::{BonusPolicy, RevenuePolicy};
pub use domain::stats::SellerStats;
pub use utils::error::{ReportError, Result};
