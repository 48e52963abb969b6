use crate::domain::model::{LineItem, Product, SalesData, TransformResult};
use crate::domain::stats::SellerStats;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Gross revenue of one line item. `None` counts as zero.
pub trait RevenuePolicy: Send + Sync {
    fn revenue(&self, item: &LineItem, product: &Product) -> Option<f64>;
}

/// Bonus for the seller at zero-based `rank` out of `total` sellers.
pub trait BonusPolicy: Send + Sync {
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStats) -> f64;
}

impl<F> RevenuePolicy for F
where
    F: Fn(&LineItem, &Product) -> Option<f64> + Send + Sync,
{
    fn revenue(&self, item: &LineItem, product: &Product) -> Option<f64> {
        self(item, product)
    }
}

impl<F> BonusPolicy for F
where
    F: Fn(usize, usize, &SellerStats) -> f64 + Send + Sync,
{
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStats) -> f64 {
        self(rank, total, seller)
    }
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// One JSON document holding `sellers`, `products` and `purchase_records`.
    Combined(String),
    /// Three JSON arrays in separate files.
    Split {
        sellers: String,
        products: String,
        purchase_records: String,
    },
}

pub trait ConfigProvider: Send + Sync {
    fn data_source(&self) -> DataSource;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn revenue_policy(&self) -> &str;
    fn bonus_policy(&self) -> &str;
    fn compression_enabled(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SalesData>;
    async fn transform(&self, data: SalesData) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
