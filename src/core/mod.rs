pub mod analyzer;
pub mod etl;
pub mod output;
pub mod pipeline;
pub mod policies;

pub use crate::domain::model::{ReportRow, SalesData, TransformResult};
pub use crate::domain::ports::{
    BonusPolicy, ConfigProvider, DataSource, Pipeline, RevenuePolicy, Storage,
};
pub use crate::domain::stats::SellerStats;
pub use crate::utils::error::Result;
