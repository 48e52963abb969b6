use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting sales report run");

        // Extract
        tracing::info!("Loading sales data...");
        let data = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} sellers, {} products, {} purchase records",
            data.sellers.len(),
            data.products.len(),
            data.purchase_records.len()
        );

        // Transform
        tracing::info!("Analyzing sales...");
        let result = self.pipeline.transform(data).await?;
        tracing::info!(
            "Ranked {} sellers: revenue {:.2}, profit {:.2}, bonus {:.2}",
            result.summary.total_sellers,
            result.summary.total_revenue,
            result.summary.total_profit,
            result.summary.total_bonus
        );
        if let Some(leader) = result.rows.first() {
            tracing::info!(
                "🏆 Top seller: {} ({}), profit {:.2}",
                leader.name,
                leader.seller_id,
                leader.profit
            );
        }

        // Load
        tracing::info!("Writing report...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
