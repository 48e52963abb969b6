use crate::domain::model::{LineItem, Product};
use crate::domain::ports::{BonusPolicy, RevenuePolicy};
use crate::domain::stats::SellerStats;
use crate::utils::error::{ReportError, Result};

pub const SIMPLE_REVENUE: &str = "simple";
pub const BONUS_BY_PROFIT: &str = "by_profit";

/// `sale_price * quantity * (1 - discount / 100)`, missing fields count as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRevenue;

impl RevenuePolicy for SimpleRevenue {
    fn revenue(&self, item: &LineItem, _product: &Product) -> Option<f64> {
        let discount = 1.0 - item.discount.unwrap_or(0.0) / 100.0;
        let sale_price = item.sale_price.unwrap_or(0.0);
        Some(sale_price * item.quantity() * discount)
    }
}

/// Rank-tier bonus: 15% for the leader, 10% for the next two, nothing for
/// last place and 5% for everyone else.
#[derive(Debug, Clone, Copy, Default)]
pub struct BonusByProfit;

impl BonusPolicy for BonusByProfit {
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStats) -> f64 {
        // 順序不可調換：只有一位賣家時 rank 0 同時也是最後一名
        if rank == 0 {
            seller.profit * 0.15
        } else if rank == 1 || rank == 2 {
            seller.profit * 0.10
        } else if rank + 1 == total {
            0.0
        } else {
            seller.profit * 0.05
        }
    }
}

/// Both policies an analysis run needs. A slot left empty fails the run
/// with `InvalidOptions`.
#[derive(Default)]
pub struct AnalysisOptions {
    pub calculate_revenue: Option<Box<dyn RevenuePolicy>>,
    pub calculate_bonus: Option<Box<dyn BonusPolicy>>,
}

impl std::fmt::Debug for AnalysisOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisOptions")
            .field("calculate_revenue", &self.calculate_revenue.is_some())
            .field("calculate_bonus", &self.calculate_bonus.is_some())
            .finish()
    }
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_revenue(mut self, policy: impl RevenuePolicy + 'static) -> Self {
        self.calculate_revenue = Some(Box::new(policy));
        self
    }

    pub fn with_bonus(mut self, policy: impl BonusPolicy + 'static) -> Self {
        self.calculate_bonus = Some(Box::new(policy));
        self
    }

    /// `SimpleRevenue` + `BonusByProfit`
    pub fn standard() -> Self {
        Self::new().with_revenue(SimpleRevenue).with_bonus(BonusByProfit)
    }

    /// 依名稱解析策略（供 CLI 與 TOML 設定使用）
    pub fn from_names(revenue: &str, bonus: &str) -> Result<Self> {
        let options = Self::new();

        let options = match revenue {
            SIMPLE_REVENUE => options.with_revenue(SimpleRevenue),
            other => {
                return Err(ReportError::invalid_options(format!(
                    "unknown revenue policy '{}', expected '{}'",
                    other, SIMPLE_REVENUE
                )))
            }
        };

        let options = match bonus {
            BONUS_BY_PROFIT => options.with_bonus(BonusByProfit),
            other => {
                return Err(ReportError::invalid_options(format!(
                    "unknown bonus policy '{}', expected '{}'",
                    other, BONUS_BY_PROFIT
                )))
            }
        };

        Ok(options)
    }

    pub(crate) fn policies(&self) -> Result<(&dyn RevenuePolicy, &dyn BonusPolicy)> {
        let revenue = self
            .calculate_revenue
            .as_deref()
            .ok_or_else(|| ReportError::invalid_options("calculate_revenue policy is missing"))?;
        let bonus = self
            .calculate_bonus
            .as_deref()
            .ok_or_else(|| ReportError::invalid_options("calculate_bonus policy is missing"))?;
        Ok((revenue, bonus))
    }
}
