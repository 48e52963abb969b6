use crate::domain::model::{ReportRow, Seller, TopProduct};
use std::collections::HashMap;

/// SKU → cumulative quantity, iterated in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct SoldProducts {
    entries: Vec<TopProduct>,
    positions: HashMap<String, usize>,
}

impl SoldProducts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sku: &str, quantity: f64) {
        match self.positions.get(sku) {
            Some(&position) => self.entries[position].quantity += quantity,
            None => {
                self.positions.insert(sku.to_string(), self.entries.len());
                self.entries.push(TopProduct {
                    sku: sku.to_string(),
                    quantity,
                });
            }
        }
    }

    pub fn get(&self, sku: &str) -> Option<f64> {
        self.positions
            .get(sku)
            .map(|&position| self.entries[position].quantity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TopProduct> {
        self.entries.iter()
    }

    /// 依數量由大到小排序（穩定排序，同數量保留首次出現順序），取前 `limit` 筆
    pub fn top(&self, limit: usize) -> Vec<TopProduct> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));
        ranked.truncate(limit);
        ranked
    }
}

/// Per-seller working state for one report run.
#[derive(Debug, Clone)]
pub struct SellerStats {
    pub id: String,
    pub name: String,
    pub start_date: Option<chrono::NaiveDate>,
    pub position: Option<String>,
    pub sales_count: u64,
    pub revenue: f64,
    pub profit: f64,
    pub products_sold: SoldProducts,
    pub bonus: f64,
    pub top_products: Vec<TopProduct>,
}

impl SellerStats {
    pub fn new(seller: &Seller) -> Self {
        Self {
            id: seller.id.clone(),
            name: seller.full_name(),
            start_date: seller.start_date,
            position: seller.position.clone(),
            sales_count: 0,
            revenue: 0.0,
            profit: 0.0,
            products_sold: SoldProducts::new(),
            bonus: 0.0,
            top_products: Vec::new(),
        }
    }

    pub fn into_row(self) -> ReportRow {
        ReportRow {
            seller_id: self.id,
            name: self.name,
            revenue: round_money(self.revenue),
            profit: round_money(self.profit),
            sales_count: self.sales_count,
            top_products: self.top_products,
            bonus: round_money(self.bonus),
        }
    }
}

const MONEY_DECIMAL_PLACES: u32 = 2;

/// 金額四捨五入到小數兩位（中點遠離零）
pub fn round_money(value: f64) -> f64 {
    use rust_decimal::prelude::*;

    match Decimal::from_f64(value) {
        Some(decimal) => decimal
            .round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(value),
        // NaN / infinity
        None => value,
    }
}
