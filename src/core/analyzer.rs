use crate::core::policies::AnalysisOptions;
use crate::domain::model::{Product, ReportRow, SalesData};
use crate::domain::stats::SellerStats;
use crate::utils::error::{ReportError, Result};
use std::collections::HashMap;

pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// Builds the per-seller report, best profit first.
///
/// Fails with `InvalidInput` when any collection is empty and with
/// `InvalidOptions` when a policy is missing; nothing is computed in either
/// case. Purchase records of unknown sellers and line items of unknown SKUs
/// are skipped silently.
pub fn analyze(data: &SalesData, options: &AnalysisOptions) -> Result<Vec<ReportRow>> {
    validate_data(data)?;
    let (revenue_policy, bonus_policy) = options.policies()?;

    tracing::debug!(
        "Analyzing {} sellers, {} products, {} purchase records",
        data.sellers.len(),
        data.products.len(),
        data.purchase_records.len()
    );

    let mut seller_stats: Vec<SellerStats> = data.sellers.iter().map(SellerStats::new).collect();

    // 建立索引：seller id → 統計位置，sku → 商品（重複鍵以後者為準）
    let seller_index: HashMap<&str, usize> = data
        .sellers
        .iter()
        .enumerate()
        .map(|(position, seller)| (seller.id.as_str(), position))
        .collect();
    let product_index: HashMap<&str, &Product> = data
        .products
        .iter()
        .map(|product| (product.sku.as_str(), product))
        .collect();

    let mut skipped_records = 0usize;
    let mut skipped_items = 0usize;

    for record in &data.purchase_records {
        let Some(&position) = seller_index.get(record.seller_id.as_str()) else {
            skipped_records += 1;
            continue;
        };
        let seller = &mut seller_stats[position];

        seller.sales_count += 1;
        seller.revenue += record.total_amount.unwrap_or(0.0);

        for item in &record.items {
            let Some(product) = product_index.get(item.sku.as_str()) else {
                skipped_items += 1;
                continue;
            };

            let quantity = item.quantity();
            let cost = product.purchase_price() * quantity;
            let revenue = revenue_policy.revenue(item, product).unwrap_or(0.0);
            seller.profit += revenue - cost;
            seller.products_sold.add(&item.sku, quantity);
        }
    }

    if skipped_records > 0 || skipped_items > 0 {
        tracing::debug!(
            "Skipped {} purchase records with unknown sellers and {} items with unknown SKUs",
            skipped_records,
            skipped_items
        );
    }

    // 穩定排序：利潤相同時保留原本的賣家順序
    seller_stats.sort_by(|a, b| b.profit.total_cmp(&a.profit));

    let total = seller_stats.len();
    for (rank, seller) in seller_stats.iter_mut().enumerate() {
        seller.bonus = bonus_policy.bonus(rank, total, seller);
        seller.top_products = seller.products_sold.top(TOP_PRODUCTS_LIMIT);
    }

    Ok(seller_stats.into_iter().map(SellerStats::into_row).collect())
}

fn validate_data(data: &SalesData) -> Result<()> {
    let empty = [
        ("sellers", data.sellers.is_empty()),
        ("products", data.products.is_empty()),
        ("purchase_records", data.purchase_records.is_empty()),
    ];

    for (field, is_empty) in empty {
        if is_empty {
            return Err(ReportError::invalid_input(format!("'{}' must not be empty", field)));
        }
    }
    Ok(())
}
