use crate::domain::model::{ReportRow, ReportSummary};
use crate::utils::error::{ReportError, Result};
use crate::domain::stats::round_money;
use serde::Serialize;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const SUPPORTED_FORMATS: [&str; 2] = ["json", "csv"];

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    seller_id: &'a str,
    name: &'a str,
    revenue: f64,
    profit: f64,
    sales_count: u64,
    bonus: f64,
    top_products: String,
}

pub fn render_json(rows: &[ReportRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// top_products 以 `sku:qty` 並用 `;` 串接
pub fn render_csv(rows: &[ReportRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for row in rows {
        let top_products = row
            .top_products
            .iter()
            .map(|p| format!("{}:{}", p.sku, p.quantity))
            .collect::<Vec<_>>()
            .join(";");

        writer.serialize(CsvRow {
            seller_id: &row.seller_id,
            name: &row.name,
            revenue: row.revenue,
            profit: row.profit,
            sales_count: row.sales_count,
            bonus: row.bonus,
            top_products,
        })?;
    }

    let bytes = writer.into_inner().map_err(|e| ReportError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

pub fn summarize(rows: &[ReportRow]) -> ReportSummary {
    ReportSummary {
        total_sellers: rows.len(),
        total_sales: rows.iter().map(|r| r.sales_count).sum(),
        total_revenue: round_money(rows.iter().map(|r| r.revenue).sum()),
        total_profit: round_money(rows.iter().map(|r| r.profit).sum()),
        total_bonus: round_money(rows.iter().map(|r| r.bonus).sum()),
        generated_at: chrono::Utc::now(),
    }
}

/// 將所有輸出檔案打包成單一 ZIP
pub fn bundle_zip(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for (name, content) in files {
        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
        zip.write_all(content)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
