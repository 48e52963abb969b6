use crate::utils::error::{ReportError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub position: Option<String>,
}

impl Seller {
    /// 顯示名稱：缺少的部分以空字串代替
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    #[serde(default)]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sale_price: Option<f64>,
}

impl Product {
    pub fn purchase_price(&self) -> f64 {
        self.purchase_price.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: String,
    /// Fractional and negative (returned) quantities are accepted as-is
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub sale_price: Option<f64>,
    /// Percent, 0..=100
    #[serde(default)]
    pub discount: Option<f64>,
}

impl LineItem {
    pub fn quantity(&self) -> f64 {
        self.quantity.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub seller_id: String,
    #[serde(default)]
    pub receipt_id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub total_discount: Option<f64>,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesData {
    pub sellers: Vec<Seller>,
    pub products: Vec<Product>,
    pub purchase_records: Vec<PurchaseRecord>,
}

impl SalesData {
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Self::from_json_value(value)
    }

    /// 在邊界檢查資料形狀：三個集合都必須存在且為陣列
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let mut object = match value {
            serde_json::Value::Object(object) => object,
            serde_json::Value::Null => {
                return Err(ReportError::invalid_input("sales data is missing"))
            }
            other => {
                return Err(ReportError::invalid_input(format!(
                    "sales data must be an object, got {}",
                    json_type_name(&other)
                )))
            }
        };

        let sellers = take_array(&mut object, "sellers")?;
        let products = take_array(&mut object, "products")?;
        let purchase_records = take_array(&mut object, "purchase_records")?;

        Ok(Self {
            sellers: serde_json::from_value(sellers)?,
            products: serde_json::from_value(products)?,
            purchase_records: serde_json::from_value(purchase_records)?,
        })
    }

    /// 從三個獨立的 JSON 陣列組合資料集
    pub fn from_parts(
        sellers: serde_json::Value,
        products: serde_json::Value,
        purchase_records: serde_json::Value,
    ) -> Result<Self> {
        let mut object = serde_json::Map::new();
        object.insert("sellers".to_string(), sellers);
        object.insert("products".to_string(), products);
        object.insert("purchase_records".to_string(), purchase_records);
        Self::from_json_value(serde_json::Value::Object(object))
    }
}

fn take_array(
    object: &mut serde_json::Map<String, serde_json::Value>,
    field: &str,
) -> Result<serde_json::Value> {
    match object.remove(field) {
        Some(value @ serde_json::Value::Array(_)) => Ok(value),
        Some(other) => Err(ReportError::invalid_input(format!(
            "'{}' must be an array, got {}",
            field,
            json_type_name(&other)
        ))),
        None => Err(ReportError::invalid_input(format!(
            "'{}' is missing",
            field
        ))),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub sku: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub seller_id: String,
    pub name: String,
    pub revenue: f64,
    pub profit: f64,
    pub sales_count: u64,
    pub top_products: Vec<TopProduct>,
    pub bonus: f64,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
    pub json_output: String,
    pub csv_output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_sellers: usize,
    pub total_sales: u64,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub total_bonus: f64,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
