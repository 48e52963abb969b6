use crate::core::analyzer::analyze;
use crate::core::output;
use crate::core::policies::AnalysisOptions;
use crate::core::{ConfigProvider, DataSource, Pipeline, SalesData, Storage, TransformResult};
use crate::utils::error::Result;

pub const JSON_REPORT_FILE: &str = "sales_report.json";
pub const CSV_REPORT_FILE: &str = "sales_report.csv";
pub const SUMMARY_FILE: &str = "summary.json";
pub const ZIP_REPORT_FILE: &str = "sales_report.zip";

pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    options: AnalysisOptions,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    /// 依設定中的策略名稱建立管道
    pub fn new(storage: S, config: C) -> Result<Self> {
        let options = AnalysisOptions::from_names(config.revenue_policy(), config.bonus_policy())?;
        Ok(Self::with_options(storage, config, options))
    }

    pub fn with_options(storage: S, config: C, options: AnalysisOptions) -> Self {
        Self {
            storage,
            config,
            options,
        }
    }

    async fn read_json(&self, path: &str) -> Result<serde_json::Value> {
        tracing::debug!("Reading {}", path);
        let bytes = self.storage.read_file(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn wants(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<SalesData> {
        let data = match self.config.data_source() {
            DataSource::Combined(path) => {
                SalesData::from_json_value(self.read_json(&path).await?)?
            }
            DataSource::Split {
                sellers,
                products,
                purchase_records,
            } => SalesData::from_parts(
                self.read_json(&sellers).await?,
                self.read_json(&products).await?,
                self.read_json(&purchase_records).await?,
            )?,
        };

        tracing::debug!(
            "Loaded {} sellers, {} products, {} purchase records",
            data.sellers.len(),
            data.products.len(),
            data.purchase_records.len()
        );
        Ok(data)
    }

    async fn transform(&self, data: SalesData) -> Result<TransformResult> {
        let rows = analyze(&data, &self.options)?;
        let summary = output::summarize(&rows);

        let json_output = output::render_json(&rows)?;
        let csv_output = output::render_csv(&rows)?;

        Ok(TransformResult {
            rows,
            summary,
            json_output,
            csv_output,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let mut files: Vec<(String, Vec<u8>)> = Vec::new();
        if self.wants("json") {
            files.push((JSON_REPORT_FILE.to_string(), result.json_output.into_bytes()));
        }
        if self.wants("csv") {
            files.push((CSV_REPORT_FILE.to_string(), result.csv_output.into_bytes()));
        }

        if self.config.compression_enabled() {
            files.push((
                SUMMARY_FILE.to_string(),
                serde_json::to_vec_pretty(&result.summary)?,
            ));

            tracing::debug!("Creating ZIP file with {} files", files.len());
            let zip_data = output::bundle_zip(&files)?;
            self.storage.write_file(ZIP_REPORT_FILE, &zip_data).await?;
            return Ok(format!("{}/{}", self.config.output_path(), ZIP_REPORT_FILE));
        }

        for (name, content) in &files {
            tracing::debug!("Writing {} ({} bytes)", name, content.len());
            self.storage.write_file(name, content).await?;
        }

        Ok(self.config.output_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ReportError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put(&self, path: &str, value: serde_json::Value) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), serde_json::to_vec(&value).unwrap());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ReportError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        source: DataSource,
        formats: Vec<String>,
        revenue: String,
        compression: bool,
    }

    impl TestConfig {
        fn combined() -> Self {
            Self {
                source: DataSource::Combined("data.json".to_string()),
                formats: vec!["json".to_string(), "csv".to_string()],
                revenue: "simple".to_string(),
                compression: false,
            }
        }
    }

    impl ConfigProvider for TestConfig {
        fn data_source(&self) -> DataSource {
            self.source.clone()
        }

        fn output_path(&self) -> &str {
            "./out"
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn revenue_policy(&self) -> &str {
            &self.revenue
        }

        fn bonus_policy(&self) -> &str {
            "by_profit"
        }

        fn compression_enabled(&self) -> bool {
            self.compression
        }
    }

    fn dataset() -> serde_json::Value {
        serde_json::json!({
            "sellers": [
                {"id": "seller_1", "first_name": "Ivan", "last_name": "Petrov"},
                {"id": "seller_2", "first_name": "Anna", "last_name": "Smirnova"}
            ],
            "products": [
                {"sku": "SKU_001", "purchase_price": 100.0},
                {"sku": "SKU_002", "purchase_price": 10.0}
            ],
            "purchase_records": [
                {
                    "seller_id": "seller_1",
                    "total_amount": 500.0,
                    "items": [{"sku": "SKU_001", "quantity": 2, "sale_price": 300.0, "discount": 10}]
                },
                {
                    "seller_id": "seller_2",
                    "total_amount": 60.0,
                    "items": [{"sku": "SKU_002", "quantity": 3, "sale_price": 20.0, "discount": 0}]
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_extract_combined_dataset() {
        let storage = MockStorage::new();
        storage.put("data.json", dataset()).await;
        let pipeline = ReportPipeline::new(storage, TestConfig::combined()).unwrap();

        let data = pipeline.extract().await.unwrap();
        assert_eq!(data.sellers.len(), 2);
        assert_eq!(data.products.len(), 2);
        assert_eq!(data.purchase_records.len(), 2);
    }

    #[tokio::test]
    async fn test_extract_split_dataset() {
        let storage = MockStorage::new();
        let dataset = dataset();
        storage.put("sellers.json", dataset["sellers"].clone()).await;
        storage.put("products.json", dataset["products"].clone()).await;
        storage
            .put("purchase_records.json", dataset["purchase_records"].clone())
            .await;

        let mut config = TestConfig::combined();
        config.source = DataSource::Split {
            sellers: "sellers.json".to_string(),
            products: "products.json".to_string(),
            purchase_records: "purchase_records.json".to_string(),
        };
        let pipeline = ReportPipeline::new(storage, config).unwrap();

        let data = pipeline.extract().await.unwrap();
        assert_eq!(data.sellers[1].id, "seller_2");
    }

    #[tokio::test]
    async fn test_extract_rejects_non_array_collection() {
        let storage = MockStorage::new();
        storage
            .put(
                "data.json",
                serde_json::json!({"sellers": "nope", "products": [], "purchase_records": []}),
            )
            .await;
        let pipeline = ReportPipeline::new(storage, TestConfig::combined()).unwrap();

        assert!(matches!(
            pipeline.extract().await,
            Err(ReportError::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_policy_name_fails_construction() {
        let mut config = TestConfig::combined();
        config.revenue = "gross".to_string();

        assert!(matches!(
            ReportPipeline::new(MockStorage::new(), config),
            Err(ReportError::InvalidOptions { .. })
        ));
    }

    #[tokio::test]
    async fn test_transform_and_load_writes_selected_formats() {
        let storage = MockStorage::new();
        storage.put("data.json", dataset()).await;
        let mut config = TestConfig::combined();
        config.formats = vec!["csv".to_string()];
        let pipeline = ReportPipeline::new(storage.clone(), config).unwrap();

        let data = pipeline.extract().await.unwrap();
        let result = pipeline.transform(data).await.unwrap();

        assert_eq!(result.rows[0].seller_id, "seller_1");
        assert_eq!(result.rows[0].profit, 340.0);
        assert_eq!(result.rows[1].profit, 30.0);
        assert_eq!(result.summary.total_sellers, 2);

        let output_path = pipeline.load(result).await.unwrap();
        assert_eq!(output_path, "./out");

        let csv = storage.get_file(CSV_REPORT_FILE).await.unwrap();
        assert!(String::from_utf8(csv).unwrap().starts_with("seller_id,name"));
        assert!(storage.get_file(JSON_REPORT_FILE).await.is_none());
    }

    #[tokio::test]
    async fn test_load_with_compression() {
        let storage = MockStorage::new();
        storage.put("data.json", dataset()).await;
        let mut config = TestConfig::combined();
        config.compression = true;
        let pipeline = ReportPipeline::new(storage.clone(), config).unwrap();

        let data = pipeline.extract().await.unwrap();
        let result = pipeline.transform(data).await.unwrap();
        let output_path = pipeline.load(result).await.unwrap();

        assert_eq!(output_path, "./out/sales_report.zip");
        let zip_data = storage.get_file(ZIP_REPORT_FILE).await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 3);
        assert!(archive.by_name(SUMMARY_FILE).is_ok());
    }
}
