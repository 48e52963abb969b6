use anyhow::Result;
use sales_report::config::toml_config::TomlConfig;
use sales_report::{CliConfig, LocalStorage, ReportEngine, ReportError, ReportPipeline, ReportRow};
use tempfile::TempDir;

fn sample_dataset() -> serde_json::Value {
    serde_json::json!({
        "sellers": [
            {"id": "seller_1", "first_name": "Alexey", "last_name": "Petrov", "start_date": "2024-02-01", "position": "Senior Seller"},
            {"id": "seller_2", "first_name": "Maria", "last_name": "Ivanova", "start_date": "2023-07-15", "position": "Seller"},
            {"id": "seller_3", "first_name": "Oleg"}
        ],
        "products": [
            {"name": "Coffee beans", "category": "Grocery", "sku": "SKU_001", "purchase_price": 100.0, "sale_price": 300.0},
            {"name": "Tea", "category": "Grocery", "sku": "SKU_002", "purchase_price": 20.0, "sale_price": 50.0}
        ],
        "purchase_records": [
            {
                "receipt_id": "receipt_1",
                "date": "2024-03-01",
                "seller_id": "seller_1",
                "customer_id": "customer_9",
                "items": [{"sku": "SKU_001", "discount": 10, "quantity": 2, "sale_price": 300.0}],
                "total_amount": 540.0,
                "total_discount": 60.0
            },
            {
                "receipt_id": "receipt_2",
                "seller_id": "seller_2",
                "items": [{"sku": "SKU_002", "discount": 0, "quantity": 4, "sale_price": 50.0}],
                "total_amount": 200.0
            },
            {
                "receipt_id": "receipt_3",
                "seller_id": "seller_404",
                "items": [{"sku": "SKU_001", "discount": 0, "quantity": 10, "sale_price": 300.0}],
                "total_amount": 3000.0
            }
        ]
    })
}

#[tokio::test]
async fn test_end_to_end_report_with_local_storage() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input_dir = temp_dir.path().join("input");
    let output_dir = temp_dir.path().join("output");
    std::fs::create_dir_all(&input_dir)?;
    std::fs::write(
        input_dir.join("data.json"),
        serde_json::to_vec(&sample_dataset())?,
    )?;

    let config = CliConfig {
        data: Some("data.json".to_string()),
        sellers: None,
        products: None,
        purchase_records: None,
        output_path: output_dir.to_str().unwrap().to_string(),
        formats: vec!["json".to_string(), "csv".to_string()],
        revenue_policy: "simple".to_string(),
        bonus_policy: "by_profit".to_string(),
        zip: false,
        verbose: false,
    };

    let storage = LocalStorage::new(output_dir.clone()).with_input_dir(input_dir);
    let pipeline = ReportPipeline::new(storage, config)?;
    let engine = ReportEngine::new(pipeline);

    let output_path = engine.run().await?;
    assert_eq!(output_path, output_dir.to_str().unwrap());

    let json = std::fs::read_to_string(output_dir.join("sales_report.json"))?;
    let rows: Vec<ReportRow> = serde_json::from_str(&json)?;

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].seller_id, "seller_1");
    assert_eq!(rows[0].name, "Alexey Petrov");
    assert_eq!(rows[0].revenue, 540.0);
    assert_eq!(rows[0].profit, 340.0);
    assert_eq!(rows[0].bonus, 51.0);

    assert_eq!(rows[1].seller_id, "seller_2");
    assert_eq!(rows[1].profit, 120.0);
    assert_eq!(rows[1].bonus, 12.0);

    // 沒有任何銷售的賣家仍出現在報表中
    assert_eq!(rows[2].seller_id, "seller_3");
    assert_eq!(rows[2].name, "Oleg ");
    assert_eq!(rows[2].sales_count, 0);
    assert_eq!(rows[2].profit, 0.0);
    assert!(rows[2].top_products.is_empty());

    let total_sales: u64 = rows.iter().map(|r| r.sales_count).sum();
    assert_eq!(total_sales, 2);

    let csv = std::fs::read_to_string(output_dir.join("sales_report.csv"))?;
    assert!(csv.starts_with("seller_id,name,revenue,profit,sales_count,bonus,top_products"));
    assert!(csv.contains("seller_1,Alexey Petrov,540.0,340.0,1,51.0,SKU_001:2"));

    Ok(())
}

#[tokio::test]
async fn test_toml_config_with_split_inputs_and_zip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = temp_dir.path().to_str().unwrap().replace('\\', "/");
    let dataset = sample_dataset();

    for field in ["sellers", "products", "purchase_records"] {
        std::fs::write(
            temp_dir.path().join(format!("{}.json", field)),
            serde_json::to_vec(&dataset[field])?,
        )?;
    }

    let config_content = format!(
        r#"
[report]
name = "split-zip"

[source]
base_dir = "{0}"
sellers = "sellers.json"
products = "products.json"
purchase_records = "purchase_records.json"

[load]
output_path = "{0}/out"
output_formats = ["json", "csv"]

[load.compression]
enabled = true
"#,
        temp_path
    );
    let config = TomlConfig::from_toml_str(&config_content)?;

    let storage = LocalStorage::new(config.load.output_path.clone()).with_input_dir(config.base_dir());
    let pipeline = ReportPipeline::new(storage, config)?;
    let output_path = ReportEngine::new(pipeline).run().await?;

    assert!(output_path.ends_with("sales_report.zip"));
    let zip_data = std::fs::read(temp_dir.path().join("out").join("sales_report.zip"))?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;

    let file_names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert!(file_names.contains(&"sales_report.json".to_string()));
    assert!(file_names.contains(&"sales_report.csv".to_string()));
    assert!(file_names.contains(&"summary.json".to_string()));

    let mut summary_file = archive.by_name("summary.json")?;
    let mut summary = String::new();
    std::io::Read::read_to_string(&mut summary_file, &mut summary)?;
    let summary: serde_json::Value = serde_json::from_str(&summary)?;
    assert_eq!(summary["total_sellers"], 3);
    assert_eq!(summary["total_sales"], 2);
    assert_eq!(summary["total_profit"], 460.0);

    Ok(())
}

#[tokio::test]
async fn test_empty_purchase_records_fail_the_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut dataset = sample_dataset();
    dataset["purchase_records"] = serde_json::json!([]);
    std::fs::write(temp_dir.path().join("data.json"), serde_json::to_vec(&dataset)?)?;

    let config = CliConfig {
        data: Some("data.json".to_string()),
        sellers: None,
        products: None,
        purchase_records: None,
        output_path: temp_dir.path().join("out").to_str().unwrap().to_string(),
        formats: vec!["json".to_string()],
        revenue_policy: "simple".to_string(),
        bonus_policy: "by_profit".to_string(),
        zip: false,
        verbose: false,
    };

    let storage = LocalStorage::new(temp_dir.path().join("out")).with_input_dir(temp_dir.path());
    let engine = ReportEngine::new(ReportPipeline::new(storage, config)?);

    let result = engine.run().await;
    assert!(matches!(result, Err(ReportError::InvalidInput { .. })));
    // 驗證失敗時不會產生任何輸出
    assert!(!temp_dir.path().join("out").exists());

    Ok(())
}
