use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_directive(verbose: bool, level: Option<&str>) -> String {
    match (level, verbose) {
        (Some(level), _) => format!("sales_report={}", level),
        (None, true) => "sales_report=debug,info".to_string(),
        (None, false) => "sales_report=info".to_string(),
    }
}

fn build_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, level)))
}

pub fn init_cli_logger(verbose: bool) {
    init_logger(verbose, None, false);
}

/// `level` 覆蓋預設等級；`json` 改用 JSON 格式輸出（便於日誌收集）
pub fn init_logger(verbose: bool, level: Option<&str>, json: bool) {
    let filter = build_filter(verbose, level);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false, None), "sales_report=info");
        assert_eq!(default_directive(true, None), "sales_report=debug,info");
        assert_eq!(default_directive(true, Some("trace")), "sales_report=trace");
    }
}
