use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

fn default_directive(level: &str, extra: Option<&str>) -> String {
    match extra {
        Some(extra) => format!("asset_intake={},{}", level, extra),
        None => format!("asset_intake={}", level),
    }
}

/// `RUST_LOG` 優先，否則使用 `asset_intake=<level>` 加上額外指令
fn intake_filter(level: &str, extra: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level, extra)))
}

fn init_logger(filter: EnvFilter, format: LogFormat) {
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}

pub fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        intake_filter("debug", Some("info"))
    } else {
        intake_filter("info", None)
    };
    init_logger(filter, LogFormat::Compact);
}

/// JSON 格式日誌，給 log 收集器使用
pub fn init_json_logger(level: &str) {
    init_logger(intake_filter(level, None), LogFormat::Json);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("info", None), "asset_intake=info");
        assert_eq!(
            default_directive("debug", Some("info")),
            "asset_intake=debug,info"
        );
    }
}
