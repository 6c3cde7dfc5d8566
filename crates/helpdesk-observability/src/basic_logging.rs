use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format of the console layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// Reads `LOG_FORMAT`; `json` selects structured output, anything else is compact.
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Self::Json,
            _ => Self::Compact,
        }
    }
}

fn env_filter() -> EnvFilter {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "helpdesk={level},helpdesk_core={level},helpdesk_models={level}",
            level = log_level
        ))
    })
}

/// Initialize console logging.
///
/// # Configuration
///
/// - **Log Level**: `RUST_LOG` when set, otherwise `LOG_LEVEL` (default: "info")
///   applied to the help desk crates
/// - **Format**: `LOG_FORMAT=json` for one JSON object per event, compact otherwise
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_console_logging() {
    if let Err(e) = try_init_console_logging() {
        panic!("Failed to initialize logging: {}", e);
    }
}

/// Like [`init_console_logging`], but reports an already-installed subscriber
/// as an error instead of panicking.
pub fn try_init_console_logging() -> anyhow::Result<()> {
    let layer = match LogFormat::from_env() {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter())
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(env_filter())
            .boxed(),
    };

    tracing_subscriber::registry().with(layer).try_init()?;
    Ok(())
}
