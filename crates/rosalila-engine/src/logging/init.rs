use std::sync::Once;

/// Logger settings.
///
/// `env_filter` uses the `env_logger` directive syntax, e.g.
/// `"rosalila_engine=debug,wgpu=warn"`. When unset, `RUST_LOG` is consulted,
/// then `level` applies.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.write_style(config.write_style);

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(config.level);
                // wgpu's info output is per-object noise.
                for module in ["wgpu_core", "wgpu_hal", "naga"] {
                    builder.filter_module(module, log::LevelFilter::Warn);
                }
            }
        }

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
