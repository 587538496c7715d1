use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Cache counters for structured logging.
///
/// Shared by every call of one memoized function; all operations are
/// atomic and lock-free.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    writes: AtomicU64,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result served from disk
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a result that had to be computed
    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a file written to disk
    pub fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> u64 {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Get total cache lookups (hits + misses)
    pub fn total_cache_lookups(&self) -> u64 {
        self.cache_hits() + self.cache_misses()
    }

    /// Get cache hit rate as a percentage (0.0-100.0)
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.total_cache_lookups();
        if total == 0 {
            0.0
        } else {
            (self.cache_hits() as f64 / total as f64) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
        self.writes.store(0, Ordering::Relaxed);
    }
}

/// Log cache metrics at debug level.
///
/// Usage:
/// ```rust,ignore
/// let metrics = CacheMetrics::new();
/// // ... record some lookups ...
/// log_cache_metrics!(&metrics, "slow_computation");
/// ```
#[macro_export]
macro_rules! log_cache_metrics {
    ($metrics:expr, $name:expr) => {
        tracing::debug!(
            function = $name,
            cache_hits = $metrics.cache_hits(),
            cache_misses = $metrics.cache_misses(),
            writes = $metrics.writes(),
            cache_hit_rate = $metrics.cache_hit_rate(),
            "cache_metrics"
        );
    };
}

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "compute");
/// // Or with additional fields:
/// trace_time!(start, "compute", function = name);
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Initialize structured logging based on CLI arguments
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (true, None) => "tidypath=debug,tidypath_core=debug",
        (false, None) => "tidypath=warn,tidypath_core=warn",
        (_, Some(level)) => return init_with_level(level, log_json),
    };

    init_with_level(level, log_json)
}

fn init_with_level(level: &str, log_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    // TIDYPATH_LOG overrides the CLI level, RUST_LOG overrides both
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("TIDYPATH_LOG"))
        .unwrap_or_else(|_| {
            EnvFilter::new(if level.contains('=') {
                level.to_string()
            } else {
                format!("tidypath={0},tidypath_core={0}", level)
            })
        });

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(
                        tracing_subscriber::fmt::format::FmtSpan::NEW
                            | tracing_subscriber::fmt::format::FmtSpan::CLOSE,
                    ),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}
