//! Process-wide tracing setup and per-request correlation IDs.
//!
//! Every HTTP request runs inside a [`TraceContext`] scope installed by the
//! server middleware; error payloads read the correlation ID back through
//! [`current_trace_id`] so a guest-facing failure can be matched to its logs.

use std::sync::atomic::{AtomicBool, Ordering};

use log::LevelFilter;
use thiserror::Error;
use tokio::task_local;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::Layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::config::AppConfig;

/// Correlation metadata carried across one request's task tree.
#[derive(Debug, Clone)]
pub struct TraceContext {
    pub trace_id: String,
}

task_local! {
    static REQUEST_TRACE: TraceContext;
}

#[derive(Debug, Error)]
pub enum TelemetryInitError {
    #[error("failed to install log tracer bridge: {0}")]
    LogTracer(#[from] log::SetLoggerError),
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] TryInitError),
}

static TRACING_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Installs the global subscriber once at startup. `log::` macros emitted by
/// dependencies are bridged into the same pipeline. A second call is a no-op.
pub fn init_tracing(config: &AppConfig) -> Result<(), TelemetryInitError> {
    if TRACING_INSTALLED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Ok(());
    }

    LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let fmt_layer = match config.log_format.as_str() {
        "pretty" => fmt::layer().pretty().boxed(),
        _ => fmt::layer().json().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .inspect_err(|_| TRACING_INSTALLED.store(false, Ordering::SeqCst))?;

    Ok(())
}

/// Runs `future` with `context` as the active trace context.
pub async fn with_trace_context<Fut, R>(context: TraceContext, future: Fut) -> R
where
    Fut: std::future::Future<Output = R>,
{
    REQUEST_TRACE.scope(context, future).await
}

/// The trace ID of the enclosing request scope, or `None` outside one.
pub fn current_trace_id() -> Option<String> {
    REQUEST_TRACE.try_with(|ctx| ctx.trace_id.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trace_id_is_visible_only_inside_its_scope() {
        assert_eq!(current_trace_id(), None);

        let context = TraceContext {
            trace_id: "req-42".to_string(),
        };
        let seen = with_trace_context(context, async { current_trace_id() }).await;
        assert_eq!(seen.as_deref(), Some("req-42"));

        assert_eq!(current_trace_id(), None);
    }
}
