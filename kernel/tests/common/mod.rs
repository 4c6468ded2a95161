//! Shared fixtures for kernel integration tests.

#![allow(dead_code)]

use simple_kernel::{AsyncFnBootstrapper, Bootstrapper, Context, FnBootstrapper, KernelResult};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a test subscriber once. Respects RUST_LOG, defaults to debug.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_test_writer())
        .try_init();
}

/// Shared event log for asserting execution order.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Bootstrapper that merges `key: true` into the context.
pub fn merging(key: &'static str) -> Arc<dyn Bootstrapper> {
    Arc::new(FnBootstrapper::new(key, move |ctx: Option<Context>| {
        Ok(ctx.unwrap_or_default().with(key, true))
    }))
}

/// Like [`merging`], but supplies `default_key: true` when the context is absent.
pub fn merging_with_default(key: &'static str, default_key: &'static str) -> Arc<dyn Bootstrapper> {
    Arc::new(FnBootstrapper::new(key, move |ctx: Option<Context>| {
        let ctx = ctx.unwrap_or_else(|| Context::new().with(default_key, true));
        Ok(ctx.with(key, true))
    }))
}

/// Async bootstrapper that sleeps for `delay`, logging start and end.
pub fn sleeping(name: &'static str, delay: Duration, log: EventLog) -> Arc<dyn Bootstrapper> {
    Arc::new(AsyncFnBootstrapper::new(name, move |ctx: Option<Context>| {
        let log = log.clone();
        async move {
            log.push(format!("{name}:start"));
            tokio::time::sleep(delay).await;
            log.push(format!("{name}:end"));
            KernelResult::Ok(ctx.unwrap_or_default().with(name, true))
        }
    }))
}
