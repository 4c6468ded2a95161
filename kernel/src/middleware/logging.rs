//! Tracing middleware.

use super::{BootstrapFn, Middleware};
use crate::bootstrapper::Bootstrapper;
use crate::context::Context;
use futures::FutureExt;
use std::sync::Arc;
use std::time::Instant;
use tracing::Level;

/// Logs every bootstrap call with its duration and outcome.
///
/// Events are emitted at `level` (DEBUG by default). Failures are always
/// reported at WARN.
#[derive(Clone, Debug)]
pub struct LoggingMiddleware {
    level: Level,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit the before/after events at `level` instead of DEBUG.
    pub fn with_level(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
        }
    }
}

// `tracing::event!` needs a constant level, so dispatch by hand.
macro_rules! event_at {
    ($level:expr, $($arg:tt)+) => {
        if $level == Level::ERROR {
            tracing::error!($($arg)+)
        } else if $level == Level::WARN {
            tracing::warn!($($arg)+)
        } else if $level == Level::INFO {
            tracing::info!($($arg)+)
        } else if $level == Level::DEBUG {
            tracing::debug!($($arg)+)
        } else {
            tracing::trace!($($arg)+)
        }
    };
}

impl Middleware for LoggingMiddleware {
    fn wrap(&self, bootstrapper: Arc<dyn Bootstrapper>, next: BootstrapFn) -> BootstrapFn {
        let level = self.level;
        let name: Arc<str> = Arc::from(bootstrapper.name());

        Arc::new(move |context: Option<Context>| {
            let name = Arc::clone(&name);
            let next = Arc::clone(&next);
            async move {
                event_at!(
                    level,
                    bootstrapper = %name,
                    absent_context = context.is_none(),
                    "Bootstrapping"
                );
                let started = Instant::now();

                let result = next(context).await;
                let elapsed_ms = started.elapsed().as_millis() as u64;

                match &result {
                    Ok(context) => event_at!(
                        level,
                        bootstrapper = %name,
                        elapsed_ms,
                        keys = context.len(),
                        "Bootstrapped"
                    ),
                    Err(e) => tracing::warn!(
                        bootstrapper = %name,
                        elapsed_ms,
                        "Bootstrap failed: {}",
                        e
                    ),
                }

                result
            }
            .boxed()
        })
    }
}
