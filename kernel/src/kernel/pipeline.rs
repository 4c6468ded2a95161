//! Sequential boot pipeline.
//!
//! One stage per bootstrapper, run strictly in order:
//!
//! ```text
//! initial ──→ stage 0 ──→ stage 1 ──→ ... ──→ stage N-1 ──→ result
//! ```
//!
//! Before each stage an empty running context is replaced by `None`, so
//! whichever stage first sees an empty context may inject its default.
//! The first error stops the pipeline and is returned as-is.

use crate::bootstrapper::Bootstrapper;
use crate::context::Context;
use crate::middleware::{BootstrapFn, Middleware, apply_middlewares};
use simple_kernel_shared::errors::KernelResult;
use std::sync::Arc;
use std::time::Instant;

struct Stage {
    name: String,
    run: BootstrapFn,
}

pub(crate) struct BootPipeline {
    stages: Vec<Stage>,
    initial_context: Context,
}

impl BootPipeline {
    /// Build the stages, wrapping each bootstrapper with `middlewares`.
    pub(crate) fn new(
        bootstrappers: &[Arc<dyn Bootstrapper>],
        middlewares: &[Arc<dyn Middleware>],
        initial_context: Context,
    ) -> Self {
        let stages = bootstrappers
            .iter()
            .map(|bootstrapper| Stage {
                name: bootstrapper.name().to_string(),
                run: apply_middlewares(bootstrapper, middlewares),
            })
            .collect();

        Self {
            stages,
            initial_context,
        }
    }

    pub(crate) async fn run(self) -> KernelResult<Context> {
        let total = self.stages.len();
        let started = Instant::now();
        tracing::info!(stages = total, "Booting kernel");

        let mut context = self.initial_context;
        for (index, stage) in self.stages.into_iter().enumerate() {
            let input = if context.is_empty() {
                None
            } else {
                Some(context)
            };

            tracing::debug!(
                stage = index,
                bootstrapper = %stage.name,
                absent_context = input.is_none(),
                "Running bootstrap stage"
            );

            context = (stage.run)(input).await.inspect_err(|e| {
                tracing::warn!(
                    stage = index,
                    bootstrapper = %stage.name,
                    "Bootstrap stage failed, skipping {} remaining: {}",
                    total - index - 1,
                    e
                );
            })?;
        }

        tracing::info!(
            stages = total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Kernel booted"
        );
        Ok(context)
    }
}
