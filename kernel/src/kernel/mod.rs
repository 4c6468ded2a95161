//! Kernel: holds bootstrappers and boots them in order.
//!
//! ## Architecture
//!
//! ```text
//! KernelOptions ──→ Kernel::new ──→ Kernel
//!                                     │ boot()
//!                                     ▼
//!                     BootPipeline (one stage per bootstrapper,
//!                                   each wrapped by middlewares)
//! ```

mod options;
mod pipeline;

pub use options::KernelOptions;

use crate::bootstrapper::Bootstrapper;
use crate::context::Context;
use crate::middleware::Middleware;
use async_trait::async_trait;
use pipeline::BootPipeline;
use simple_kernel_shared::errors::{KernelError, KernelResult};
use std::fmt;
use std::sync::Arc;

/// Anything that exposes registered bootstrappers and can boot them.
#[async_trait]
pub trait SimpleKernel: Send + Sync {
    /// Registered bootstrappers, in the order they run.
    fn get_bootstrappers(&self) -> &[Arc<dyn Bootstrapper>];

    /// Run every bootstrapper in order and return the final context.
    async fn boot(&self) -> KernelResult<Context>;
}

/// Sequential bootstrapper kernel.
///
/// Cloning is cheap and clones share the same bootstrappers.
#[derive(Clone)]
pub struct Kernel {
    bootstrappers: Arc<[Arc<dyn Bootstrapper>]>,
    middlewares: Arc<[Arc<dyn Middleware>]>,
    initial_context: Context,
}

impl Kernel {
    /// Create a kernel from options.
    ///
    /// Fails with [`KernelError::InvalidArgument`] when no bootstrapper
    /// sequence was supplied. An empty sequence is fine.
    pub fn new(options: KernelOptions) -> KernelResult<Self> {
        let KernelOptions {
            bootstrappers,
            middlewares,
            initial_context,
        } = options;

        let bootstrappers = bootstrappers.ok_or_else(|| {
            KernelError::InvalidArgument(
                "Expected bootstrappers to be a sequence, but got: none".to_string(),
            )
        })?;

        tracing::debug!(
            bootstrappers = bootstrappers.len(),
            middlewares = middlewares.len(),
            "Kernel created"
        );

        Ok(Self {
            bootstrappers: bootstrappers.into(),
            middlewares: middlewares.into(),
            initial_context,
        })
    }

    pub fn builder() -> KernelBuilder {
        KernelBuilder::default()
    }

    /// Registered bootstrappers, exactly as supplied.
    pub fn get_bootstrappers(&self) -> &[Arc<dyn Bootstrapper>] {
        &self.bootstrappers
    }

    pub fn middlewares(&self) -> &[Arc<dyn Middleware>] {
        &self.middlewares
    }

    pub fn initial_context(&self) -> &Context {
        &self.initial_context
    }

    /// Boot the kernel.
    ///
    /// Runs bootstrappers one after another, each one starting only after
    /// the previous one finished. Resolves with the context returned by the
    /// last bootstrapper, or with the first error unchanged. Every call
    /// starts again from the initial context.
    pub async fn boot(&self) -> KernelResult<Context> {
        BootPipeline::new(
            &self.bootstrappers,
            &self.middlewares,
            self.initial_context.clone(),
        )
        .run()
        .await
    }
}

#[async_trait]
impl SimpleKernel for Kernel {
    fn get_bootstrappers(&self) -> &[Arc<dyn Bootstrapper>] {
        Kernel::get_bootstrappers(self)
    }

    async fn boot(&self) -> KernelResult<Context> {
        Kernel::boot(self).await
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field(
                "bootstrappers",
                &self.bootstrappers.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .field("middlewares", &self.middlewares.len())
            .field("initial_context", &self.initial_context)
            .finish()
    }
}

/// Fluent construction of a [`Kernel`].
///
/// # Example
///
/// ```ignore
/// let kernel = Kernel::builder()
///     .bootstrapper(Arc::new(ConfigBootstrapper))
///     .bootstrapper(Arc::new(DatabaseBootstrapper))
///     .middleware(Arc::new(LoggingMiddleware::new()))
///     .build()?;
///
/// let context = kernel.boot().await?;
/// ```
#[derive(Default)]
pub struct KernelBuilder {
    options: KernelOptions,
}

impl KernelBuilder {
    /// Append one bootstrapper.
    pub fn bootstrapper(mut self, bootstrapper: Arc<dyn Bootstrapper>) -> Self {
        self.options
            .bootstrappers
            .get_or_insert_with(Vec::new)
            .push(bootstrapper);
        self
    }

    /// Replace the bootstrapper sequence.
    pub fn bootstrappers(mut self, bootstrappers: Vec<Arc<dyn Bootstrapper>>) -> Self {
        self.options.bootstrappers = Some(bootstrappers);
        self
    }

    /// Append one middleware.
    pub fn middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.options.middlewares.push(middleware);
        self
    }

    /// Replace the middleware sequence.
    pub fn middlewares(mut self, middlewares: Vec<Arc<dyn Middleware>>) -> Self {
        self.options.middlewares = middlewares;
        self
    }

    pub fn initial_context(mut self, context: Context) -> Self {
        self.options.initial_context = context;
        self
    }

    pub fn build(self) -> KernelResult<Kernel> {
        Kernel::new(self.options)
    }
}
