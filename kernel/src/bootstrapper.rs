//! Bootstrapper abstraction.
//!
//! A bootstrapper is one startup step. It receives the running context
//! (or `None` when the context is still empty) and returns the context the
//! next step should see.
//!
//! # Example
//!
//! ```ignore
//! use simple_kernel::{Bootstrapper, Context, KernelResult};
//!
//! struct DatabaseBootstrapper;
//!
//! #[async_trait]
//! impl Bootstrapper for DatabaseBootstrapper {
//!     async fn bootstrap(&self, context: Option<Context>) -> KernelResult<Context> {
//!         let context = context.unwrap_or_else(|| Context::new().with("env", "dev"));
//!         Ok(context.with("database", "connected"))
//!     }
//! }
//! ```

use crate::context::Context;
use async_trait::async_trait;
use simple_kernel_shared::errors::KernelResult;
use std::future::Future;

/// A context-transforming startup step.
///
/// Implementations are treated as stateless by the kernel: the same
/// bootstrapper may be run again on every `boot()`.
#[async_trait]
pub trait Bootstrapper: Send + Sync {
    /// Run the step.
    ///
    /// `context` is `None` when the running context is empty, which gives
    /// the bootstrapper a chance to supply its own default.
    async fn bootstrap(&self, context: Option<Context>) -> KernelResult<Context>;

    /// Name used in logs and by middlewares.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Bootstrapper backed by a synchronous closure.
pub struct FnBootstrapper<F> {
    name: String,
    func: F,
}

impl<F> FnBootstrapper<F>
where
    F: Fn(Option<Context>) -> KernelResult<Context> + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

#[async_trait]
impl<F> Bootstrapper for FnBootstrapper<F>
where
    F: Fn(Option<Context>) -> KernelResult<Context> + Send + Sync,
{
    async fn bootstrap(&self, context: Option<Context>) -> KernelResult<Context> {
        (self.func)(context)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Bootstrapper backed by a closure returning a future.
pub struct AsyncFnBootstrapper<F> {
    name: String,
    func: F,
}

impl<F, Fut> AsyncFnBootstrapper<F>
where
    F: Fn(Option<Context>) -> Fut + Send + Sync,
    Fut: Future<Output = KernelResult<Context>> + Send + 'static,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

#[async_trait]
impl<F, Fut> Bootstrapper for AsyncFnBootstrapper<F>
where
    F: Fn(Option<Context>) -> Fut + Send + Sync,
    Fut: Future<Output = KernelResult<Context>> + Send + 'static,
{
    async fn bootstrap(&self, context: Option<Context>) -> KernelResult<Context> {
        (self.func)(context).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
