//! Simple kernel: boot an ordered list of bootstrappers.
//!
//! A [`Kernel`] runs each registered [`Bootstrapper`] strictly in order,
//! threading a [`Context`] from one to the next. Optional [`Middleware`]s
//! decorate every bootstrap call. `boot()` resolves with the context
//! returned by the last bootstrapper, or with the first error.
//!
//! ```ignore
//! use simple_kernel::{FnBootstrapper, Kernel, KernelOptions};
//!
//! let kernel = Kernel::new(KernelOptions::new(vec![
//!     Arc::new(FnBootstrapper::new("config", |ctx| {
//!         Ok(ctx.unwrap_or_default().with("config", "loaded"))
//!     })),
//!     Arc::new(FnBootstrapper::new("database", |ctx| {
//!         Ok(ctx.unwrap_or_default().with("database", "connected"))
//!     })),
//! ]))?;
//!
//! let context = kernel.boot().await?;
//! ```

pub mod bootstrapper;
pub mod context;
pub mod kernel;
pub mod middleware;

pub use bootstrapper::{AsyncFnBootstrapper, Bootstrapper, FnBootstrapper};
pub use context::Context;
pub use kernel::{Kernel, KernelBuilder, KernelOptions, SimpleKernel};
pub use middleware::{BootstrapFn, LoggingMiddleware, Middleware, apply_middlewares};
pub use simple_kernel_shared::errors::{KernelError, KernelResult};

// Re-exported so bootstrapper implementors don't need their own dependency.
pub use async_trait::async_trait;
