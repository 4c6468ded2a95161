//! Configuration for a kernel.

use crate::bootstrapper::Bootstrapper;
use crate::context::Context;
use crate::middleware::Middleware;
use std::fmt;
use std::sync::Arc;

/// Options a [`Kernel`](super::Kernel) is constructed from.
///
/// `bootstrappers` must be set; the default value leaves it absent and is
/// rejected by `Kernel::new`.
#[derive(Clone, Default)]
pub struct KernelOptions {
    /// Bootstrappers to run, in order.
    pub bootstrappers: Option<Vec<Arc<dyn Bootstrapper>>>,

    /// Decorators applied around every bootstrap call. The first entry is
    /// the outermost wrapper.
    pub middlewares: Vec<Arc<dyn Middleware>>,

    /// Context the first step starts from.
    ///
    /// Default: empty, so the first bootstrapper sees an absent context.
    pub initial_context: Context,
}

impl KernelOptions {
    /// Options with the given bootstrappers and nothing else.
    pub fn new(bootstrappers: Vec<Arc<dyn Bootstrapper>>) -> Self {
        Self {
            bootstrappers: Some(bootstrappers),
            ..Default::default()
        }
    }
}

impl fmt::Debug for KernelOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self
            .bootstrappers
            .as_ref()
            .map(|list| list.iter().map(|b| b.name()).collect::<Vec<_>>());

        f.debug_struct("KernelOptions")
            .field("bootstrappers", &names)
            .field("middlewares", &self.middlewares.len())
            .field("initial_context", &self.initial_context)
            .finish()
    }
}
