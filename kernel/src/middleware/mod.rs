//! Middleware: decorators around a bootstrap step.
//!
//! ## Composition
//!
//! Middlewares are applied in listed order, first one outermost:
//!
//! ```text
//! middlewares = [A, B]
//!
//! A ──→ B ──→ bootstrapper.bootstrap ──→ B ──→ A
//!      (before)                        (after)
//! ```
//!
//! The fold runs over the list reversed, so the last middleware wraps the
//! raw bootstrap operation and the first one wraps everything else.

mod logging;

pub use logging::LoggingMiddleware;

use crate::bootstrapper::Bootstrapper;
use crate::context::Context;
use futures::FutureExt;
use futures::future::BoxFuture;
use simple_kernel_shared::errors::KernelResult;
use std::sync::Arc;

/// Type-erased bootstrap operation.
///
/// This is what a middleware receives as `next` and what it must return.
/// Cloning is cheap; the closure is shared.
pub type BootstrapFn =
    Arc<dyn Fn(Option<Context>) -> BoxFuture<'static, KernelResult<Context>> + Send + Sync>;

/// Decorator around a bootstrap step.
///
/// A middleware gets the bootstrapper being wrapped (for naming, filtering
/// and so on) and the `next` operation, and returns the operation the
/// kernel should call instead.
///
/// Any `Fn(Arc<dyn Bootstrapper>, BootstrapFn) -> BootstrapFn` closure is a
/// middleware.
pub trait Middleware: Send + Sync {
    fn wrap(&self, bootstrapper: Arc<dyn Bootstrapper>, next: BootstrapFn) -> BootstrapFn;
}

impl<F> Middleware for F
where
    F: Fn(Arc<dyn Bootstrapper>, BootstrapFn) -> BootstrapFn + Send + Sync,
{
    fn wrap(&self, bootstrapper: Arc<dyn Bootstrapper>, next: BootstrapFn) -> BootstrapFn {
        self(bootstrapper, next)
    }
}

/// Turn a bootstrapper into a bare [`BootstrapFn`] with no decorators.
pub fn bootstrap_fn(bootstrapper: &Arc<dyn Bootstrapper>) -> BootstrapFn {
    let bootstrapper = Arc::clone(bootstrapper);
    Arc::new(move |context: Option<Context>| {
        let bootstrapper = Arc::clone(&bootstrapper);
        async move { bootstrapper.bootstrap(context).await }.boxed()
    })
}

/// Wrap a bootstrapper's bootstrap operation with `middlewares`.
///
/// The first middleware in the list becomes the outermost wrapper. With no
/// middlewares this is the bootstrapper's own operation.
pub fn apply_middlewares(
    bootstrapper: &Arc<dyn Bootstrapper>,
    middlewares: &[Arc<dyn Middleware>],
) -> BootstrapFn {
    middlewares
        .iter()
        .rev()
        .fold(bootstrap_fn(bootstrapper), |next, middleware| {
            middleware.wrap(Arc::clone(bootstrapper), next)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrapper::FnBootstrapper;
    use serde_json::json;
    use std::sync::Mutex;

    fn recording(label: &'static str, log: Arc<Mutex<Vec<String>>>) -> Arc<dyn Middleware> {
        Arc::new(
            move |_bootstrapper: Arc<dyn Bootstrapper>, next: BootstrapFn| -> BootstrapFn {
                let log = Arc::clone(&log);
                Arc::new(move |context: Option<Context>| {
                    let log = Arc::clone(&log);
                    let next = Arc::clone(&next);
                    async move {
                        log.lock().unwrap().push(format!("{label}:before"));
                        let result = next(context).await;
                        log.lock().unwrap().push(format!("{label}:after"));
                        result
                    }
                    .boxed()
                })
            },
        )
    }

    fn echo() -> Arc<dyn Bootstrapper> {
        Arc::new(FnBootstrapper::new("echo", |ctx: Option<Context>| {
            Ok(ctx.unwrap_or_default().with("echo", true))
        }))
    }

    #[tokio::test]
    async fn test_no_middlewares_calls_bootstrapper_directly() {
        let op = apply_middlewares(&echo(), &[]);
        let out = op(None).await.unwrap();
        assert_eq!(out.get("echo"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn test_first_middleware_is_outermost() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let middlewares = vec![
            recording("a", Arc::clone(&log)),
            recording("b", Arc::clone(&log)),
        ];

        let op = apply_middlewares(&echo(), &middlewares);
        op(None).await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["a:before", "b:before", "b:after", "a:after"]
        );
    }

    #[tokio::test]
    async fn test_middleware_sees_wrapped_bootstrapper() {
        let seen = Arc::new(Mutex::new(None));
        let seen_clone = Arc::clone(&seen);
        let middleware: Arc<dyn Middleware> = Arc::new(
            move |bootstrapper: Arc<dyn Bootstrapper>, next: BootstrapFn| -> BootstrapFn {
                *seen_clone.lock().unwrap() = Some(bootstrapper.name().to_string());
                next
            },
        );

        apply_middlewares(&echo(), &[middleware]);
        assert_eq!(seen.lock().unwrap().as_deref(), Some("echo"));
    }
}
