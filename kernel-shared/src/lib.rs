//! Types shared between the kernel and the bootstrappers it runs.

pub mod errors;

pub use errors::{KernelError, KernelResult};
