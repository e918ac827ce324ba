//! Forgemint VM - the execution surface around transaction processing.
//!
//! This crate provides:
//! - Block and execution contexts
//! - Gas schedule, intrinsic gas and gas tracking
//! - Tracer hooks for call start/end
//! - The `Executor` seam for external bytecode interpreters

pub mod error;
pub mod gas_metering;
pub mod context;
pub mod tracer;
pub mod executor;

pub use error::VmError;
pub use gas_metering::{GasSchedule, GasTracker};
pub use context::{BlockContext, ExecutionContext};
pub use tracer::{CallFrame, CallRecorder, Tracer};
pub use executor::{ExecutionResult, Executor, NullExecutor};

/// Maximum contract code size (24 KB)
pub const MAX_CODE_SIZE: usize = 24 * 1024;
