//! Bytecode execution seam.
//!
//! The general-purpose interpreter lives outside this workspace. The state
//! transition hands it the call through `Executor`; everything before and
//! after the call (nonce, gas purchase, value transfer, fees, revert) stays
//! in the driver.

use crate::context::ExecutionContext;
use crate::error::VmError;
use bytes::Bytes;
use forgemint_types::{Address, U256};

/// Result of running contract code.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    /// Whether execution succeeded
    pub success: bool,
    /// Return data (revert data on failure)
    pub data: Bytes,
    /// Gas used by the call itself, excluding intrinsic gas
    pub gas_used: u64,
    /// Why the call failed
    pub error: Option<VmError>,
}

impl ExecutionResult {
    /// Create a successful result.
    pub fn success(data: Bytes, gas_used: u64) -> Self {
        Self {
            success: true,
            data,
            gas_used,
            error: None,
        }
    }

    /// Create a failed result.
    pub fn failure(error: VmError, gas_used: u64) -> Self {
        let data = match &error {
            VmError::Reverted { reason: Some(reason) } => Bytes::from(reason.clone()),
            _ => Bytes::new(),
        };
        Self {
            success: false,
            data,
            gas_used,
            error: Some(error),
        }
    }
}

/// Runs the code of `address` on behalf of `caller`.
///
/// Value has already been moved when this is called. Implementations must
/// not report more than `gas` as used.
pub trait Executor {
    fn call(
        &mut self,
        ctx: &mut ExecutionContext<'_>,
        caller: Address,
        address: Address,
        input: &[u8],
        value: U256,
        gas: u64,
    ) -> ExecutionResult;
}

/// Executor for nodes without a bytecode interpreter: every call into code
/// reverts without consuming gas.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullExecutor;

impl Executor for NullExecutor {
    fn call(
        &mut self,
        ctx: &mut ExecutionContext<'_>,
        caller: Address,
        address: Address,
        input: &[u8],
        _value: U256,
        _gas: u64,
    ) -> ExecutionResult {
        tracing::debug!(
            %caller,
            %address,
            block = ctx.block_number(),
            input_len = input.len(),
            "No bytecode interpreter configured, reverting call"
        );
        ExecutionResult::failure(VmError::Reverted { reason: None }, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BlockContext;
    use forgemint_state::MemoryState;

    #[test]
    fn test_execution_result_success() {
        let data = Bytes::from(vec![0x01, 0x02]);
        let result = ExecutionResult::success(data.clone(), 50_000);

        assert!(result.success);
        assert_eq!(result.data, data);
        assert_eq!(result.gas_used, 50_000);
    }

    #[test]
    fn test_execution_result_failure_keeps_revert_data() {
        let result = ExecutionResult::failure(
            VmError::Reverted {
                reason: Some(vec![0xde, 0xad]),
            },
            90,
        );

        assert!(!result.success);
        assert_eq!(result.gas_used, 90);
        assert_eq!(result.data, Bytes::from(vec![0xde, 0xad]));
    }

    #[test]
    fn test_null_executor_reverts() {
        let block = BlockContext::new(1, Address::ZERO);
        let mut state = MemoryState::new();
        let mut ctx = ExecutionContext::new(&block, &mut state);

        let result = NullExecutor.call(
            &mut ctx,
            Address::ZERO,
            Address::from_bytes([9u8; 20]),
            &[1, 2, 3],
            U256::ZERO,
            100_000,
        );
        assert!(!result.success);
        assert_eq!(result.gas_used, 0);
        assert_eq!(result.error, Some(VmError::Reverted { reason: None }));
    }
}
