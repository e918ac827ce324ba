//! Per-transaction state transition.
//!
//! Order of operations for a message:
//! 1. pre-checks (nonce, intrinsic gas, funds); failing any of them makes
//!    the block invalid
//! 2. buy gas: `gas_limit * gas_price` is taken from the sender
//! 3. charge intrinsic gas
//! 4. mint instruction, or ordinary call through the `Executor`
//! 5. refund unused gas to the sender and pay the fee to the fee collector
//!    (or the block coinbase)

use crate::error::CoreError;
use crate::mint;
use bytes::Bytes;
use forgemint_types::{Address, ChainConfig, Message, U256};
use forgemint_vm::{ExecutionContext, Executor, GasTracker, VmError};
use tracing::debug;

/// Result of a message that made it into the block.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutcome {
    /// Total gas charged, intrinsic gas included
    pub gas_used: u64,
    /// Execution failure, `None` on success
    pub error: Option<VmError>,
    /// Return or revert data
    pub return_data: Bytes,
    /// Whether the message was handled as a mint instruction
    pub minted: bool,
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Revert data, if the call reverted with any
    pub fn revert_reason(&self) -> Option<Vec<u8>> {
        match &self.error {
            Some(VmError::Reverted { .. }) if !self.return_data.is_empty() => {
                Some(self.return_data.to_vec())
            }
            _ => None,
        }
    }
}

/// Applies messages to state for one chain configuration.
pub struct StateTransition<'c> {
    config: &'c ChainConfig,
}

impl<'c> StateTransition<'c> {
    pub fn new(config: &'c ChainConfig) -> Self {
        Self { config }
    }

    /// Apply `msg` to the context's state.
    pub fn apply_message(
        &self,
        ctx: &mut ExecutionContext<'_>,
        executor: &mut dyn Executor,
        msg: &Message,
    ) -> Result<ExecutionOutcome, CoreError> {
        let gas_cost = self.pre_check(ctx, msg)?;

        ctx.state.sub_balance(&msg.from, gas_cost)?;
        let mut gas = GasTracker::new(msg.gas_limit);
        gas.charge(ctx.schedule.intrinsic_gas(&msg.data, msg.is_create()))?;

        let instruction = match msg.to {
            Some(to) => mint::parse(ctx, &msg.from, &to, &msg.data),
            None => None,
        };

        let (error, return_data, minted) = match instruction {
            Some(instruction) => {
                let error = self.apply_mint(ctx, &mut gas, instruction)?;
                (error, Bytes::new(), true)
            }
            None => {
                let (error, data) = self.call(ctx, executor, &mut gas, msg)?;
                (error, data, false)
            }
        };

        self.settle_fees(ctx, msg, &gas)?;

        debug!(
            from = %msg.from,
            nonce = msg.nonce,
            gas_used = gas.used(),
            minted,
            failed = error.is_some(),
            "Applied message"
        );

        Ok(ExecutionOutcome {
            gas_used: gas.used(),
            error,
            return_data,
            minted,
        })
    }

    /// Returns the up-front gas cost.
    fn pre_check(&self, ctx: &ExecutionContext<'_>, msg: &Message) -> Result<U256, CoreError> {
        let expected = ctx.state.get_nonce(&msg.from);
        if msg.nonce != expected {
            return Err(CoreError::InvalidNonce {
                address: msg.from,
                expected,
                got: msg.nonce,
            });
        }

        if msg.nonce == u64::MAX {
            return Err(CoreError::NonceMax {
                address: msg.from,
                nonce: msg.nonce,
            });
        }

        let intrinsic = ctx.schedule.intrinsic_gas(&msg.data, msg.is_create());
        if intrinsic > msg.gas_limit {
            return Err(CoreError::IntrinsicGas {
                intrinsic,
                limit: msg.gas_limit,
            });
        }

        let have = ctx.state.get_balance(&msg.from);
        let gas_cost = U256::from(msg.gas_limit).checked_mul(&msg.gas_price);
        let need = gas_cost.and_then(|cost| cost.checked_add(&msg.value));
        match (gas_cost, need) {
            (Some(cost), Some(need)) if have >= need => Ok(cost),
            (_, need) => Err(CoreError::InsufficientFunds {
                address: msg.from,
                have,
                need: need.unwrap_or(U256::MAX),
            }),
        }
    }

    fn apply_mint(
        &self,
        ctx: &mut ExecutionContext<'_>,
        gas: &mut GasTracker,
        instruction: mint::Instruction,
    ) -> Result<Option<VmError>, CoreError> {
        let available = gas.remaining();
        if let Err(err) = gas.charge(ctx.schedule.mint) {
            let sender = *instruction.sender();
            let nonce = ctx.state.get_nonce(&sender);
            ctx.state.set_nonce(&sender, nonce + 1);
            gas.exhaust();
            return Ok(Some(err));
        }

        instruction.apply(ctx, available)?;
        Ok(None)
    }

    fn call(
        &self,
        ctx: &mut ExecutionContext<'_>,
        executor: &mut dyn Executor,
        gas: &mut GasTracker,
        msg: &Message,
    ) -> Result<(Option<VmError>, Bytes), CoreError> {
        ctx.state.set_nonce(&msg.from, msg.nonce + 1);

        let to = msg.to.unwrap_or(Address::ZERO);
        let available = gas.remaining();
        if let Some(tracer) = ctx.tracer.as_deref_mut() {
            tracer.capture_start(msg.from, to, msg.is_create(), &msg.data, available, msg.value);
        }

        let snapshot = ctx.state.snapshot();
        let result = match msg.to {
            Some(to) => {
                ctx.state.sub_balance(&msg.from, msg.value)?;
                ctx.state.add_balance(&to, msg.value)?;
                if ctx.state.get_code(&to).is_empty() {
                    Ok(Bytes::new())
                } else {
                    let result = executor.call(ctx, msg.from, to, &msg.data, msg.value, available);
                    let used = result.gas_used.min(available);
                    gas.charge(used)?;
                    if result.success {
                        Ok(result.data)
                    } else {
                        let err = result.error.unwrap_or(VmError::Reverted { reason: None });
                        Err((err, result.data))
                    }
                }
            }
            None => Err((
                VmError::ExecutionError("contract creation is not supported".to_string()),
                Bytes::new(),
            )),
        };

        let (error, data) = match result {
            Ok(data) => (None, data),
            Err((err, data)) => {
                ctx.state.revert_to_snapshot(snapshot)?;
                if matches!(err, VmError::OutOfGas { .. }) {
                    gas.exhaust();
                }
                (Some(err), data)
            }
        };

        let call_gas_used = available - gas.remaining();
        if let Some(tracer) = ctx.tracer.as_deref_mut() {
            tracer.capture_end(&data, call_gas_used, error.as_ref());
        }
        Ok((error, data))
    }

    fn settle_fees(
        &self,
        ctx: &mut ExecutionContext<'_>,
        msg: &Message,
        gas: &GasTracker,
    ) -> Result<(), CoreError> {
        // Both products are bounded by gas_limit * gas_price, checked in pre_check
        let refund = U256::from(gas.remaining()) * msg.gas_price;
        let fee = U256::from(gas.used()) * msg.gas_price;

        ctx.state.add_balance(&msg.from, refund)?;
        let collector = self.config.fee_collector.unwrap_or(ctx.block.coinbase);
        ctx.state.add_balance(&collector, fee)?;
        Ok(())
    }
}
