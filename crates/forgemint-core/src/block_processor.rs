//! Per-block driver: migrations first, then transactions in order.

use crate::error::CoreError;
use crate::migrations::MigrationRegistry;
use crate::state_transition::StateTransition;
use forgemint_state::StateDB;
use forgemint_types::{ChainConfig, Message, TransactionReceipt};
use forgemint_vm::{BlockContext, ExecutionContext, Executor};
use tracing::{debug, info};

/// A block ready for execution: header context plus sender-recovered
/// transactions.
#[derive(Debug, Clone)]
pub struct Block {
    pub context: BlockContext,
    pub transactions: Vec<Message>,
}

impl Block {
    pub fn new(context: BlockContext, transactions: Vec<Message>) -> Self {
        Self {
            context,
            transactions,
        }
    }

    pub fn number(&self) -> u64 {
        self.context.number
    }
}

/// Result of processing a block.
#[derive(Debug, Clone, Default)]
pub struct BlockOutcome {
    pub receipts: Vec<TransactionReceipt>,
    pub gas_used: u64,
}

/// Executes blocks against a state store.
pub struct BlockProcessor<'a, E: Executor> {
    config: &'a ChainConfig,
    migrations: &'a MigrationRegistry,
    executor: E,
}

impl<'a, E: Executor> BlockProcessor<'a, E> {
    pub fn new(config: &'a ChainConfig, migrations: &'a MigrationRegistry, executor: E) -> Self {
        Self {
            config,
            migrations,
            executor,
        }
    }

    /// Run migrations scheduled for the block height, then every
    /// transaction. `source` names the caller (import, mining, replay) in
    /// migration logs.
    ///
    /// An error means the block is invalid; the state must be discarded.
    /// A header gas limit above the chain's is rejected before any state is
    /// touched.
    pub fn process(
        &mut self,
        block: &Block,
        state: &mut dyn StateDB,
        source: &str,
    ) -> Result<BlockOutcome, CoreError> {
        if block.context.gas_limit > self.config.gas_limit {
            return Err(CoreError::InvalidBlockGasLimit {
                got: block.context.gas_limit,
                max: self.config.gas_limit,
            });
        }

        state.reset_logs();
        self.migrations.execute(block.number(), state, source);
        state.finalise();

        let transition = StateTransition::new(self.config);
        let mut outcome = BlockOutcome::default();

        for (index, msg) in block.transactions.iter().enumerate() {
            let tx_index = index as u32;
            let available = block.context.gas_limit - outcome.gas_used;
            if msg.gas_limit > available {
                return Err(CoreError::GasLimitExceeded {
                    used: outcome.gas_used.saturating_add(msg.gas_limit),
                    limit: block.context.gas_limit,
                });
            }

            state.set_tx_context(tx_index);
            let result = {
                let mut ctx = ExecutionContext::new(&block.context, &mut *state);
                transition.apply_message(&mut ctx, &mut self.executor, msg)?
            };
            state.finalise();

            outcome.gas_used += result.gas_used;
            outcome.receipts.push(TransactionReceipt {
                tx_index,
                block_number: block.number(),
                from: msg.from,
                to: msg.to,
                status: result.is_success(),
                gas_used: result.gas_used,
                cumulative_gas_used: outcome.gas_used,
                logs: state.tx_logs(tx_index),
                revert_reason: result.revert_reason(),
            });

            debug!(
                block = block.number(),
                tx_index,
                gas_used = result.gas_used,
                success = result.is_success(),
                "Processed transaction"
            );
        }

        info!(
            block = block.number(),
            txs = block.transactions.len(),
            gas_used = outcome.gas_used,
            "Processed block"
        );
        Ok(outcome)
    }
}
