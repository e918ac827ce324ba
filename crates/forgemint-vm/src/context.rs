//! Block and per-transaction execution contexts.

use crate::gas_metering::GasSchedule;
use crate::tracer::Tracer;
use forgemint_state::StateDB;
use forgemint_types::{Address, ChainConfig, Hash};

/// Header fields visible to execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockContext {
    /// Block number
    pub number: u64,
    /// Block timestamp
    pub timestamp: u64,
    /// Block producer, receives fees when no collector is configured
    pub coinbase: Address,
    /// Block gas limit
    pub gas_limit: u64,
    /// Parent block hash
    pub parent_hash: Hash,
}

impl BlockContext {
    pub fn new(number: u64, coinbase: Address) -> Self {
        Self {
            number,
            timestamp: 0,
            coinbase,
            gas_limit: 30_000_000,
            parent_hash: Hash::ZERO,
        }
    }

    /// Header for a block of `chain`, at the chain's gas limit.
    pub fn for_chain(chain: &ChainConfig, number: u64, coinbase: Address) -> Self {
        Self::new(number, coinbase).with_gas_limit(chain.gas_limit)
    }

    /// Set block gas limit.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }
}

/// Everything a transaction executes against: the block, the state store,
/// the gas schedule and an optional tracer.
///
/// Lives for a single transaction; nothing here is retained across
/// transactions.
pub struct ExecutionContext<'a> {
    pub block: &'a BlockContext,
    pub state: &'a mut dyn StateDB,
    pub schedule: GasSchedule,
    pub tracer: Option<&'a mut dyn Tracer>,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(block: &'a BlockContext, state: &'a mut dyn StateDB) -> Self {
        Self {
            block,
            state,
            schedule: GasSchedule::default(),
            tracer: None,
        }
    }

    /// Attach a tracer.
    pub fn with_tracer(mut self, tracer: &'a mut dyn Tracer) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Current block number
    pub fn block_number(&self) -> u64 {
        self.block.number
    }

    pub fn is_tracing(&self) -> bool {
        self.tracer.is_some()
    }
}

impl std::fmt::Debug for ExecutionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("block", &self.block)
            .field("schedule", &self.schedule)
            .field("tracing", &self.is_tracing())
            .finish()
    }
}
