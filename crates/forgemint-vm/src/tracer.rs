//! Execution tracing hooks.

use crate::error::VmError;
use forgemint_types::{Address, U256};

/// Receives call boundaries as they happen.
pub trait Tracer {
    /// A top-level call is about to run.
    fn capture_start(
        &mut self,
        from: Address,
        to: Address,
        create: bool,
        input: &[u8],
        gas: u64,
        value: U256,
    );

    /// The call started by the last `capture_start` finished.
    fn capture_end(&mut self, output: &[u8], gas_used: u64, error: Option<&VmError>);
}

/// One traced call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallFrame {
    pub from: Address,
    pub to: Address,
    pub create: bool,
    pub input: Vec<u8>,
    pub gas: u64,
    pub value: U256,
    pub output: Vec<u8>,
    pub gas_used: u64,
    pub error: Option<String>,
    /// `false` until `capture_end` arrives
    pub finished: bool,
}

/// Tracer that keeps every call frame in memory and mirrors it to `tracing`.
#[derive(Debug, Default)]
pub struct CallRecorder {
    frames: Vec<CallFrame>,
}

impl CallRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[CallFrame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<CallFrame> {
        self.frames
    }
}

impl Tracer for CallRecorder {
    fn capture_start(
        &mut self,
        from: Address,
        to: Address,
        create: bool,
        input: &[u8],
        gas: u64,
        value: U256,
    ) {
        tracing::trace!(%from, %to, gas, input_len = input.len(), "Call start");
        self.frames.push(CallFrame {
            from,
            to,
            create,
            input: input.to_vec(),
            gas,
            value,
            output: Vec::new(),
            gas_used: 0,
            error: None,
            finished: false,
        });
    }

    fn capture_end(&mut self, output: &[u8], gas_used: u64, error: Option<&VmError>) {
        tracing::trace!(gas_used, failed = error.is_some(), "Call end");
        if let Some(frame) = self.frames.iter_mut().rev().find(|f| !f.finished) {
            frame.output = output.to_vec();
            frame.gas_used = gas_used;
            frame.error = error.map(|e| e.to_string());
            frame.finished = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_pairs_start_and_end() {
        let mut recorder = CallRecorder::new();
        let from = Address::from_bytes([1u8; 20]);
        let to = Address::from_bytes([2u8; 20]);

        recorder.capture_start(from, to, false, &[0xaa], 50_000, U256::ZERO);
        assert!(!recorder.frames()[0].finished);

        recorder.capture_end(&[], 0, None);
        let frames = recorder.into_frames();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].finished);
        assert_eq!(frames[0].input, vec![0xaa]);
        assert_eq!(frames[0].gas, 50_000);
        assert!(frames[0].error.is_none());
    }

    #[test]
    fn test_recorder_keeps_error() {
        let mut recorder = CallRecorder::new();
        recorder.capture_start(Address::ZERO, Address::ZERO, false, &[], 10, U256::ZERO);
        recorder.capture_end(&[], 10, Some(&VmError::OutOfGas { used: 11, limit: 10 }));
        assert!(recorder.frames()[0]
            .error
            .as_deref()
            .is_some_and(|e| e.contains("Out of gas")));
    }
}
