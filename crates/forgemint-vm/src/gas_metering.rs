use crate::error::VmError;

/// Gas schedule for transaction processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSchedule {
    // TX
    pub tx_base: u64,                  // 21,000
    pub tx_create: u64,                // 53,000
    pub tx_per_data_zero_byte: u64,    // 4
    pub tx_per_data_nonzero_byte: u64, // 16

    // Bridge mint
    pub mint: u64,                     // 100,000
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            tx_base: 21_000,
            tx_create: 53_000,
            tx_per_data_zero_byte: 4,
            tx_per_data_nonzero_byte: 16,

            mint: 100_000,
        }
    }
}

impl GasSchedule {
    /// Gas charged before any execution: base cost plus calldata.
    pub fn intrinsic_gas(&self, data: &[u8], is_create: bool) -> u64 {
        let base = if is_create { self.tx_create } else { self.tx_base };
        let zeros = data.iter().filter(|b| **b == 0).count() as u64;
        let non_zeros = data.len() as u64 - zeros;
        base.saturating_add(zeros.saturating_mul(self.tx_per_data_zero_byte))
            .saturating_add(non_zeros.saturating_mul(self.tx_per_data_nonzero_byte))
    }
}

/// Gas tracking during execution.
#[derive(Debug, Clone)]
pub struct GasTracker {
    /// Gas limit for this execution
    limit: u64,
    /// Gas already used
    used: u64,
}

impl GasTracker {
    /// Create a new gas tracker.
    pub fn new(limit: u64) -> Self {
        Self { limit, used: 0 }
    }

    /// Get gas limit.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Get gas used.
    pub fn used(&self) -> u64 {
        self.used
    }

    /// Get remaining gas.
    pub fn remaining(&self) -> u64 {
        self.limit - self.used
    }

    /// Charge gas. On failure nothing is charged.
    pub fn charge(&mut self, amount: u64) -> Result<(), VmError> {
        let new_used = self.used.checked_add(amount).ok_or(VmError::OutOfGas {
            used: u64::MAX,
            limit: self.limit,
        })?;

        if new_used > self.limit {
            Err(VmError::OutOfGas {
                used: new_used,
                limit: self.limit,
            })
        } else {
            self.used = new_used;
            Ok(())
        }
    }

    /// Consume everything that is left.
    pub fn exhaust(&mut self) {
        self.used = self.limit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_tracker() {
        let mut tracker = GasTracker::new(100_000);
        assert_eq!(tracker.limit(), 100_000);
        assert_eq!(tracker.remaining(), 100_000);

        tracker.charge(10_000).unwrap();
        assert_eq!(tracker.used(), 10_000);
        assert_eq!(tracker.remaining(), 90_000);
    }

    #[test]
    fn test_gas_tracker_out_of_gas() {
        let mut tracker = GasTracker::new(1_000);
        assert!(tracker.charge(10_000).is_err());
        assert_eq!(tracker.used(), 0);

        tracker.exhaust();
        assert_eq!(tracker.used(), 1_000);
        assert_eq!(tracker.remaining(), 0);
    }

    #[test]
    fn test_intrinsic_gas_empty() {
        let schedule = GasSchedule::default();
        assert_eq!(schedule.intrinsic_gas(&[], false), 21_000);
        assert_eq!(schedule.intrinsic_gas(&[], true), 53_000);
    }

    #[test]
    fn test_intrinsic_gas_mint_payload() {
        let schedule = GasSchedule::default();
        // 65 non-zero bytes
        assert_eq!(schedule.intrinsic_gas(&[1u8; 65], false), 22_040);
        // 65 zero bytes
        assert_eq!(schedule.intrinsic_gas(&[0u8; 65], false), 21_260);
    }

    #[test]
    fn test_intrinsic_gas_mixed() {
        let schedule = GasSchedule::default();
        assert_eq!(schedule.intrinsic_gas(&[0, 1, 0, 2], false), 21_000 + 8 + 32);
    }
}
