use forgemint_types::{Address, Hash, U256};

/// A single reversible state change.
///
/// Each entry records the value that was overwritten, so reverting is a
/// matter of replaying entries backwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JournalEntry {
    CreateAccount {
        address: Address,
    },
    CodeChange {
        address: Address,
        /// `None` when the account had no code
        prev_code: Option<Vec<u8>>,
    },
    StorageChange {
        address: Address,
        key: Hash,
        prev: Hash,
    },
    NonceChange {
        address: Address,
        prev: u64,
    },
    BalanceChange {
        address: Address,
        prev: U256,
    },
    AddLog {
        tx_index: u32,
    },
}

impl JournalEntry {
    /// Account touched by this change, if any
    pub fn address(&self) -> Option<&Address> {
        match self {
            JournalEntry::CreateAccount { address }
            | JournalEntry::CodeChange { address, .. }
            | JournalEntry::StorageChange { address, .. }
            | JournalEntry::NonceChange { address, .. }
            | JournalEntry::BalanceChange { address, .. } => Some(address),
            JournalEntry::AddLog { .. } => None,
        }
    }
}

/// Ordered list of changes since the last commit.
#[derive(Clone, Debug, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return entries from `index` onwards, newest first
    pub fn unwind(&mut self, index: usize) -> Vec<JournalEntry> {
        let mut tail = self.entries.split_off(index.min(self.entries.len()));
        tail.reverse();
        tail
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }
}
