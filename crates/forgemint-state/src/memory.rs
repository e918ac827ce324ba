//! In-memory journaled state

use crate::journal::{Journal, JournalEntry};
use crate::{StateDB, StateError};
use borsh::BorshSerialize;
use forgemint_types::{Account, Address, Hash, Log, U256};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize)]
struct StateObject {
    account: Account,
    code: Vec<u8>,
    /// Only non-zero words are kept
    storage: BTreeMap<Hash, Hash>,
}

#[derive(Clone, Copy, Debug)]
struct Revision {
    id: usize,
    journal_index: usize,
}

/// Account state held in ordered maps.
///
/// Ordering makes iteration, and therefore the state root, independent of
/// insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryState {
    objects: BTreeMap<Address, StateObject>,
    journal: Journal,
    revisions: Vec<Revision>,
    next_revision_id: usize,
    logs: Vec<Log>,
    tx_index: u32,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State pre-funded with the given balances, already committed
    pub fn with_balances(balances: impl IntoIterator<Item = (Address, U256)>) -> Self {
        let mut state = Self::new();
        for (address, balance) in balances {
            state.objects.entry(address).or_default().account.balance = balance;
        }
        state
    }

    /// Uncommitted changes, oldest first
    pub fn journal(&self) -> &[JournalEntry] {
        self.journal.entries()
    }

    /// All logs of the current block
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// keccak-256 of the borsh encoding of the ordered account set
    pub fn state_root(&self) -> Result<Hash, StateError> {
        let encoded = borsh::to_vec(&self.objects)?;
        Ok(Hash::compute(&encoded))
    }

    fn get_or_create(&mut self, address: &Address) -> &mut StateObject {
        if !self.objects.contains_key(address) {
            self.journal.append(JournalEntry::CreateAccount { address: *address });
        }
        self.objects.entry(*address).or_default()
    }

    fn set_balance(&mut self, address: &Address, balance: U256) {
        let prev = self.get_or_create(address).account.balance;
        self.journal.append(JournalEntry::BalanceChange {
            address: *address,
            prev,
        });
        self.get_or_create(address).account.balance = balance;
    }

    fn undo(&mut self, entry: JournalEntry) {
        match entry {
            JournalEntry::CreateAccount { address } => {
                self.objects.remove(&address);
            }
            JournalEntry::CodeChange { address, prev_code } => {
                if let Some(obj) = self.objects.get_mut(&address) {
                    match prev_code {
                        Some(code) => {
                            obj.account.code_hash = Hash::compute(&code);
                            obj.code = code;
                        }
                        None => {
                            obj.account.code_hash = Hash::KECCAK_EMPTY;
                            obj.code.clear();
                        }
                    }
                }
            }
            JournalEntry::StorageChange { address, key, prev } => {
                if let Some(obj) = self.objects.get_mut(&address) {
                    write_word(&mut obj.storage, key, prev);
                }
            }
            JournalEntry::NonceChange { address, prev } => {
                if let Some(obj) = self.objects.get_mut(&address) {
                    obj.account.nonce = prev;
                }
            }
            JournalEntry::BalanceChange { address, prev } => {
                if let Some(obj) = self.objects.get_mut(&address) {
                    obj.account.balance = prev;
                }
            }
            JournalEntry::AddLog { .. } => {
                self.logs.pop();
            }
        }
    }
}

fn write_word(storage: &mut BTreeMap<Hash, Hash>, key: Hash, value: Hash) {
    if value.is_zero() {
        storage.remove(&key);
    } else {
        storage.insert(key, value);
    }
}

impl StateDB for MemoryState {
    fn exist(&self, address: &Address) -> bool {
        self.objects.contains_key(address)
    }

    fn get_balance(&self, address: &Address) -> U256 {
        self.objects
            .get(address)
            .map(|obj| obj.account.balance)
            .unwrap_or(U256::ZERO)
    }

    fn add_balance(&mut self, address: &Address, amount: U256) -> Result<(), StateError> {
        let balance = self
            .get_balance(address)
            .checked_add(&amount)
            .ok_or(StateError::BalanceOverflow(*address))?;
        self.set_balance(address, balance);
        Ok(())
    }

    fn sub_balance(&mut self, address: &Address, amount: U256) -> Result<(), StateError> {
        let have = self.get_balance(address);
        let balance = have
            .checked_sub(&amount)
            .ok_or(StateError::InsufficientBalance {
                address: *address,
                have,
                need: amount,
            })?;
        self.set_balance(address, balance);
        Ok(())
    }

    fn get_nonce(&self, address: &Address) -> u64 {
        self.objects
            .get(address)
            .map(|obj| obj.account.nonce)
            .unwrap_or(0)
    }

    fn set_nonce(&mut self, address: &Address, nonce: u64) {
        let prev = self.get_or_create(address).account.nonce;
        self.journal.append(JournalEntry::NonceChange {
            address: *address,
            prev,
        });
        self.get_or_create(address).account.nonce = nonce;
    }

    fn get_code(&self, address: &Address) -> Vec<u8> {
        self.objects
            .get(address)
            .map(|obj| obj.code.clone())
            .unwrap_or_default()
    }

    fn get_code_hash(&self, address: &Address) -> Hash {
        self.objects
            .get(address)
            .map(|obj| obj.account.code_hash)
            .unwrap_or(Hash::ZERO)
    }

    fn set_code(&mut self, address: &Address, code: Vec<u8>) {
        let obj = self.get_or_create(address);
        let prev_code = obj.account.has_code().then(|| obj.code.clone());
        self.journal.append(JournalEntry::CodeChange {
            address: *address,
            prev_code,
        });

        let obj = self.get_or_create(address);
        obj.account.code_hash = Hash::compute(&code);
        obj.code = code;
    }

    fn get_state(&self, address: &Address, key: &Hash) -> Hash {
        self.objects
            .get(address)
            .and_then(|obj| obj.storage.get(key).copied())
            .unwrap_or(Hash::ZERO)
    }

    fn set_state(&mut self, address: &Address, key: Hash, value: Hash) {
        let prev = self.get_or_create(address).storage.get(&key).copied().unwrap_or(Hash::ZERO);
        self.journal.append(JournalEntry::StorageChange {
            address: *address,
            key,
            prev,
        });
        write_word(&mut self.get_or_create(address).storage, key, value);
    }

    fn set_tx_context(&mut self, tx_index: u32) {
        self.tx_index = tx_index;
    }

    fn add_log(&mut self, mut log: Log) {
        log.tx_index = self.tx_index;
        log.log_index = self.logs.len() as u32;
        self.journal.append(JournalEntry::AddLog {
            tx_index: self.tx_index,
        });
        self.logs.push(log);
    }

    fn tx_logs(&self, tx_index: u32) -> Vec<Log> {
        self.logs
            .iter()
            .filter(|log| log.tx_index == tx_index)
            .cloned()
            .collect()
    }

    fn reset_logs(&mut self) {
        self.logs.clear();
    }

    fn snapshot(&mut self) -> usize {
        let id = self.next_revision_id;
        self.next_revision_id += 1;
        self.revisions.push(Revision {
            id,
            journal_index: self.journal.len(),
        });
        id
    }

    fn revert_to_snapshot(&mut self, id: usize) -> Result<(), StateError> {
        let position = self
            .revisions
            .iter()
            .rposition(|rev| rev.id == id)
            .ok_or(StateError::InvalidSnapshot(id))?;
        let journal_index = self.revisions[position].journal_index;
        self.revisions.truncate(position);

        let undone = self.journal.unwind(journal_index);
        tracing::trace!(snapshot = id, changes = undone.len(), "Reverting state");
        for entry in undone {
            self.undo(entry);
        }
        Ok(())
    }

    fn finalise(&mut self) {
        self.journal.reset();
        self.revisions.clear();
    }
}
