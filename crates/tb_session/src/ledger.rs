//! Winner ledger: ordered prize/name entries with session-unique ids.

use tb_core::entities::Winner;
use tb_core::tokens::WinnerId;

/// Recorded winners in insertion order.
///
/// Ids are minted monotonically from 1 and never reused within a session,
/// even after removal, so a stale id can never alias a later entry.
#[derive(Debug, Clone, Default)]
pub struct WinnerLedger {
    entries: Vec<Winner>,
    /// Count of ids minted so far; the next id is `minted + 1`.
    minted: u64,
}

impl WinnerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a winner. Both fields are stored trimmed; an entry that is
    /// blank after trimming is refused with `None` (a no-op, not an error).
    pub fn add(&mut self, prize: &str, name: &str) -> Option<WinnerId> {
        let prize = prize.trim();
        let name = name.trim();
        if prize.is_empty() || name.is_empty() {
            return None;
        }
        self.minted += 1;
        let id = WinnerId::new(self.minted);
        self.entries.push(Winner {
            id,
            prize: prize.to_string(),
            name: name.to_string(),
        });
        Some(id)
    }

    /// Remove by id; `false` when the id is unknown (removal is idempotent).
    pub fn remove(&mut self, id: WinnerId) -> bool {
        match self.entries.iter().position(|w| w.id == id) {
            Some(ix) => {
                self.entries.remove(ix);
                true
            }
            None => false,
        }
    }

    /// Drop all entries. Minted ids are not reset.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Winners in insertion order.
    #[inline]
    pub fn winners(&self) -> &[Winner] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
