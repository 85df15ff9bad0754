use super::{KvStore, StoreResult};

/// Store for contexts without persistent storage (headless runs, previews).
///
/// Reads behave as if nothing was ever stored; writes are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl KvStore for UnavailableStore {
    fn get(&self, _key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &[u8]) -> StoreResult<()> {
        Ok(())
    }

    fn is_available(&self) -> bool {
        false
    }
}
