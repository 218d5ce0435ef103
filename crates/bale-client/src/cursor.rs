//! Offset tracking for `getUpdates`.
//!
//! Kept in memory only: a restart begins again at 0 and the server may
//! redeliver updates it still holds.

use tracing::warn;

/// Next offset to request. After observing update `u` the cursor is `u + 1`,
/// which tells the server every update up to `u` may be dropped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateCursor {
    offset: i64,
}

impl UpdateCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Move past `update_id`. Never moves backwards.
    pub fn advance(&mut self, update_id: i64) {
        let next = update_id.saturating_add(1);
        if next < self.offset {
            warn!(
                "update {update_id} arrived out of order (cursor at {}), not rewinding",
                self.offset
            );
            return;
        }
        self.offset = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(UpdateCursor::new().offset(), 0);
    }

    #[test]
    fn test_advance_sets_next_offset() {
        let mut cursor = UpdateCursor::new();
        for id in [100, 101, 105] {
            cursor.advance(id);
        }
        assert_eq!(cursor.offset(), 106);
    }

    #[test]
    fn test_advance_saturates_at_max_id() {
        let mut cursor = UpdateCursor::new();
        cursor.advance(i64::MAX);
        assert_eq!(cursor.offset(), i64::MAX);
    }

    #[test]
    fn test_advance_never_rewinds() {
        let mut cursor = UpdateCursor::new();
        cursor.advance(50);
        cursor.advance(10);
        assert_eq!(cursor.offset(), 51);

        cursor.advance(50);
        assert_eq!(cursor.offset(), 51, "re-observing the same id is a no-op");
    }
}
