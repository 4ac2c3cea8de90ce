/// Append-only ledger of successful computations, oldest first.
///
/// Owned by the session for its whole lifetime and dropped at exit; nothing
/// is ever removed or persisted.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: String) {
        log::debug!("history[{}] = {}", self.entries.len(), entry);
        self.entries.push(entry);
    }

    /// Every recorded entry in insertion order.
    pub fn list(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let history = History::new();
        assert!(history.is_empty());
        assert!(history.list().is_empty());
    }

    #[test]
    fn test_preserves_order_and_duplicates() {
        let mut history = History::new();
        history.record("1 + 1 = 2.0".to_string());
        history.record("abs(-2.0) = 2.0".to_string());
        history.record("1 + 1 = 2.0".to_string());

        assert_eq!(history.len(), 3);
        assert_eq!(
            history.list(),
            &["1 + 1 = 2.0", "abs(-2.0) = 2.0", "1 + 1 = 2.0"]
        );
    }
}
