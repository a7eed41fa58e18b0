use crate::domain::model::LuckyResult;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Session-scoped result log, newest first. Entries are never removed.
#[derive(Debug, Default, Clone)]
pub struct HistoryStore {
    entries: VecDeque<LuckyResult>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: LuckyResult) {
        self.entries.push_front(result);
    }

    pub fn all(&self) -> Vec<LuckyResult> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LuckyResult> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LuckyResult> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Handle passed to every component that reads or appends history.
#[derive(Debug, Default, Clone)]
pub struct SharedHistory {
    inner: Arc<RwLock<HistoryStore>>,
}

impl SharedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, result: LuckyResult) {
        let mut store = self.inner.write().await;
        store.record(result);
        tracing::debug!("History now holds {} results", store.len());
    }

    pub async fn all(&self) -> Vec<LuckyResult> {
        self.inner.read().await.all()
    }

    pub async fn latest(&self) -> Option<LuckyResult> {
        self.inner.read().await.latest().cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(two: &str, three: &str) -> LuckyResult {
        LuckyResult::random(two.to_string(), three.to_string()).unwrap()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = HistoryStore::new();
        assert!(store.is_empty());
        assert!(store.all().is_empty());
        assert!(store.latest().is_none());
    }

    #[test]
    fn test_record_prepends() {
        let mut store = HistoryStore::new();
        store.record(result("11", "111"));
        store.record(result("22", "222"));

        let before = store.all();
        let newest = result("33", "333");
        store.record(newest.clone());

        let after = store.all();
        assert_eq!(after[0], newest);
        assert_eq!(&after[1..], &before[..]);
    }

    #[test]
    fn test_history_never_loses_or_reorders() {
        let mut store = HistoryStore::new();
        let mut recorded = Vec::new();

        for i in 0..250 {
            let entry = result(&format!("{:02}", i % 100), &format!("{:03}", i));
            recorded.push(entry.clone());
            store.record(entry);
        }

        recorded.reverse();
        assert_eq!(store.len(), 250);
        assert_eq!(store.all(), recorded);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut store = HistoryStore::new();
        let entry = result("42", "999");
        store.record(entry.clone());
        store.record(entry.clone());

        assert_eq!(store.len(), 2);
        assert!(store.iter().all(|e| e == &entry));
    }

    #[tokio::test]
    async fn test_shared_history_clones_see_same_entries() {
        let history = SharedHistory::new();
        let other = history.clone();

        other.record(result("05", "123")).await;

        assert_eq!(history.len().await, 1);
        assert_eq!(history.latest().await.unwrap().two_digits(), ["05"]);
    }
}
