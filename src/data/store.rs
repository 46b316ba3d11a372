use super::model::{Record, Value};

/// Owner of a record sequence.
///
/// The filter and exporter only ever see `&[Record]`; everything that
/// mutates records goes through a store.
pub trait RecordStore {
    fn get(&self) -> &[Record];

    fn set(&mut self, records: Vec<Record>);

    /// Replace the record with the same `id` in place, or append it.
    fn upsert(&mut self, record: Record) {
        let mut records = self.get().to_vec();
        let existing = record
            .id()
            .and_then(|id| records.iter().position(|r| r.id() == Some(id)));
        match existing {
            Some(pos) => records[pos] = record,
            None => records.push(record),
        }
        self.set(records);
    }

    /// Remove the first record whose `id` equals `id`.
    fn remove(&mut self, id: &Value) -> Option<Record> {
        let pos = self.get().iter().position(|r| r.id() == Some(id))?;
        let mut records = self.get().to_vec();
        let removed = records.remove(pos);
        self.set(records);
        Some(removed)
    }
}

/// In-memory store; changes are lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
}

impl MemoryStore {
    pub fn new(records: Vec<Record>) -> Self {
        MemoryStore { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self) -> &[Record] {
        &self.records
    }

    fn set(&mut self, records: Vec<Record>) {
        log::debug!("store replaced: {} -> {} records", self.records.len(), records.len());
        self.records = records;
    }

    fn remove(&mut self, id: &Value) -> Option<Record> {
        let pos = self.records.iter().position(|r| r.id() == Some(id))?;
        Some(self.records.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            Record::new().with("id", 1).with("status", "pending"),
            Record::new().with("id", 2).with("status", "confirmed"),
        ])
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut store = store();
        store.upsert(Record::new().with("id", 1).with("status", "cancelled"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get()[0].text("status").as_deref(), Some("cancelled"));
        assert_eq!(store.get()[1].text("status").as_deref(), Some("confirmed"));
    }

    #[test]
    fn upsert_appends_unknown_or_missing_id() {
        let mut store = store();
        store.upsert(Record::new().with("id", 3));
        store.upsert(Record::new().with("status", "draft"));
        assert_eq!(store.len(), 4);
        assert_eq!(store.get()[2].id(), Some(&Value::Integer(3)));
    }

    #[test]
    fn remove_returns_removed_record() {
        let mut store = store();
        let removed = store.remove(&Value::Integer(1)).unwrap();
        assert_eq!(removed.text("status").as_deref(), Some("pending"));
        assert_eq!(store.len(), 1);
        assert!(store.remove(&Value::Integer(1)).is_none());
    }

    #[test]
    fn set_replaces_everything() {
        let mut store = store();
        store.set(Vec::new());
        assert!(store.is_empty());
        assert!(store.get().is_empty());
    }
}
