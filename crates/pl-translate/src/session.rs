//! Per-translation mutable state.

use std::collections::HashMap;

use pl_core::{ObjectId, RecordId};
use pl_idf::{IddObjectType, IdfObject, Workspace};

/// Records emitted so far plus the object-to-record map.
///
/// One session covers one model translation. Records are only appended, so
/// a `RecordId` handed out by `push` stays valid for the session's life.
#[derive(Debug, Default)]
pub struct TranslationSession {
    records: Vec<IdfObject>,
    mapped: HashMap<ObjectId, Option<RecordId>>,
}

impl TranslationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its handle.
    pub fn push(&mut self, record: IdfObject) -> RecordId {
        let id = RecordId::from_usize(self.records.len());
        tracing::trace!(
            record = %id,
            idd_type = record.idd_type().name(),
            name = record.name().unwrap_or(""),
            "emit record"
        );
        self.records.push(record);
        id
    }

    pub fn record(&self, id: RecordId) -> &IdfObject {
        &self.records[id.slot()]
    }

    pub fn record_mut(&mut self, id: RecordId) -> &mut IdfObject {
        &mut self.records[id.slot()]
    }

    pub fn records(&self) -> &[IdfObject] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Outer `None`: not translated yet. Inner `None`: translated to
    /// nothing.
    pub fn mapped(&self, object: ObjectId) -> Option<Option<RecordId>> {
        self.mapped.get(&object).copied()
    }

    pub(crate) fn map(&mut self, object: ObjectId, record: Option<RecordId>) {
        self.mapped.insert(object, record);
    }

    /// Earlier record of `idd_type` named `name`, ignoring ASCII case.
    pub fn find(&self, idd_type: IddObjectType, name: &str) -> Option<RecordId> {
        self.records
            .iter()
            .position(|r| {
                r.idd_type() == idd_type && r.name().is_some_and(|n| n.eq_ignore_ascii_case(name))
            })
            .map(RecordId::from_usize)
    }

    pub fn into_workspace(self) -> Workspace {
        Workspace::from_objects(self.records)
    }
}
