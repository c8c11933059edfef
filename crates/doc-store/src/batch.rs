use serde_json::Value;

use crate::error::StoreError;
use crate::path::DocumentPath;

/// A single write in an atomic batch.
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Creates the document or replaces its payload entirely.
    Put { doc: DocumentPath, data: Value },

    /// Creates the document or shallow-merges fields into it.
    Merge { doc: DocumentPath, fields: Value },

    /// Shallow-merges fields into an existing document.
    /// Fails the whole batch if the document does not exist.
    Update { doc: DocumentPath, fields: Value },

    /// Removes the document. Absence is not an error.
    Delete { doc: DocumentPath },
}

impl WriteOp {
    /// Returns the document this op targets.
    pub fn doc(&self) -> &DocumentPath {
        match self {
            WriteOp::Put { doc, .. }
            | WriteOp::Merge { doc, .. }
            | WriteOp::Update { doc, .. }
            | WriteOp::Delete { doc } => doc,
        }
    }
}

/// An ordered set of writes applied all-or-nothing.
///
/// Ops may target any mix of documents and collections. The store
/// validates the whole batch before applying anything; every observer
/// sees either all of the writes or none of them.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a create-or-replace write.
    pub fn put(&mut self, doc: DocumentPath, data: Value) -> &mut Self {
        self.ops.push(WriteOp::Put { doc, data });
        self
    }

    /// Stages a create-or-merge write.
    pub fn merge(&mut self, doc: DocumentPath, fields: Value) -> &mut Self {
        self.ops.push(WriteOp::Merge { doc, fields });
        self
    }

    /// Stages a merge into an existing document.
    pub fn update(&mut self, doc: DocumentPath, fields: Value) -> &mut Self {
        self.ops.push(WriteOp::Update { doc, fields });
        self
    }

    /// Stages a delete.
    pub fn delete(&mut self, doc: DocumentPath) -> &mut Self {
        self.ops.push(WriteOp::Delete { doc });
        self
    }

    /// Returns the staged ops in order.
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// Consumes the batch, returning the staged ops.
    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }

    /// Returns the number of staged ops.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if nothing has been staged.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Validates a batch before any op is applied.
///
/// Empty batches and non-object payloads are rejected here; existence
/// checks for `Update` ops happen inside the store under its commit
/// guard, against the state at commit time.
pub fn validate_batch(batch: &WriteBatch) -> Result<(), StoreError> {
    if batch.is_empty() {
        return Err(StoreError::InvalidWrite(
            "cannot commit an empty batch".to_string(),
        ));
    }

    for op in batch.ops() {
        let payload = match op {
            WriteOp::Put { data, .. } => Some(data),
            WriteOp::Merge { fields, .. } | WriteOp::Update { fields, .. } => Some(fields),
            WriteOp::Delete { .. } => None,
        };
        if let Some(payload) = payload
            && !payload.is_object()
        {
            return Err(StoreError::InvalidWrite(format!(
                "payload for {} must be a JSON object",
                op.doc()
            )));
        }
    }

    Ok(())
}
