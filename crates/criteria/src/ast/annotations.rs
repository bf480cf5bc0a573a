//! Per-node scratch storage, kept outside the tree.
//!
//! A traversal pass records what it learns about a node here (e.g. "this
//! subtree touches a document field") and a later pass reads it back. The
//! tree itself stays immutable, so whoever owns an `Annotations` owns the
//! results of the passes that filled it.

use crate::ast::tree::ExprId;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Annotations {
    entries: HashMap<ExprId, HashMap<String, Value>>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts the given annotation on the node, replacing any previous value for `key`.
    pub fn set(&mut self, node: ExprId, key: impl Into<String>, value: impl Into<Value>) {
        self.entries
            .entry(node)
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Reads back a value stored with [`set`](Self::set).
    pub fn get(&self, node: ExprId, key: &str) -> Option<&Value> {
        self.entries.get(&node).and_then(|values| values.get(key))
    }

    /// True only if `key` holds the boolean `true` on the node.
    pub fn is_marked(&self, node: ExprId, key: &str) -> bool {
        matches!(self.get(node, key), Some(Value::Bool(true)))
    }

    pub fn remove(&mut self, node: ExprId, key: &str) -> Option<Value> {
        let values = self.entries.get_mut(&node)?;
        let removed = values.remove(key);
        if values.is_empty() {
            self.entries.remove(&node);
        }
        removed
    }

    /// Number of nodes carrying at least one annotation.
    pub fn annotated_nodes(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
