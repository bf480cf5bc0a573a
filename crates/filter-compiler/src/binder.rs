use crate::dialect::Dialect;
use model::core::value::Value;

/// Collects the values to bind and hands out the matching placeholders.
///
/// Placeholders are numbered in the order values are bound, which is the
/// left-to-right order of the literals in the compiled text.
pub struct Binder<'a> {
    params: Vec<Value>,
    dialect: &'a dyn Dialect,
}

impl<'a> Binder<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            params: Vec::new(),
            dialect,
        }
    }

    /// Records `value` and returns the placeholder that refers to it.
    pub fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        self.dialect.placeholder(self.params.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Consumes the binder and returns the parameters.
    pub fn finish(self) -> Vec<Value> {
        self.params
    }
}
