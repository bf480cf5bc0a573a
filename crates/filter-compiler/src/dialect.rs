//! Defines the `Dialect` trait for driver-specific placeholder syntax.

pub trait Dialect: Send + Sync {
    /// Returns the placeholder for the parameter at `index` (zero based).
    ///
    /// - `QuestionMark` uses `?` for every parameter and leaves numbering to the driver
    /// - PostgreSQL uses `$1`, `$2`, etc.
    fn placeholder(&self, index: usize) -> String;

    /// Returns the name of the dialect (e.g., "PostgreSQL").
    fn name(&self) -> String;

    /// Whether placeholders are matched to parameters by position alone, in
    /// which case a stray `?` anywhere in the clause shifts every later one.
    fn is_anonymous(&self) -> bool {
        false
    }
}

/// Anonymous `?` placeholders, bound positionally in order of appearance.
#[derive(Debug, Clone, Default)]
pub struct QuestionMark;

impl Dialect for QuestionMark {
    fn placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    fn name(&self) -> String {
        "QuestionMark".into()
    }

    fn is_anonymous(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn placeholder(&self, index: usize) -> String {
        // PostgreSQL uses $1, $2, etc.
        format!("${}", index + 1)
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}
