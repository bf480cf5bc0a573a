use crate::{
    binder::Binder,
    compiler::FilterCompiler,
    context::{document_scope, mark_document_context},
    dialect::{Dialect, QuestionMark},
    error::CompileError,
    filter::CompiledFilter,
    literal::to_document_text,
};
use criteria::{ExprTree, ExprVisitor, Node};
use model::{
    core::value::Value,
    schema::{SchemaError, StorageSchema},
};
use tracing::{debug, warn};

/// Compiles expression trees to `WHERE` clauses for tables that keep most
/// attributes in a JSON document column.
pub struct SqlFilterCompiler {
    schema: StorageSchema,
    dialect: Box<dyn Dialect>,
}

impl SqlFilterCompiler {
    /// Fails if a schema name is not a plain identifier, since every one of
    /// them is written into the clause verbatim.
    pub fn new(schema: StorageSchema, dialect: impl Dialect + 'static) -> Result<Self, SchemaError> {
        schema.validate()?;
        Ok(Self {
            schema,
            dialect: Box::new(dialect),
        })
    }

    pub fn with_schema(schema: StorageSchema) -> Result<Self, SchemaError> {
        Self::new(schema, QuestionMark)
    }

    pub fn schema(&self) -> &StorageSchema {
        &self.schema
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }
}

impl Default for SqlFilterCompiler {
    fn default() -> Self {
        // the default schema only holds identifiers
        Self {
            schema: StorageSchema::default(),
            dialect: Box::new(QuestionMark),
        }
    }
}

impl FilterCompiler for SqlFilterCompiler {
    type Filter = CompiledFilter;

    fn compile(&self, tree: &ExprTree) -> Self::Filter {
        let annotations = mark_document_context(tree.root(), &self.schema);
        debug!(
            nodes = tree.node_count(),
            document_nodes = annotations.annotated_nodes(),
            dialect = %self.dialect.name(),
            "Compiling filter"
        );

        let scope = document_scope(tree, &annotations);
        let mut emitter = SqlEmitter::new(&self.schema, &scope, self.dialect.as_ref());
        for node in tree.nodes() {
            let fragment = node.accept(&mut emitter);
            emitter.fragments.push(fragment);
        }
        let (where_clause, parameters, errors) = emitter.finish(tree.root());

        if errors.is_empty() {
            debug!(
                clause = where_clause.as_deref().unwrap_or_default(),
                parameters = parameters.len(),
                "Compiled filter"
            );
        } else {
            warn!(errors = errors.len(), "Filter compiled with errors");
        }

        CompiledFilter {
            where_clause,
            parameters,
            errors,
        }
    }
}

/// Compiles `tree` with the default storage schema and `?` placeholders.
pub fn compile(tree: &ExprTree) -> CompiledFilter {
    SqlFilterCompiler::default().compile(tree)
}

/// The emitting pass.
///
/// Nodes are fed in storage order, so both children of a binary node are
/// emitted before it and their fragments are waiting in `fragments`. Every
/// callback returns the SQL fragment for its node, or `None` after recording
/// an error. A `None` child makes its parent `None` as well; the errors
/// already explain why.
struct SqlEmitter<'a> {
    schema: &'a StorageSchema,
    // document context per node, by index
    scope: &'a [bool],
    anonymous: bool,
    binder: Binder<'a>,
    fragments: Vec<Option<String>>,
    errors: Vec<CompileError>,
}

impl<'a> SqlEmitter<'a> {
    fn new(schema: &'a StorageSchema, scope: &'a [bool], dialect: &'a dyn Dialect) -> Self {
        Self {
            schema,
            scope,
            anonymous: dialect.is_anonymous(),
            binder: Binder::new(dialect),
            fragments: Vec::with_capacity(scope.len()),
            errors: Vec::new(),
        }
    }

    fn finish(mut self, root: Node<'_>) -> (Option<String>, Vec<Value>, Vec<CompileError>) {
        let where_clause = self.take(root);
        (where_clause, self.binder.finish(), self.errors)
    }

    // each node has exactly one parent, so its fragment is taken once
    fn take(&mut self, node: Node<'_>) -> Option<String> {
        self.fragments.get_mut(node.id().index())?.take()
    }

    fn binary(&mut self, left: Node<'_>, right: Node<'_>, op: &str) -> Option<String> {
        let (left, right) = (self.take(left), self.take(right));
        Some(format!("({} {op} {})", left?, right?))
    }

    /// Records an error and returns `false` if `name` cannot be spliced into
    /// the document accessor.
    fn check_document_field(&mut self, node: Node<'_>, name: &str) -> bool {
        let error = if name.contains('\'') {
            CompileError::UnsafeFieldName {
                node: node.id(),
                name: name.to_string(),
            }
        } else if self.anonymous && name.contains('?') {
            CompileError::PlaceholderInFieldName {
                node: node.id(),
                name: name.to_string(),
            }
        } else {
            return true;
        };
        self.errors.push(error);
        false
    }

    fn unsupported_literal(&mut self, node: Node<'_>, value: &Value) -> Option<String> {
        self.errors.push(CompileError::UnsupportedLiteralType {
            node: node.id(),
            value: value.to_string(),
            kind: value.type_name(),
        });
        None
    }
}

impl ExprVisitor for SqlEmitter<'_> {
    type Output = Option<String>;

    fn visit_field(&mut self, node: Node<'_>, name: &str) -> Option<String> {
        if !self.schema.is_document_field(name) {
            return Some(name.to_string());
        }
        if !self.check_document_field(node, name) {
            return None;
        }
        Some(format!("{}->'{}'", self.schema.document_column, name))
    }

    fn visit_parameter(&mut self, node: Node<'_>) -> Option<String> {
        self.errors
            .push(CompileError::UnsupportedExpression { node: node.id() });
        None
    }

    fn visit_literal(&mut self, node: Node<'_>, value: &Value) -> Option<String> {
        if !value.is_primitive() {
            return self.unsupported_literal(node, value);
        }

        if !self.scope[node.id().index()] {
            return Some(self.binder.bind(value.clone()));
        }

        match to_document_text(value) {
            Some(text) => {
                let placeholder = self.binder.bind(Value::String(text));
                Some(format!("{placeholder}::jsonb"))
            }
            None => self.unsupported_literal(node, value),
        }
    }

    fn visit_and(&mut self, _node: Node<'_>, left: Node<'_>, right: Node<'_>) -> Option<String> {
        self.binary(left, right, "and")
    }

    fn visit_or(&mut self, _node: Node<'_>, left: Node<'_>, right: Node<'_>) -> Option<String> {
        self.binary(left, right, "or")
    }

    fn visit_equals(&mut self, _node: Node<'_>, left: Node<'_>, right: Node<'_>) -> Option<String> {
        self.binary(left, right, "=")
    }

    fn visit_matches(
        &mut self,
        _node: Node<'_>,
        left: Node<'_>,
        right: Node<'_>,
    ) -> Option<String> {
        let (left, right) = (self.take(left), self.take(right));
        let config = &self.schema.text_search_config;
        Some(format!(
            "(to_tsvector('{config}', {}) @@ to_tsquery('{config}', {}))",
            left?, right?
        ))
    }
}
