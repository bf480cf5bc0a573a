use clap::{Subcommand, ValueEnum};
use filter_compiler::{
    SqlFilterCompiler,
    dialect::{Postgres, QuestionMark},
};
use model::schema::{SchemaError, StorageSchema};

#[derive(Subcommand)]
pub enum Commands {
    /// Compile an expression file to a WHERE clause
    Compile {
        #[arg(long, help = "Expression file path (JSON)")]
        expr: String,

        #[arg(long, help = "Storage schema file path (TOML); defaults apply if omitted")]
        schema: Option<String>,

        #[arg(long, value_enum, default_value_t = DialectKind::QuestionMark)]
        dialect: DialectKind,

        #[arg(
            long,
            help = "If specified, writes the JSON result to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Print the effective storage schema
    Schema {
        #[arg(long, help = "Storage schema file path (TOML)")]
        schema: Option<String>,
    },
}

/// Placeholder syntax of the generated clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectKind {
    /// `?` for every parameter
    QuestionMark,
    /// `$1`, `$2`, ...
    Postgres,
}

impl DialectKind {
    pub fn compiler(self, schema: StorageSchema) -> Result<SqlFilterCompiler, SchemaError> {
        match self {
            DialectKind::QuestionMark => SqlFilterCompiler::new(schema, QuestionMark),
            DialectKind::Postgres => SqlFilterCompiler::new(schema, Postgres),
        }
    }
}
