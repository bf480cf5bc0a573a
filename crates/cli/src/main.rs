use crate::{
    commands::{Commands, DialectKind},
    error::CliError,
    expr_file::ExprFile,
    output::CompileReport,
};
use clap::Parser;
use criteria::ExprTree;
use filter_compiler::{CompiledFilter, FilterCompiler};
use model::schema::StorageSchema;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod expr_file;
mod output;

#[derive(Parser)]
#[command(
    name = "criteria",
    version = "0.1.0",
    about = "Compile filter expressions to SQL WHERE clauses"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Logs go to stderr, stdout carries the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            expr,
            schema,
            dialect,
            output,
        } => {
            let schema = load_schema(schema.as_deref())?;
            let filter = compile_file(&expr, schema, dialect)?;
            let json = output::to_pretty_json(&CompileReport::from(&filter))?;
            output::write_or_print(&json, output.as_deref())?;

            if !filter.errors.is_empty() {
                return Err(CliError::CompileFailed(filter.errors.len()));
            }
        }
        Commands::Schema { schema } => {
            let schema = load_schema(schema.as_deref())?;
            let json = output::to_pretty_json(&schema)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn load_schema(path: Option<&str>) -> Result<StorageSchema, CliError> {
    match path {
        Some(path) => {
            info!("Loading storage schema: {}", path);
            Ok(StorageSchema::load(path)?)
        }
        None => Ok(StorageSchema::default()),
    }
}

fn compile_file(
    path: &str,
    schema: StorageSchema,
    dialect: DialectKind,
) -> Result<CompiledFilter, CliError> {
    let source = std::fs::read_to_string(path)?;
    let tree = ExprTree::new(ExprFile::parse(&source)?.into_expr());

    let filter = dialect.compiler(schema)?.compile(&tree);
    for err in &filter.errors {
        warn!("{}: {}", path, err);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::value::Value;
    use std::io::Write;

    fn temp_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn test_compile_file_with_schema() {
        let expr = temp_file(
            r#"{ "and": [
                { "equals": [{ "field": "Owner" }, { "literal": 7 }] },
                { "equals": [{ "field": "title" }, { "literal": "foo" }] }
            ] }"#,
        );
        let schema = temp_file(r#"relational_columns = ["ID", "Owner"]"#);

        let schema = load_schema(schema.path().to_str()).expect("schema");
        let filter = compile_file(
            expr.path().to_str().expect("utf-8 path"),
            schema,
            DialectKind::Postgres,
        )
        .expect("compiled");

        assert_eq!(
            filter.where_clause.as_deref(),
            Some("((Owner = $1) and (Fields->'title' = $2::jsonb))")
        );
        assert_eq!(
            filter.parameters,
            vec![Value::Int(7), Value::from("\"foo\"")]
        );
    }

    #[test]
    fn test_compile_file_reports_errors() {
        let expr = temp_file(r#"{ "equals": [{ "field": "tags" }, { "literal": ["a"] }] }"#);
        let filter = compile_file(
            expr.path().to_str().expect("utf-8 path"),
            StorageSchema::default(),
            DialectKind::QuestionMark,
        )
        .expect("compiled");

        assert_eq!(filter.where_clause, None);
        assert_eq!(filter.errors.len(), 1);
    }

    #[test]
    fn test_malformed_expression_file() {
        let expr = temp_file(r#"{ "xor": [] }"#);
        let err = compile_file(
            expr.path().to_str().expect("utf-8 path"),
            StorageSchema::default(),
            DialectKind::QuestionMark,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::ExprParse(_)));
    }

    #[test]
    fn test_invalid_schema_file() {
        let schema = temp_file(r#"document_column = "a b""#);
        let err = load_schema(schema.path().to_str()).unwrap_err();
        assert!(matches!(err, CliError::Schema(_)));
    }
}
