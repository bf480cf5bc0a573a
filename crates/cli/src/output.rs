use crate::error::CliError;
use filter_compiler::CompiledFilter;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CompileReport {
    pub where_clause: Option<String>,
    pub parameters: Vec<serde_json::Value>,
    pub errors: Vec<String>,
}

impl From<&CompiledFilter> for CompileReport {
    fn from(filter: &CompiledFilter) -> Self {
        Self {
            where_clause: filter.where_clause.clone(),
            parameters: filter.parameters.iter().map(|p| p.to_json()).collect(),
            errors: filter.errors.iter().map(ToString::to_string).collect(),
        }
    }
}

pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(CliError::JsonSerialize)
}

pub fn write_or_print(json: &str, output: Option<&str>) -> Result<(), CliError> {
    match output {
        Some(path) => std::fs::write(path, json).map_err(|source| CliError::OutputWrite {
            path: path.to_string(),
            source,
        }),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
