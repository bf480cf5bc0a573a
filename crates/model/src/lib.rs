pub mod core;
pub mod schema;
