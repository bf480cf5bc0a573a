pub mod annotations;
pub mod expr;
pub mod tree;
pub mod visitor;
