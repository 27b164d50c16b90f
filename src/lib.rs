pub mod assemble;
pub mod commands;
pub mod csv;
pub mod error;
pub mod graph;
pub mod model;
pub mod output;
pub mod schema;
pub mod source;
