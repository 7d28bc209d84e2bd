pub mod schema;

pub use schema::{Config, DatabaseConfig, GeneratorConfig};
