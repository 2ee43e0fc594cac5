pub mod parser;
pub mod settings;
pub mod view;

pub use parser::model::{Category, Observation, ParsedDocument};
pub use parser::process_document;
