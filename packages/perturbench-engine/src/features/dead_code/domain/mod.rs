pub mod templates;

pub use templates::{templates, DeadCodeTemplate, InsertionContext, TemplateKind};
