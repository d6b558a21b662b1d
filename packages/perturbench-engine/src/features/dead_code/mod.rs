//! Dead-Code Injection Feature (Level 2)
//!
//! ## Structure
//! - `domain/` - per-language template catalog
//! - `application/` - DeadCodeInjector

pub mod application;
pub mod domain;

pub use application::{DeadCodeInjector, InjectionOutcome};
pub use domain::{InsertionContext, TemplateKind};
