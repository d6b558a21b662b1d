pub mod injector;

pub use injector::{DeadCodeInjector, InjectionOutcome};
