pub mod driver;

pub use driver::{PerturbationDriver, PerturbationRecord};
