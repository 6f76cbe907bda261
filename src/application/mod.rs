pub mod catalog;
pub mod circulation;
mod dependencies;
pub mod payment;

pub use dependencies::ServiceDependencies;
