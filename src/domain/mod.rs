pub mod book;
pub mod commands;
pub mod errors;
pub mod fee;
pub mod loan;
pub mod validation;
pub mod value_objects;

pub use book::*;
pub use errors::*;
pub use fee::*;
pub use value_objects::*;
