pub mod memory;
pub mod mock;
