pub mod assembler;
pub mod availability;
