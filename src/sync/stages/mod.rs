pub mod process;
pub mod receive;
