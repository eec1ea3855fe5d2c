pub mod address;
pub mod codec;
pub mod config;
pub mod data;
pub mod error;
pub mod factory;
pub mod hashing;
pub mod marshal;
pub mod process;
pub mod sharding;
pub mod shutdown;
pub mod subscribers;
pub mod sync;

#[cfg(test)]
mod testscommon;

pub use codec::{DecodingError, DecodingResult};
pub use error::Error;
