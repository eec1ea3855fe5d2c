use std::sync::Arc;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

use crate::{
    error::Error,
    marshal::{Marshal, Marshaller},
};

pub trait Hasher: Send + Sync {
    fn compute(&self, data: &[u8]) -> Vec<u8>;

    /// Length in bytes of every digest this hasher produces
    fn size(&self) -> usize;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn compute(&self, data: &[u8]) -> Vec<u8> {
        Sha256::digest(data).to_vec()
    }

    fn size(&self) -> usize {
        32
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeccakHasher;

impl Hasher for KeccakHasher {
    fn compute(&self, data: &[u8]) -> Vec<u8> {
        Keccak256::digest(data).to_vec()
    }

    fn size(&self) -> usize {
        32
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    #[default]
    Sha256,
    Keccak,
}

impl HasherKind {
    pub fn hasher(&self) -> Arc<dyn Hasher> {
        match self {
            Self::Sha256 => Arc::new(Sha256Hasher),
            Self::Keccak => Arc::new(KeccakHasher),
        }
    }
}

/// Hash of the marshalled form of `obj`.
pub fn calculate_hash<M, T>(marshaller: &M, hasher: &dyn Hasher, obj: &T) -> Result<Vec<u8>, Error>
where
    M: Marshaller,
    T: Marshal,
{
    let bytes = marshaller.marshal(obj)?;

    Ok(hasher.compute(&bytes))
}
