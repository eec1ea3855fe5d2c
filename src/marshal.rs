//! Wire formats for payloads and incoming headers.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    codec::{Decode, Encode},
    error::Error,
};

/// Anything that can go through either wire format.
pub trait Marshal: Serialize + DeserializeOwned + Encode + Decode {}

impl<T> Marshal for T where T: Serialize + DeserializeOwned + Encode + Decode {}

pub trait Marshaller: Send + Sync {
    fn marshal<T: Marshal>(&self, obj: &T) -> Result<Vec<u8>, Error>;

    fn unmarshal<T: Marshal>(&self, bytes: &[u8]) -> Result<T, Error>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaller;

impl Marshaller for JsonMarshaller {
    fn marshal<T: Marshal>(&self, obj: &T) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(obj)?)
    }

    fn unmarshal<T: Marshal>(&self, bytes: &[u8]) -> Result<T, Error> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Marshaller backed by the compact binary codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryMarshaller;

impl Marshaller for BinaryMarshaller {
    fn marshal<T: Marshal>(&self, obj: &T) -> Result<Vec<u8>, Error> {
        Ok(obj.encode())
    }

    fn unmarshal<T: Marshal>(&self, bytes: &[u8]) -> Result<T, Error> {
        Ok(T::decode_exact(bytes)?)
    }
}

/// Marshaller selected through configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarshallerKind {
    #[default]
    Json,
    Binary,
}

impl Marshaller for MarshallerKind {
    fn marshal<T: Marshal>(&self, obj: &T) -> Result<Vec<u8>, Error> {
        match self {
            Self::Json => JsonMarshaller.marshal(obj),
            Self::Binary => BinaryMarshaller.marshal(obj),
        }
    }

    fn unmarshal<T: Marshal>(&self, bytes: &[u8]) -> Result<T, Error> {
        match self {
            Self::Json => JsonMarshaller.unmarshal(bytes),
            Self::Binary => BinaryMarshaller.unmarshal(bytes),
        }
    }
}
