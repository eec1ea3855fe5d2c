use super::{Decode, VarUInt};

use indexmap::IndexMap;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DecodingError {
    #[error("Malformed input: {0} ({1:?})")]
    MalformedInput(String, Vec<u8>),
    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("VarUInt casting: {0}")]
    VarUIntCasting(u128),
    #[error("Enum kind: {0:?}")]
    InvalidEnumKind(Vec<u8>),
}

// Helper method to create MalformedInput error with just a message
pub fn malformed_input<S: Into<String>>(msg: S, bytes: &[u8]) -> DecodingError {
    DecodingError::MalformedInput(msg.into(), bytes.to_vec())
}

pub type DecodingResult<'a, T> = Result<(T, &'a [u8]), DecodingError>;

fn take(bytes: &[u8], len: usize) -> DecodingResult<'_, &[u8]> {
    bytes
        .split_at_checked(len)
        .ok_or_else(|| malformed_input("insufficient bytes", bytes))
}

impl<const N: usize> Decode for [u8; N] {
    fn decode(bytes: &[u8]) -> DecodingResult<'_, Self> {
        let (data, rest) = take(bytes, N)?;

        let array = data
            .try_into()
            .map_err(|_| malformed_input("array insufficient bytes", bytes))?;

        Ok((array, rest))
    }
}

impl Decode for u8 {
    fn decode(bytes: &[u8]) -> DecodingResult<'_, Self> {
        bytes
            .split_first()
            .map(|(b, rest)| (*b, rest))
            .ok_or_else(|| malformed_input("u8 insufficient bytes", bytes))
    }
}

impl Decode for bool {
    fn decode(bytes: &[u8]) -> DecodingResult<'_, Self> {
        match u8::decode(bytes)? {
            (0, rest) => Ok((false, rest)),
            (1, rest) => Ok((true, rest)),
            _ => Err(malformed_input("invalid bool byte", bytes)),
        }
    }
}

impl Decode for VarUInt {
    fn decode(bytes: &[u8]) -> DecodingResult<'_, Self> {
        let (len, rest) = u8::decode(bytes)?;
        let len = len as usize;

        if len > 16 {
            return Err(malformed_input("varuint len exceeds maximum", bytes));
        }

        let (data, rest) = take(rest, len)?;

        let mut be_128 = [0u8; 16];
        be_128[16 - len..].copy_from_slice(data);

        Ok((VarUInt(u128::from_be_bytes(be_128)), rest))
    }
}

macro_rules! impl_uint_decode {
    ($t:ty) => {
        impl Decode for $t {
            fn decode(bytes: &[u8]) -> DecodingResult<'_, $t> {
                let (varuint, rem) = VarUInt::decode(bytes)?;

                let casted = Self::try_from(varuint)?;

                Ok((casted, rem))
            }
        }
    };
}

impl_uint_decode!(usize);
impl_uint_decode!(u16);
impl_uint_decode!(u32);
impl_uint_decode!(u64);
impl_uint_decode!(u128);

impl Decode for String {
    fn decode(bytes: &[u8]) -> DecodingResult<'_, Self> {
        let (len, rest) = usize::decode(bytes)?;
        let (data, rest) = take(rest, len)?;

        Ok((String::from_utf8(data.to_vec())?, rest))
    }
}

impl<A: Decode> Decode for Option<A> {
    fn decode(bytes: &[u8]) -> DecodingResult<'_, Self> {
        match u8::decode(bytes)? {
            (0, rest) => Ok((None, rest)),
            (1, rest) => A::decode(rest).map(|(inner, rest)| (Some(inner), rest)),
            _ => Err(malformed_input("invalid option tag", bytes)),
        }
    }
}

impl<A: Decode> Decode for Vec<A> {
    fn decode(bytes: &[u8]) -> DecodingResult<'_, Self> {
        let (len, mut bytes) = usize::decode(bytes)?;

        // every element takes at least one byte, so the length can't exceed what is left
        if len > bytes.len() {
            return Err(malformed_input("sequence length exceeds input", bytes));
        }

        let mut vec = Vec::with_capacity(len);

        for _ in 0..len {
            let (item, rest) = A::decode(bytes)?;
            bytes = rest;

            vec.push(item);
        }

        Ok((vec, bytes))
    }
}

impl<K, V> Decode for IndexMap<K, V>
where
    K: Decode + Eq + std::hash::Hash,
    V: Decode,
{
    fn decode(bytes: &[u8]) -> DecodingResult<'_, Self> {
        let (len, mut bytes) = usize::decode(bytes)?;

        if len > bytes.len() {
            return Err(malformed_input("map length exceeds input", bytes));
        }

        let mut map = IndexMap::with_capacity(len);

        for _ in 0..len {
            let entry = bytes;
            let (key, rest) = K::decode(bytes)?;
            bytes = rest;
            let (value, rest) = V::decode(bytes)?;
            bytes = rest;

            if map.insert(key, value).is_some() {
                return Err(malformed_input("duplicate map key", entry));
            }
        }

        Ok((map, bytes))
    }
}
