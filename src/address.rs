use crate::error::Error;

/// Length of a decoded main chain address.
pub const ADDRESS_LEN: usize = 32;

/// Converts human readable addresses to the raw bytes found in transactions and logs.
pub trait AddressDecoder: Send + Sync {
    fn decode(&self, encoded: &str) -> Result<Vec<u8>, Error>;

    fn encode(&self, address: &[u8]) -> String;
}

#[derive(Debug, Clone)]
pub struct HexAddressDecoder {
    len: usize,
}

impl HexAddressDecoder {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Default for HexAddressDecoder {
    fn default() -> Self {
        Self::new(ADDRESS_LEN)
    }
}

impl AddressDecoder for HexAddressDecoder {
    fn decode(&self, encoded: &str) -> Result<Vec<u8>, Error> {
        let invalid = |reason: String| Error::InvalidAddress {
            address: encoded.to_string(),
            reason,
        };

        let decoded = hex::decode(encoded).map_err(|e| invalid(e.to_string()))?;

        if decoded.len() != self.len {
            return Err(invalid(format!(
                "expected {} bytes, got {}",
                self.len,
                decoded.len()
            )));
        }

        Ok(decoded)
    }

    fn encode(&self, address: &[u8]) -> String {
        hex::encode(address)
    }
}
