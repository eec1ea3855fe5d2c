use crate::error::Error;

/// Assigns addresses to main chain shards.
pub trait ShardCoordinator: Send + Sync {
    fn compute_id(&self, address: &[u8]) -> u32;

    fn number_of_shards(&self) -> u32;
}

/// Mask based assignment over the trailing bytes of an address.
///
/// The lowest `ceil(log2(n))` bits of the address select the shard. When that lands past the last
/// shard one bit is dropped, so every address maps onto `0..n`.
#[derive(Debug, Clone)]
pub struct MultiShardCoordinator {
    number_of_shards: u32,
    mask_high: u32,
    mask_low: u32,
}

impl MultiShardCoordinator {
    pub fn new(number_of_shards: u32) -> Result<Self, Error> {
        if number_of_shards == 0 {
            return Err(Error::InvalidNumberOfShards);
        }

        let bits = if number_of_shards == 1 {
            0
        } else {
            u32::BITS - (number_of_shards - 1).leading_zeros()
        };

        let mask_high = ((1u64 << bits) - 1) as u32;
        let mask_low = match bits {
            0 => 0,
            bits => ((1u64 << (bits - 1)) - 1) as u32,
        };

        Ok(Self {
            number_of_shards,
            mask_high,
            mask_low,
        })
    }
}

impl ShardCoordinator for MultiShardCoordinator {
    fn compute_id(&self, address: &[u8]) -> u32 {
        let bytes_needed = (self.number_of_shards / 256 + 1) as usize;
        let start = address.len().saturating_sub(bytes_needed);

        let value = address[start..]
            .iter()
            .fold(0u32, |acc, b| (acc << 8).wrapping_add(*b as u32));

        let shard = value & self.mask_high;

        if shard > self.number_of_shards - 1 {
            value & self.mask_low
        } else {
            shard
        }
    }

    fn number_of_shards(&self) -> u32 {
        self.number_of_shards
    }
}
