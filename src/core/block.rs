// Block structures and their wire encoding

use crate::core::{Hash256, Serializable, Transaction, hash256};
use std::io::{Cursor, Read, Write};
use super::serialize::{MAX_PREALLOC_ITEMS, read_varint, write_varint};

/// Serialized header size in bytes
pub const HEADER_SIZE: usize = 84;

/// Block header.
///
/// The target network commits the block height into its header, so the
/// header carries a height field between bits and nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// Block version
    pub version: u32,
    /// Hash of the previous block
    pub prev_block_hash: Hash256,
    /// Merkle root over the block's transaction ids
    pub merkle_root: Hash256,
    /// Block timestamp (Unix epoch seconds)
    pub timestamp: u32,
    /// Difficulty target in compact form
    pub bits: u32,
    /// Height claimed by this block
    pub height: u32,
    /// Proof-of-work nonce
    pub nonce: u32,
}

impl BlockHeader {
    pub fn new(
        version: u32,
        prev_block_hash: Hash256,
        merkle_root: Hash256,
        timestamp: u32,
        bits: u32,
        height: u32,
        nonce: u32,
    ) -> Self {
        Self {
            version,
            prev_block_hash,
            merkle_root,
            timestamp,
            bits,
            height,
            nonce,
        }
    }

    /// The block id: double SHA256 over the serialized header
    pub fn hash(&self) -> Hash256 {
        hash256(&self.serialize())
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_SIZE);
        buf.write_all(&self.version.to_le_bytes()).unwrap();
        buf.write_all(self.prev_block_hash.as_bytes()).unwrap();
        buf.write_all(self.merkle_root.as_bytes()).unwrap();
        buf.write_all(&self.timestamp.to_le_bytes()).unwrap();
        buf.write_all(&self.bits.to_le_bytes()).unwrap();
        buf.write_all(&self.height.to_le_bytes()).unwrap();
        buf.write_all(&self.nonce.to_le_bytes()).unwrap();
        buf
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, String> {
        if data.len() < HEADER_SIZE {
            return Err(format!("block header too short: {} bytes", data.len()));
        }

        let mut cursor = Cursor::new(data);
        Self::from_reader(&mut cursor)
    }

    pub fn from_reader(reader: &mut dyn Read) -> Result<Self, String> {
        let mut u32_bytes = [0u8; 4];
        let mut hash_bytes = [0u8; 32];

        reader.read_exact(&mut u32_bytes).map_err(|e| e.to_string())?;
        let version = u32::from_le_bytes(u32_bytes);

        reader.read_exact(&mut hash_bytes).map_err(|e| e.to_string())?;
        let prev_block_hash = Hash256::new(hash_bytes);

        reader.read_exact(&mut hash_bytes).map_err(|e| e.to_string())?;
        let merkle_root = Hash256::new(hash_bytes);

        reader.read_exact(&mut u32_bytes).map_err(|e| e.to_string())?;
        let timestamp = u32::from_le_bytes(u32_bytes);

        reader.read_exact(&mut u32_bytes).map_err(|e| e.to_string())?;
        let bits = u32::from_le_bytes(u32_bytes);

        reader.read_exact(&mut u32_bytes).map_err(|e| e.to_string())?;
        let height = u32::from_le_bytes(u32_bytes);

        reader.read_exact(&mut u32_bytes).map_err(|e| e.to_string())?;
        let nonce = u32::from_le_bytes(u32_bytes);

        Ok(Self {
            version,
            prev_block_hash,
            merkle_root,
            timestamp,
            bits,
            height,
            nonce,
        })
    }
}

/// Block - header plus the ordered transaction list, coinbase first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            transactions,
        }
    }

    /// The block id, derived from the header
    pub fn hash(&self) -> Hash256 {
        self.header.hash()
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    pub fn is_genesis(&self) -> bool {
        self.header.prev_block_hash.is_zero()
    }
}

impl Serializable for Block {
    fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        buf.write_all(&self.header.serialize()).unwrap();

        write_varint(&mut buf, self.transactions.len() as u64).unwrap();
        for tx in &self.transactions {
            buf.write_all(&tx.serialize()).unwrap();
        }

        buf
    }

    fn deserialize(data: &[u8]) -> Result<Self, String> {
        let mut cursor = Cursor::new(data);

        let header = BlockHeader::from_reader(&mut cursor)?;

        // untrusted count; cap the preallocation
        let tx_count = read_varint(&mut cursor).map_err(|e| e.to_string())? as usize;
        let mut transactions = Vec::with_capacity(tx_count.min(MAX_PREALLOC_ITEMS));
        for _ in 0..tx_count {
            transactions.push(Transaction::from_reader(&mut cursor)?);
        }

        Ok(Self {
            header,
            transactions,
        })
    }
}
