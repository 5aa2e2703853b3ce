// JSON dumps of generated fixtures for harness consumption

use crate::core::{Block, Serializable, Transaction};
use serde::{Deserialize, Serialize};

/// Serializable description of a generated transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDump {
    pub txid: String,
    pub hex: String,
}

impl TransactionDump {
    pub fn from_transaction(tx: &Transaction) -> Self {
        Self {
            txid: tx.txid().to_hex(),
            hex: hex::encode(tx.serialize()),
        }
    }
}

/// Serializable description of a generated block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDump {
    pub hash: String,
    pub prev_block_hash: String,
    pub merkle_root: String,
    pub timestamp: u32,
    pub bits: u32,
    pub height: u32,
    pub hex: String,
    pub transactions: Vec<TransactionDump>,
}

impl BlockDump {
    pub fn from_block(block: &Block) -> Self {
        Self {
            hash: block.hash().to_hex(),
            prev_block_hash: block.header.prev_block_hash.to_hex(),
            merkle_root: block.header.merkle_root.to_hex(),
            timestamp: block.header.timestamp,
            bits: block.header.bits,
            height: block.header.height,
            hex: hex::encode(block.serialize()),
            transactions: block
                .transactions
                .iter()
                .map(TransactionDump::from_transaction)
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("failed to serialize block dump: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Hash256;
    use crate::fixtures::{create_block, create_coinbase};

    #[test]
    fn test_block_dump_fields() {
        let block = create_block(
            Hash256::new([4; 32]),
            create_coinbase(100, None),
            Some(1_600_000_000),
            None,
        );
        let dump = BlockDump::from_block(&block);

        assert_eq!(dump.hash, block.hash().to_hex());
        assert_eq!(dump.height, 100);
        assert_eq!(dump.timestamp, 1_600_000_000);
        assert_eq!(dump.transactions.len(), 1);
        assert_eq!(dump.transactions[0].txid, block.transactions[0].txid().to_hex());
        assert_eq!(dump.hex, hex::encode(block.serialize()));
    }

    #[test]
    fn test_block_dump_json_round_trip() {
        let block = create_block(
            Hash256::zero(),
            create_coinbase(1, None),
            Some(1_600_000_000),
            None,
        );
        let dump = BlockDump::from_block(&block);

        let json = dump.to_json().unwrap();
        let decoded: BlockDump = serde_json::from_str(&json).unwrap();
        assert_eq!(dump, decoded);
    }
}
