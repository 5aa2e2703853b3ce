// Block assembly for fixture chains

use crate::core::{Block, BlockHeader, Hash256, Transaction, merkle_root};
use super::{SystemTimeSource, TimeSource};
use super::params::{BLOCK_TIME_OFFSET_SECS, BLOCK_VERSION, REGTEST_BITS};

/// Assembles a block over a previous hash and a coinbase transaction.
///
/// The assembler is the only way this crate produces a `Block`, and it fixes
/// the finalization order: the transaction list is frozen, the merkle root
/// is computed over it, and only then is the header populated and hashed.
///
/// Blocks carry the regression network's minimum-difficulty bits and no
/// proof of work; they will fail real proof-of-work validation by design,
/// and stop matching the network after any difficulty retarget.
pub struct BlockAssembler {
    prev_block_hash: Hash256,
    transactions: Vec<Transaction>,
    timestamp: Option<u32>,
    height: Option<u32>,
    time_source: Box<dyn TimeSource>,
}

impl BlockAssembler {
    /// Start assembling a block with `coinbase` as its first transaction
    pub fn new(prev_block_hash: Hash256, coinbase: Transaction) -> Self {
        Self {
            prev_block_hash,
            transactions: vec![coinbase],
            timestamp: None,
            height: None,
            time_source: Box::new(SystemTimeSource),
        }
    }

    /// Use an explicit timestamp instead of the clock-derived default
    pub fn with_timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Claim an explicit height, overriding the coinbase's recorded one
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Replace the wall clock used for the default timestamp
    pub fn with_time_source(mut self, time_source: Box<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    /// Append a transaction after the coinbase.
    /// Valid until `finalize`; the merkle root is computed over the final list.
    pub fn add_transaction(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Freeze the transaction list, compute the merkle root, populate the
    /// header and derive the block hash over it
    pub fn finalize(self) -> Block {
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| self.time_source.unix_time() + BLOCK_TIME_OFFSET_SECS);

        // Height comes from the coinbase fixture when not overridden. A
        // foreign coinbase carries no recorded height; callers must then
        // pass one explicitly or the claimed height is meaningless.
        let height = self
            .height
            .or_else(|| self.transactions[0].fixture_height())
            .unwrap_or(0);

        let txids: Vec<Hash256> = self.transactions.iter().map(|tx| tx.txid()).collect();
        let root = merkle_root(&txids);

        let header = BlockHeader::new(
            BLOCK_VERSION,
            self.prev_block_hash,
            root,
            timestamp,
            REGTEST_BITS,
            height,
            0,
        );

        log::debug!(
            "assembled block {} at height {} with {} transactions",
            header.hash(),
            height,
            self.transactions.len()
        );

        Block::new(header, self.transactions)
    }
}

/// One-call mirror of the assembler for the common single-coinbase case
pub fn create_block(
    prev_block_hash: Hash256,
    coinbase: Transaction,
    timestamp: Option<u32>,
    height: Option<u32>,
) -> Block {
    let mut assembler = BlockAssembler::new(prev_block_hash, coinbase);
    if let Some(timestamp) = timestamp {
        assembler = assembler.with_timestamp(timestamp);
    }
    if let Some(height) = height {
        assembler = assembler.with_height(height);
    }
    assembler.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{FixedTimeSource, create_coinbase, create_transaction};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_block_over_single_coinbase() {
        init_logging();
        let prev = Hash256::new([9; 32]);
        let coinbase = create_coinbase(100, None);
        let coinbase_txid = coinbase.txid();

        let block = create_block(prev, coinbase, Some(1_600_000_000), None);

        assert_eq!(block.header.prev_block_hash, prev);
        assert_eq!(block.height(), 100);
        assert_eq!(block.transactions.len(), 1);
        assert_eq!(block.transactions[0].txid(), coinbase_txid);
        assert_eq!(block.header.merkle_root, merkle_root(&[coinbase_txid]));
    }

    #[test]
    fn test_default_timestamp_offset() {
        let coinbase = create_coinbase(1, None);
        let block = BlockAssembler::new(Hash256::zero(), coinbase)
            .with_time_source(Box::new(FixedTimeSource(1_600_000_000)))
            .finalize();

        assert_eq!(block.header.timestamp, 1_600_000_000 + 600);
    }

    #[test]
    fn test_explicit_timestamp_wins() {
        let coinbase = create_coinbase(1, None);
        let block = BlockAssembler::new(Hash256::zero(), coinbase)
            .with_time_source(Box::new(FixedTimeSource(1_600_000_000)))
            .with_timestamp(1_234_567_890)
            .finalize();

        assert_eq!(block.header.timestamp, 1_234_567_890);
    }

    #[test]
    fn test_explicit_height_overrides_coinbase() {
        let coinbase = create_coinbase(100, None);
        let block = create_block(Hash256::zero(), coinbase, Some(0), Some(7));
        assert_eq!(block.height(), 7);
    }

    #[test]
    fn test_regtest_bits_and_version() {
        let block = create_block(Hash256::zero(), create_coinbase(1, None), Some(0), None);
        assert_eq!(block.header.bits, 0x207fffff);
        assert_eq!(block.header.version, BLOCK_VERSION);
        assert_eq!(block.header.nonce, 0);
    }

    #[test]
    fn test_merkle_covers_appended_transactions() {
        let coinbase = create_coinbase(100, None);
        let spend = create_transaction(&coinbase, 0, vec![], 1000).unwrap();

        let mut assembler = BlockAssembler::new(Hash256::zero(), coinbase)
            .with_timestamp(1_600_000_000);
        assembler.add_transaction(spend);
        let block = assembler.finalize();

        assert_eq!(block.transactions.len(), 2);
        let txids: Vec<Hash256> = block.transactions.iter().map(|tx| tx.txid()).collect();
        assert_eq!(block.header.merkle_root, merkle_root(&txids));
    }

    #[test]
    fn test_appending_changes_block_hash() {
        let prev = Hash256::new([1; 32]);

        let single = create_block(prev, create_coinbase(5, None), Some(1_600_000_000), None);

        let coinbase = create_coinbase(5, None);
        let spend = create_transaction(&coinbase, 0, vec![], 42).unwrap();
        let mut assembler = BlockAssembler::new(prev, coinbase).with_timestamp(1_600_000_000);
        assembler.add_transaction(spend);
        let double = assembler.finalize();

        assert_ne!(single.header.merkle_root, double.header.merkle_root);
        assert_ne!(single.hash(), double.hash());
    }

    #[test]
    fn test_same_inputs_same_block_hash() {
        let prev = Hash256::new([2; 32]);
        let a = create_block(prev, create_coinbase(10, None), Some(1_600_000_000), None);
        let b = create_block(prev, create_coinbase(10, None), Some(1_600_000_000), None);
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn test_foreign_coinbase_defaults_to_height_zero() {
        use crate::core::{Transaction, TxInput, TxOutput};

        let foreign = Transaction::finalized(
            vec![TxInput::coinbase(vec![0x00])],
            vec![TxOutput::new(0, vec![])],
        );
        let block = create_block(Hash256::zero(), foreign, Some(0), None);
        assert_eq!(block.height(), 0);
    }
}
