// blocktools - deterministic block and transaction fixtures for
// regression-testing a node's consensus rules.
//
// The crate builds coinbase transactions, spends of their outputs and full
// blocks with the exact wire encoding the node under test expects. It never
// validates consensus rules, executes scripts or searches for proof of work;
// every fixture is a pure, synchronous in-memory value.

pub mod core;
pub mod fixtures;

// Re-exports for convenience
pub use self::core::{
    Block, BlockHeader, Hash256, Opcode, OutPoint, Script, Serializable, Transaction, TxInput,
    TxOutput, decode_script_num, encode_script_num, hash160, hash256, merkle_root, ser_string,
};
pub use self::fixtures::{
    BlockAssembler, BlockDump, BuildError, FixedTimeSource, SystemTimeSource, TimeSource,
    TransactionDump, create_block, create_coinbase, create_transaction,
};
