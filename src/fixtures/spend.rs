// Spending-transaction fixture construction

use crate::core::{OutPoint, Transaction, TxInput, TxOutput};
use super::BuildError;

/// Create a transaction spending output `n` of `prev`.
///
/// The single output carries `value` behind an empty locking script, so the
/// fixture stays spendable without signatures. Fails with
/// `BuildError::OutOfRange` when `prev` has no output `n`; nothing is
/// constructed in that case.
pub fn create_transaction(
    prev: &Transaction,
    n: u32,
    script_sig: Vec<u8>,
    value: i64,
) -> Result<Transaction, BuildError> {
    if n as usize >= prev.outputs.len() {
        return Err(BuildError::OutOfRange {
            index: n as usize,
            len: prev.outputs.len(),
        });
    }

    let input = TxInput::new(OutPoint::new(prev.txid(), n), script_sig);
    let output = TxOutput::new(value, Vec::new());

    Ok(Transaction::finalized(vec![input], vec![output]))
}
