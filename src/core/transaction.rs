// Transaction structures and their wire encoding

use crate::core::{Hash256, hash256, Serializable};
use std::io::{Cursor, Read, Write};
use super::serialize::{
    MAX_PREALLOC_ITEMS, read_var_bytes, read_varint, write_var_bytes, write_varint,
};

/// Sequence number that disables relative-lock-time semantics
pub const SEQUENCE_FINAL: u32 = 0xffffffff;

/// Reference to a specific output of a prior transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutPoint {
    /// Id of the transaction being spent
    pub txid: Hash256,
    /// Index of the output in that transaction
    pub vout: u32,
}

impl OutPoint {
    pub fn new(txid: Hash256, vout: u32) -> Self {
        Self { txid, vout }
    }

    /// The sentinel outpoint used by coinbase inputs (zero id, max index)
    pub fn coinbase() -> Self {
        Self {
            txid: Hash256::zero(),
            vout: 0xffffffff,
        }
    }

    pub fn is_coinbase(&self) -> bool {
        self.txid.is_zero() && self.vout == 0xffffffff
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(36);
        buf.write_all(self.txid.as_bytes()).unwrap();
        buf.write_all(&self.vout.to_le_bytes()).unwrap();
        buf
    }

    pub fn deserialize(reader: &mut dyn Read) -> Result<Self, String> {
        let mut txid_bytes = [0u8; 32];
        reader.read_exact(&mut txid_bytes).map_err(|e| e.to_string())?;

        let mut vout_bytes = [0u8; 4];
        reader.read_exact(&mut vout_bytes).map_err(|e| e.to_string())?;

        Ok(Self {
            txid: Hash256::new(txid_bytes),
            vout: u32::from_le_bytes(vout_bytes),
        })
    }
}

/// Transaction input - spends a previous output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxInput {
    /// Output being spent
    pub prevout: OutPoint,
    /// Unlocking script (scriptSig)
    pub script_sig: Vec<u8>,
    /// Sequence number
    pub sequence: u32,
}

impl TxInput {
    /// Create an input with the final sequence number
    pub fn new(prevout: OutPoint, script_sig: Vec<u8>) -> Self {
        Self {
            prevout,
            script_sig,
            sequence: SEQUENCE_FINAL,
        }
    }

    /// Create a coinbase input over the sentinel outpoint
    pub fn coinbase(script_sig: Vec<u8>) -> Self {
        Self::new(OutPoint::coinbase(), script_sig)
    }

    pub fn is_coinbase(&self) -> bool {
        self.prevout.is_coinbase()
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.write_all(&self.prevout.serialize()).unwrap();
        write_var_bytes(&mut buf, &self.script_sig).unwrap();
        buf.write_all(&self.sequence.to_le_bytes()).unwrap();
        buf
    }

    pub fn deserialize(reader: &mut dyn Read) -> Result<Self, String> {
        let prevout = OutPoint::deserialize(reader)?;
        let script_sig = read_var_bytes(reader).map_err(|e| e.to_string())?;

        let mut sequence_bytes = [0u8; 4];
        reader.read_exact(&mut sequence_bytes).map_err(|e| e.to_string())?;

        Ok(Self {
            prevout,
            script_sig,
            sequence: u32::from_le_bytes(sequence_bytes),
        })
    }
}

/// Transaction output - an amount locked by a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutput {
    /// Amount in the smallest unit of the coin
    pub value: i64,
    /// Locking script (scriptPubKey)
    pub script_pubkey: Vec<u8>,
}

impl TxOutput {
    pub fn new(value: i64, script_pubkey: Vec<u8>) -> Self {
        Self {
            value,
            script_pubkey,
        }
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.write_all(&self.value.to_le_bytes()).unwrap();
        write_var_bytes(&mut buf, &self.script_pubkey).unwrap();
        buf
    }

    pub fn deserialize(reader: &mut dyn Read) -> Result<Self, String> {
        let mut value_bytes = [0u8; 8];
        reader.read_exact(&mut value_bytes).map_err(|e| e.to_string())?;
        let value = i64::from_le_bytes(value_bytes);

        let script_pubkey = read_var_bytes(reader).map_err(|e| e.to_string())?;

        Ok(Self {
            value,
            script_pubkey,
        })
    }
}

/// Transaction.
///
/// The id is fixed when the transaction is finalized; mutating inputs or
/// outputs afterwards is a caller error and leaves a stale id behind.
/// `fixture_height` is sidecar data set on generated coinbases so a block
/// assembler can recover the intended height without re-parsing the
/// signature script; it is never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction version
    pub version: u32,
    /// Transaction inputs
    pub inputs: Vec<TxInput>,
    /// Transaction outputs
    pub outputs: Vec<TxOutput>,
    /// Lock time
    pub lock_time: u32,
    txid: Hash256,
    fixture_height: Option<u32>,
}

impl Transaction {
    /// Build a transaction and fix its id over the canonical serialization
    pub fn finalized(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        let mut tx = Self {
            version: 1,
            inputs,
            outputs,
            lock_time: 0,
            txid: Hash256::zero(),
            fixture_height: None,
        };
        tx.txid = hash256(&tx.serialize());
        tx
    }

    /// Attach the height a fixture coinbase was generated for
    pub fn with_fixture_height(mut self, height: u32) -> Self {
        self.fixture_height = Some(height);
        self
    }

    /// The transaction id fixed at finalization
    pub fn txid(&self) -> Hash256 {
        self.txid
    }

    /// Height recorded by the coinbase fixture builder, if any
    pub fn fixture_height(&self) -> Option<u32> {
        self.fixture_height
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].is_coinbase()
    }

    pub fn total_output_value(&self) -> i64 {
        self.outputs.iter().map(|out| out.value).sum()
    }

    /// Deserialize from a reader, leaving it positioned after the transaction
    pub fn from_reader(reader: &mut dyn Read) -> Result<Self, String> {
        let mut version_bytes = [0u8; 4];
        reader.read_exact(&mut version_bytes).map_err(|e| e.to_string())?;
        let version = u32::from_le_bytes(version_bytes);

        // counts come from untrusted input; cap the preallocation and let
        // the reads grow the vectors
        let input_count = read_varint(reader).map_err(|e| e.to_string())? as usize;
        let mut inputs = Vec::with_capacity(input_count.min(MAX_PREALLOC_ITEMS));
        for _ in 0..input_count {
            inputs.push(TxInput::deserialize(reader)?);
        }

        let output_count = read_varint(reader).map_err(|e| e.to_string())? as usize;
        let mut outputs = Vec::with_capacity(output_count.min(MAX_PREALLOC_ITEMS));
        for _ in 0..output_count {
            outputs.push(TxOutput::deserialize(reader)?);
        }

        let mut lock_time_bytes = [0u8; 4];
        reader.read_exact(&mut lock_time_bytes).map_err(|e| e.to_string())?;
        let lock_time = u32::from_le_bytes(lock_time_bytes);

        let mut tx = Self {
            version,
            inputs,
            outputs,
            lock_time,
            txid: Hash256::zero(),
            fixture_height: None,
        };
        tx.txid = hash256(&tx.serialize());
        Ok(tx)
    }
}

impl Serializable for Transaction {
    fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        buf.write_all(&self.version.to_le_bytes()).unwrap();

        write_varint(&mut buf, self.inputs.len() as u64).unwrap();
        for input in &self.inputs {
            buf.write_all(&input.serialize()).unwrap();
        }

        write_varint(&mut buf, self.outputs.len() as u64).unwrap();
        for output in &self.outputs {
            buf.write_all(&output.serialize()).unwrap();
        }

        buf.write_all(&self.lock_time.to_le_bytes()).unwrap();

        buf
    }

    fn deserialize(data: &[u8]) -> Result<Self, String> {
        let mut cursor = Cursor::new(data);
        Self::from_reader(&mut cursor)
    }
}
