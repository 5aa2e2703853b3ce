// Script construction for fixture transactions.
// Builds locking and unlocking scripts byte by byte; no interpreter lives here.

/// Opcodes used by the fixture scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// Push an empty array
    Op0 = 0x00,
    /// Push the number 1 (OP_TRUE) - the anyone-can-spend lock
    OpTrue = 0x51,
    /// Duplicate the top stack item
    OpDup = 0x76,
    /// Verify that the top two items are equal
    OpEqualVerify = 0x88,
    /// Hash the top stack item with HASH160
    OpHash160 = 0xa9,
    /// Check signature
    OpCheckSig = 0xac,
}

const OP_PUSHDATA1: u8 = 0x4c;
const OP_PUSHDATA2: u8 = 0x4d;

/// Incremental script builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    bytes: Vec<u8>,
}

impl Script {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append a bare opcode
    pub fn push_opcode(mut self, op: Opcode) -> Self {
        self.bytes.push(op as u8);
        self
    }

    /// Append a literal data push with the minimal push prefix
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        match data.len() {
            0 => self.bytes.push(Opcode::Op0 as u8),
            1..=75 => {
                self.bytes.push(data.len() as u8);
                self.bytes.extend_from_slice(data);
            }
            76..=255 => {
                self.bytes.push(OP_PUSHDATA1);
                self.bytes.push(data.len() as u8);
                self.bytes.extend_from_slice(data);
            }
            _ => {
                self.bytes.push(OP_PUSHDATA2);
                self.bytes.extend_from_slice(&(data.len() as u16).to_le_bytes());
                self.bytes.extend_from_slice(data);
            }
        }
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// P2PKH locking script:
    /// OP_DUP OP_HASH160 <pubkey hash> OP_EQUALVERIFY OP_CHECKSIG
    pub fn p2pkh(pubkey_hash: &[u8; 20]) -> Vec<u8> {
        Script::new()
            .push_opcode(Opcode::OpDup)
            .push_opcode(Opcode::OpHash160)
            .push_slice(pubkey_hash)
            .push_opcode(Opcode::OpEqualVerify)
            .push_opcode(Opcode::OpCheckSig)
            .into_bytes()
    }

    /// P2PK locking script: <pubkey> OP_CHECKSIG
    pub fn p2pk(pubkey: &[u8]) -> Vec<u8> {
        Script::new()
            .push_slice(pubkey)
            .push_opcode(Opcode::OpCheckSig)
            .into_bytes()
    }

    /// Locking script that always evaluates true, so tests can spend the
    /// output without producing a signature
    pub fn anyone_can_spend() -> Vec<u8> {
        Script::new().push_opcode(Opcode::OpTrue).into_bytes()
    }
}

/// Encode an integer as a minimal script number.
///
/// Zero encodes as the empty array. Other values are the absolute value in
/// little-endian order; if the top byte's high bit is taken, a sign byte
/// (0x80 for negatives, 0x00 otherwise) is appended, else a negative value
/// sets the high bit of the top byte in place.
pub fn encode_script_num(value: i64) -> Vec<u8> {
    let mut result = Vec::new();
    if value == 0 {
        return result;
    }

    let negative = value < 0;
    let mut absvalue = value.unsigned_abs();
    while absvalue != 0 {
        result.push((absvalue & 0xff) as u8);
        absvalue >>= 8;
    }

    let last = *result.last().expect("nonzero value emits at least one byte");
    if last & 0x80 != 0 {
        result.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        *result.last_mut().expect("nonzero value emits at least one byte") |= 0x80;
    }
    result
}

/// Decode a script number produced by `encode_script_num`
pub fn decode_script_num(bytes: &[u8]) -> i64 {
    if bytes.is_empty() {
        return 0;
    }

    let mut result: i64 = 0;
    for (i, byte) in bytes.iter().enumerate() {
        let b = if i == bytes.len() - 1 { byte & 0x7f } else { *byte };
        result |= (b as i64) << (8 * i);
    }

    if bytes[bytes.len() - 1] & 0x80 != 0 {
        -result
    } else {
        result
    }
}
