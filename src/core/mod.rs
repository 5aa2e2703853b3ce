// Wire-format primitives: identifiers, transactions, blocks, scripts

mod block;
mod hash;
mod merkle;
mod serialize;
mod transaction;
mod types;
pub mod script;

pub use block::*;
pub use hash::*;
pub use merkle::*;
pub use serialize::*;
pub use transaction::*;
pub use types::*;
pub use script::{Opcode, Script, decode_script_num, encode_script_num};
