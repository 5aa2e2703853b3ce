// Coinbase fixture construction

use crate::core::{Script, Transaction, TxInput, TxOutput, encode_script_num, ser_string};
use secp256k1::PublicKey;
use super::params::{BACKBONE_PUBKEY_HASH, BLOCK_REWARD, MN_PAYMENT_START_HEIGHT, SUPERBLOCK_CYCLE};

/// Create a coinbase transaction for the given height, assuming no fees.
///
/// The signature script commits the height as a length-prefixed minimal
/// script number, so the block's claimed height can be verified from its
/// coinbase. The reward is split into two equal outputs: the miner output,
/// P2PK to `pubkey` when one is given and anyone-can-spend otherwise, and a
/// P2PKH output to the network's fixed second-tier test address.
///
/// The returned transaction is finalized and carries the height as sidecar
/// data for `BlockAssembler` to pick up.
pub fn create_coinbase(height: u32, pubkey: Option<&PublicKey>) -> Transaction {
    let script_sig = ser_string(&encode_script_num(height as i64));
    let input = TxInput::coinbase(script_sig);

    let miner_script = match pubkey {
        Some(pk) => Script::p2pk(&pk.serialize()),
        None => Script::anyone_can_spend(),
    };
    let miner_output = TxOutput::new(BLOCK_REWARD, miner_script);
    let backbone_output = TxOutput::new(BLOCK_REWARD, Script::p2pkh(&BACKBONE_PUBKEY_HASH));

    // Consensus gates kept as explicit branch points. The reward split above
    // is the same on both sides today; tests extend these per the rule
    // version under exercise.
    if height >= MN_PAYMENT_START_HEIGHT {
        log::debug!("coinbase height {} is past masternode payment activation", height);
    }

    if height > 0 && height % SUPERBLOCK_CYCLE == 0 {
        log::debug!("coinbase height {} lands on a superblock cycle boundary", height);
    }

    Transaction::finalized(vec![input], vec![miner_output, backbone_output])
        .with_fixture_height(height)
}
