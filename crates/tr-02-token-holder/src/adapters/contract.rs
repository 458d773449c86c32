//! The holder's ABI surface.
//!
//! Relayers submit signed calls through it; a confirmed wallet transaction
//! reaches `authorizeSession` / `revokeSession` the same way.

use shared_types::abi::{encode, encode_call, split_selector, AbiReader, Token, WORD};
use shared_bus::EventPublisher;
use shared_types::{selector, AbiError, Address, Bytes, Contract, EcdsaSignature, Hash, Revert, U256};

use crate::domain::{
    execute_rule_call_prefix, revert_redemption_call_prefix, ExecutionReceipt,
    AUTHORIZE_SESSION_SIGNATURE, REVOKE_SESSION_SIGNATURE,
};
use crate::ports::inbound::TokenHolderApi;
use crate::ports::outbound::{BlockClock, CallDispatcher, MultiSigWallet, TokenLedger, TransferGate};
use crate::service::TokenHolderService;

/// `executeRule(to, data, nonce, v, r, s)` calldata.
#[must_use]
pub fn execute_rule_calldata(
    to: Address,
    data: &[u8],
    nonce: U256,
    signature: &EcdsaSignature,
) -> Vec<u8> {
    encode_call(
        execute_rule_call_prefix(),
        &[
            Token::Address(to),
            Token::Bytes(data.to_vec()),
            Token::Uint(nonce),
            Token::Uint(U256::from(signature.v)),
            Token::FixedBytes(Hash(signature.r)),
            Token::FixedBytes(Hash(signature.s)),
        ],
    )
}

/// `revertRedemption(hash, nonce, v, r, s)` calldata.
#[must_use]
pub fn revert_redemption_calldata(
    redeem_message_hash: Hash,
    nonce: U256,
    signature: &EcdsaSignature,
) -> Vec<u8> {
    encode_call(
        revert_redemption_call_prefix(),
        &[
            Token::FixedBytes(redeem_message_hash),
            Token::Uint(nonce),
            Token::Uint(U256::from(signature.v)),
            Token::FixedBytes(Hash(signature.r)),
            Token::FixedBytes(Hash(signature.s)),
        ],
    )
}

/// `authorizeSession(key, limit, expiration)` calldata, as queued in the wallet.
#[must_use]
pub fn authorize_session_calldata(
    ephemeral_key: Address,
    spending_limit: U256,
    expiration_height: u64,
) -> Vec<u8> {
    encode_call(
        selector(AUTHORIZE_SESSION_SIGNATURE),
        &[
            Token::Address(ephemeral_key),
            Token::Uint(spending_limit),
            Token::Uint(U256::from(expiration_height)),
        ],
    )
}

/// `revokeSession(key)` calldata.
#[must_use]
pub fn revoke_session_calldata(ephemeral_key: Address) -> Vec<u8> {
    encode_call(
        selector(REVOKE_SESSION_SIGNATURE),
        &[Token::Address(ephemeral_key)],
    )
}

fn read_u8(args: &AbiReader<'_>, index: usize) -> Result<u8, AbiError> {
    let value = args.uint(index)?;
    if value > U256::from(u8::MAX) {
        return Err(AbiError::Overflow { offset: index * WORD });
    }
    Ok(value.low_u32() as u8)
}

fn read_u64(args: &AbiReader<'_>, index: usize) -> Result<u64, AbiError> {
    let value = args.uint(index)?;
    if value > U256::from(u64::MAX) {
        return Err(AbiError::Overflow { offset: index * WORD });
    }
    Ok(value.low_u64())
}

fn read_signature(args: &AbiReader<'_>, first: usize) -> Result<EcdsaSignature, AbiError> {
    Ok(EcdsaSignature::new(
        read_u8(args, first)?,
        args.fixed_bytes(first + 1)?.0,
        args.fixed_bytes(first + 2)?.0,
    ))
}

fn receipt_output(receipt: &ExecutionReceipt) -> Bytes {
    Bytes::from(encode(&[
        Token::FixedBytes(receipt.message_hash),
        Token::Bool(receipt.status),
    ]))
}

impl<T, G, W, D, B, E> Contract for TokenHolderService<T, G, W, D, B, E>
where
    T: TokenLedger,
    G: TransferGate,
    W: MultiSigWallet,
    D: CallDispatcher,
    B: BlockClock,
    E: EventPublisher,
{
    fn call(&self, caller: Address, value: U256, data: &[u8]) -> Result<Bytes, Revert> {
        let (function, args) = split_selector(data)?;
        let args = AbiReader::new(args);

        if function == execute_rule_call_prefix() {
            let receipt = self.execute_rule(
                caller,
                value,
                args.address(0)?,
                &args.bytes(1)?,
                args.uint(2)?,
                read_signature(&args, 3)?,
            )?;
            Ok(receipt_output(&receipt))
        } else if function == revert_redemption_call_prefix() {
            let receipt = self.revert_redemption(
                caller,
                value,
                args.fixed_bytes(0)?,
                args.uint(1)?,
                read_signature(&args, 2)?,
            )?;
            Ok(receipt_output(&receipt))
        } else if function == selector(AUTHORIZE_SESSION_SIGNATURE) {
            self.authorize_session(
                caller,
                args.address(0)?,
                args.uint(1)?,
                read_u64(&args, 2)?,
            )?;
            Ok(Bytes::new())
        } else if function == selector(REVOKE_SESSION_SIGNATURE) {
            self.revoke_session(caller, args.address(0)?)?;
            Ok(Bytes::new())
        } else {
            Err(AbiError::UnknownSelector(function.0).into())
        }
    }
}
