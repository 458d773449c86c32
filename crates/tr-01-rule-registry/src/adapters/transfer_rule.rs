//! A minimal rule contract.

use std::sync::Arc;

use shared_types::abi::{encode_call, split_selector, AbiReader, Token};
use shared_types::{selector, AbiError, Address, Bytes, Contract, Revert, U256};

use super::contract::signatures::EXECUTE_TRANSFERS;

/// Signature of the single function a [`TransferRule`] answers.
pub const TRANSFER_FROM: &str = "transferFrom(address,address,uint256)";

/// Rule answering `transferFrom(from, to, amount)` by asking the registry
/// to `executeTransfers(from, [to], [amount])` as itself.
pub struct TransferRule {
    address: Address,
    registry: Arc<dyn Contract>,
}

impl TransferRule {
    /// Rule deployed at `address` talking to `registry`.
    pub fn new(address: Address, registry: Arc<dyn Contract>) -> Self {
        Self { address, registry }
    }

    /// Address the rule is deployed at.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Calldata for `transferFrom(from, to, amount)`.
    #[must_use]
    pub fn transfer_from_calldata(from: Address, to: Address, amount: U256) -> Vec<u8> {
        encode_call(
            selector(TRANSFER_FROM),
            &[Token::Address(from), Token::Address(to), Token::Uint(amount)],
        )
    }
}

impl Contract for TransferRule {
    fn call(&self, _caller: Address, _value: U256, data: &[u8]) -> Result<Bytes, Revert> {
        let (function, args) = split_selector(data)?;
        if function != selector(TRANSFER_FROM) {
            return Err(AbiError::UnknownSelector(function.0).into());
        }

        let args = AbiReader::new(args);
        let payload = encode_call(
            selector(EXECUTE_TRANSFERS),
            &[
                Token::Address(args.address(0)?),
                Token::AddressArray(vec![args.address(1)?]),
                Token::UintArray(vec![args.uint(2)?]),
            ],
        );
        self.registry.call(self.address, U256::zero(), &payload)
    }
}
