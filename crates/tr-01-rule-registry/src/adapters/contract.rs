//! The registry's ABI surface.
//!
//! Lets a rule, or a signed payload relayed by the token holder, reach the
//! registry by address through the `Contract` port.

use shared_types::abi::{encode, split_selector, AbiReader, Token};
use shared_types::{selector, AbiError, Address, Bytes, Contract, Revert, U256};

use crate::ports::inbound::RuleRegistryApi;
use crate::ports::outbound::{ConstraintDirectory, TokenLedger, WorkerOrganization};
use crate::service::RuleRegistryService;
use shared_bus::EventPublisher;

/// Function signatures the registry answers.
pub mod signatures {
    pub const ALLOW_TRANSFERS: &str = "allowTransfers()";
    pub const DISALLOW_TRANSFERS: &str = "disallowTransfers()";
    pub const PROCESS_TRANSFER: &str = "processTransfer(address,uint256)";
    pub const PROCESS_TRANSFERS: &str = "processTransfers(address[],uint256[])";
    pub const EXECUTE_TRANSFERS: &str = "executeTransfers(address,address[],uint256[])";
}

fn success() -> Bytes {
    Bytes::from(encode(&[Token::Bool(true)]))
}

impl<T, O, C, E> Contract for RuleRegistryService<T, O, C, E>
where
    T: TokenLedger,
    O: WorkerOrganization,
    C: ConstraintDirectory,
    E: EventPublisher,
{
    fn call(&self, caller: Address, _value: U256, data: &[u8]) -> Result<Bytes, Revert> {
        let (function, args) = split_selector(data)?;
        let args = AbiReader::new(args);

        if function == selector(signatures::ALLOW_TRANSFERS) {
            self.allow_transfers(caller);
            Ok(Bytes::new())
        } else if function == selector(signatures::DISALLOW_TRANSFERS) {
            self.disallow_transfers(caller);
            Ok(Bytes::new())
        } else if function == selector(signatures::PROCESS_TRANSFER) {
            self.process_transfer(caller, args.address(0)?, args.uint(1)?)?;
            Ok(success())
        } else if function == selector(signatures::PROCESS_TRANSFERS) {
            self.process_transfers(caller, &args.address_array(0)?, &args.uint_array(1)?)?;
            Ok(success())
        } else if function == selector(signatures::EXECUTE_TRANSFERS) {
            self.execute_transfers(
                caller,
                args.address(0)?,
                &args.address_array(1)?,
                &args.uint_array(2)?,
            )?;
            Ok(success())
        } else {
            Err(AbiError::UnknownSelector(function.0).into())
        }
    }
}
