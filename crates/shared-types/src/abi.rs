//! # ABI Word Codec
//!
//! Minimal Solidity ABI encoding for the call payloads this workspace
//! produces and consumes: a 4-byte selector followed by 32-byte words,
//! with dynamic values (bytes, arrays) placed in the tail and referenced
//! by offset from the head.
//!
//! Only the types the holder, registry, rules and gateway exchange are
//! supported: `address`, `uint256`, `bytes32`, `bool`, `bytes`,
//! `address[]` and `uint256[]`.

use crate::entities::{Address, Hash, Selector, U256};
use crate::errors::AbiError;

/// Size of one ABI word.
pub const WORD: usize = 32;

/// A single ABI value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// `address`
    Address(Address),
    /// `uint256`
    Uint(U256),
    /// `bytes32`
    FixedBytes(Hash),
    /// `bool`
    Bool(bool),
    /// `bytes`
    Bytes(Vec<u8>),
    /// `address[]`
    AddressArray(Vec<Address>),
    /// `uint256[]`
    UintArray(Vec<U256>),
}

impl Token {
    fn is_dynamic(&self) -> bool {
        matches!(
            self,
            Self::Bytes(_) | Self::AddressArray(_) | Self::UintArray(_)
        )
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a word holding an address (left-padded).
#[must_use]
pub fn address_word(address: Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Encodes a word holding a `uint256` (big-endian).
#[must_use]
pub fn uint_word(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

fn encode_tail(token: &Token, out: &mut Vec<u8>) {
    match token {
        Token::Bytes(bytes) => {
            out.extend_from_slice(&uint_word(U256::from(bytes.len())));
            out.extend_from_slice(bytes);
            out.resize(out.len() + padded_len(bytes.len()) - bytes.len(), 0);
        }
        Token::AddressArray(items) => {
            out.extend_from_slice(&uint_word(U256::from(items.len())));
            for item in items {
                out.extend_from_slice(&address_word(*item));
            }
        }
        Token::UintArray(items) => {
            out.extend_from_slice(&uint_word(U256::from(items.len())));
            for item in items {
                out.extend_from_slice(&uint_word(*item));
            }
        }
        Token::Address(_) | Token::Uint(_) | Token::FixedBytes(_) | Token::Bool(_) => {}
    }
}

fn static_word(token: &Token) -> [u8; WORD] {
    match token {
        Token::Address(address) => address_word(*address),
        Token::Uint(value) => uint_word(*value),
        Token::FixedBytes(hash) => hash.0,
        Token::Bool(flag) => uint_word(U256::from(u8::from(*flag))),
        Token::Bytes(_) | Token::AddressArray(_) | Token::UintArray(_) => [0u8; WORD],
    }
}

/// ABI-encodes a tuple of arguments (no selector).
#[must_use]
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_len = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        if token.is_dynamic() {
            head.extend_from_slice(&uint_word(U256::from(head_len + tail.len())));
            encode_tail(token, &mut tail);
        } else {
            head.extend_from_slice(&static_word(token));
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// ABI-encodes a call: `selector ++ encode(tokens)`.
#[must_use]
pub fn encode_call(selector: Selector, tokens: &[Token]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + tokens.len() * WORD);
    out.extend_from_slice(selector.as_bytes());
    out.extend_from_slice(&encode(tokens));
    out
}

// =============================================================================
// DECODING
// =============================================================================

/// Splits calldata into its selector and argument section.
///
/// # Errors
///
/// Returns `AbiError::OutOfBounds` if the payload has fewer than four bytes.
pub fn split_selector(calldata: &[u8]) -> Result<(Selector, &[u8]), AbiError> {
    if calldata.len() < 4 {
        return Err(AbiError::OutOfBounds {
            needed: 4,
            available: calldata.len(),
        });
    }
    Ok((Selector::from_calldata(calldata), &calldata[4..]))
}

/// Reads ABI arguments out of the argument section of a call.
///
/// Positions are head slots: argument `i` lives at byte `i * 32`.
#[derive(Clone, Copy, Debug)]
pub struct AbiReader<'a> {
    data: &'a [u8],
}

impl<'a> AbiReader<'a> {
    /// Wraps an argument section (calldata without the selector).
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn word_at(&self, offset: usize) -> Result<&'a [u8], AbiError> {
        let end = offset
            .checked_add(WORD)
            .ok_or(AbiError::Overflow { offset })?;
        self.data.get(offset..end).ok_or(AbiError::OutOfBounds {
            needed: end,
            available: self.data.len(),
        })
    }

    fn usize_at(&self, offset: usize) -> Result<usize, AbiError> {
        let value = U256::from_big_endian(self.word_at(offset)?);
        if value > U256::from(usize::MAX) {
            return Err(AbiError::Overflow { offset });
        }
        Ok(value.as_usize())
    }

    fn address_at(&self, offset: usize) -> Result<Address, AbiError> {
        let word = self.word_at(offset)?;
        if word[..12].iter().any(|b| *b != 0) {
            return Err(AbiError::InvalidAddress { offset });
        }
        Ok(Address::from_slice(&word[12..]).unwrap_or_default())
    }

    /// Dynamic argument `index`: returns (element count, first element offset).
    fn dynamic(&self, index: usize) -> Result<(usize, usize), AbiError> {
        let offset = self.usize_at(index * WORD)?;
        let len = self.usize_at(offset)?;
        let start = offset
            .checked_add(WORD)
            .ok_or(AbiError::Overflow { offset })?;
        Ok((len, start))
    }

    /// Static `address` argument.
    ///
    /// # Errors
    ///
    /// Fails on short calldata or dirty high-order bytes.
    pub fn address(&self, index: usize) -> Result<Address, AbiError> {
        self.address_at(index * WORD)
    }

    /// Static `uint256` argument.
    ///
    /// # Errors
    ///
    /// Fails on short calldata.
    pub fn uint(&self, index: usize) -> Result<U256, AbiError> {
        Ok(U256::from_big_endian(self.word_at(index * WORD)?))
    }

    /// Static `bytes32` argument.
    ///
    /// # Errors
    ///
    /// Fails on short calldata.
    pub fn fixed_bytes(&self, index: usize) -> Result<Hash, AbiError> {
        let word = self.word_at(index * WORD)?;
        Ok(Hash::from_slice(word).unwrap_or_default())
    }

    /// Static `bool` argument (any non-zero word is true).
    ///
    /// # Errors
    ///
    /// Fails on short calldata.
    pub fn boolean(&self, index: usize) -> Result<bool, AbiError> {
        Ok(!self.uint(index)?.is_zero())
    }

    /// Dynamic `bytes` argument.
    ///
    /// # Errors
    ///
    /// Fails when the offset, length or payload fall outside the calldata.
    pub fn bytes(&self, index: usize) -> Result<Vec<u8>, AbiError> {
        let (len, start) = self.dynamic(index)?;
        let end = start
            .checked_add(len)
            .ok_or(AbiError::Overflow { offset: start })?;
        self.data
            .get(start..end)
            .map(<[u8]>::to_vec)
            .ok_or(AbiError::OutOfBounds {
                needed: end,
                available: self.data.len(),
            })
    }

    /// Dynamic `address[]` argument.
    ///
    /// # Errors
    ///
    /// Fails when any element falls outside the calldata.
    pub fn address_array(&self, index: usize) -> Result<Vec<Address>, AbiError> {
        let (len, start) = self.dynamic(index)?;
        (0..len)
            .map(|i| self.address_at(start + i * WORD))
            .collect()
    }

    /// Dynamic `uint256[]` argument.
    ///
    /// # Errors
    ///
    /// Fails when any element falls outside the calldata.
    pub fn uint_array(&self, index: usize) -> Result<Vec<U256>, AbiError> {
        let (len, start) = self.dynamic(index)?;
        (0..len)
            .map(|i| Ok(U256::from_big_endian(self.word_at(start + i * WORD)?)))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
