//! Solidity ABI encoding for the charity contract's calls and decoding of
//! its return data.
//!
//! Only the shapes this contract uses are supported: static `uint256`,
//! `address` and `bool` words, dynamic `string`s, and a dynamic array of
//! project tuples.
//!
//! Selectors are the first four bytes of keccak-256 over the canonical
//! signature and never change for a deployed contract.

use sumcharity_core::{Address, ProjectRecord};

use crate::errors::{PortalError, Result};

const WORD: usize = 32;

/// `projects(uint256)`
pub const PROJECTS_SELECTOR: [u8; 4] = [0x10, 0x70, 0x46, 0xbd];
/// `getAllProjects()`
pub const GET_ALL_PROJECTS_SELECTOR: [u8; 4] = [0x80, 0xd0, 0x38, 0x29];
/// `createProject(string,string,uint256,uint256)`
pub const CREATE_PROJECT_SELECTOR: [u8; 4] = [0x94, 0xba, 0x97, 0x09];
/// `donate(uint256,uint256)`
pub const DONATE_SELECTOR: [u8; 4] = [0x0c, 0xdd, 0x53, 0xf6];
/// `extendDeadline(uint256,uint256)`
pub const EXTEND_DEADLINE_SELECTOR: [u8; 4] = [0x2d, 0x1f, 0xde, 0xf6];
/// `withdraw(uint256)`
pub const WITHDRAW_SELECTOR: [u8; 4] = [0x2e, 0x1a, 0x7d, 0x4d];

/// Topic 0 of `DonationReceived(uint256 indexed projectId, address donor, uint256 amount)`.
pub const DONATION_RECEIVED_TOPIC: &str =
    "0x0b5b4c52969ff7329ecf7ee536409fda87812b15a8622bc6e8cdeab3aee14a26";

// ─────────────────────────────────────────────────────────
// Hex helpers
// ─────────────────────────────────────────────────────────

pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn from_hex(raw: &str) -> Result<Vec<u8>> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(digits).map_err(|e| PortalError::Abi(format!("invalid hex data: {e}")))
}

/// Parse a JSON-RPC quantity such as `"0x1b4"`.
pub fn parse_quantity(raw: &str) -> Result<u64> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| PortalError::Abi(format!("quantity without 0x prefix: {raw}")))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| PortalError::Abi(format!("invalid quantity {raw}: {e}")))
}

pub fn to_quantity(value: u128) -> String {
    format!("{value:#x}")
}

// ─────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────

pub fn uint_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// 32-byte topic for an indexed `uint256`.
pub fn uint_topic(value: u64) -> String {
    to_hex(&uint_word(u128::from(value)))
}

/// Calldata for a function whose arguments are all `uint256`.
pub fn encode_uint_call(selector: [u8; 4], args: &[u128]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + args.len() * WORD);
    out.extend_from_slice(&selector);
    for arg in args {
        out.extend_from_slice(&uint_word(*arg));
    }
    out
}

/// Calldata for `createProject(string _title, string _description, uint256 _targetAmount, uint256 _ddl)`.
pub fn encode_create_project(
    title: &str,
    description: &str,
    target_amount: u128,
    deadline: u64,
) -> Vec<u8> {
    let title_tail = encode_string_tail(title);
    let description_tail = encode_string_tail(description);

    let head_len = 4 * WORD;
    let title_offset = head_len;
    let description_offset = head_len + title_tail.len();

    let mut out = Vec::with_capacity(4 + head_len + title_tail.len() + description_tail.len());
    out.extend_from_slice(&CREATE_PROJECT_SELECTOR);
    out.extend_from_slice(&uint_word(title_offset as u128));
    out.extend_from_slice(&uint_word(description_offset as u128));
    out.extend_from_slice(&uint_word(target_amount));
    out.extend_from_slice(&uint_word(u128::from(deadline)));
    out.extend_from_slice(&title_tail);
    out.extend_from_slice(&description_tail);
    out
}

/// Length word followed by the UTF-8 bytes, zero-padded to a word boundary.
fn encode_string_tail(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let padded = bytes.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(WORD + padded);
    out.extend_from_slice(&uint_word(bytes.len() as u128));
    out.extend_from_slice(bytes);
    out.resize(WORD + padded, 0);
    out
}

// ─────────────────────────────────────────────────────────
// Decoding
// ─────────────────────────────────────────────────────────

/// Bounds-checked reader over ABI-encoded return data.
pub struct Decoder<'a> {
    data: &'a [u8],
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Decoder { data }
    }

    fn word(&self, at: usize) -> Result<&'a [u8]> {
        let end = at
            .checked_add(WORD)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| {
                PortalError::Abi(format!(
                    "word at {at} out of bounds (len {})",
                    self.data.len()
                ))
            })?;
        Ok(&self.data[at..end])
    }

    fn high_bytes_zero(word: &[u8], keep: usize) -> bool {
        word[..WORD - keep].iter().all(|b| *b == 0)
    }

    pub fn u128_at(&self, at: usize) -> Result<u128> {
        let word = self.word(at)?;
        if !Self::high_bytes_zero(word, 16) {
            return Err(PortalError::Abi(format!("uint256 at {at} overflows u128")));
        }
        let mut buf = [0u8; 16];
        buf.copy_from_slice(&word[16..]);
        Ok(u128::from_be_bytes(buf))
    }

    pub fn u64_at(&self, at: usize) -> Result<u64> {
        let word = self.word(at)?;
        if !Self::high_bytes_zero(word, 8) {
            return Err(PortalError::Abi(format!("uint256 at {at} overflows u64")));
        }
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&word[24..]);
        Ok(u64::from_be_bytes(buf))
    }

    pub fn bool_at(&self, at: usize) -> Result<bool> {
        match self.u64_at(at)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(PortalError::Abi(format!("invalid bool {other} at {at}"))),
        }
    }

    pub fn address_at(&self, at: usize) -> Result<Address> {
        let word = self.word(at)?;
        if !Self::high_bytes_zero(word, 20) {
            return Err(PortalError::Abi(format!("dirty address word at {at}")));
        }
        let mut buf = [0u8; 20];
        buf.copy_from_slice(&word[12..]);
        Ok(Address::from_bytes(&buf))
    }

    /// A head-word offset, resolved against `base`.
    pub fn offset_at(&self, at: usize, base: usize) -> Result<usize> {
        let offset = usize::try_from(self.u64_at(at)?)
            .map_err(|_| PortalError::Abi(format!("offset at {at} too large")))?;
        base.checked_add(offset)
            .ok_or_else(|| PortalError::Abi(format!("offset at {at} overflows")))
    }

    pub fn string_at(&self, at: usize) -> Result<String> {
        let len = usize::try_from(self.u64_at(at)?)
            .map_err(|_| PortalError::Abi(format!("string length at {at} too large")))?;
        let start = at + WORD;
        let end = start
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| PortalError::Abi(format!("string at {at} out of bounds")))?;
        String::from_utf8(self.data[start..end].to_vec())
            .map_err(|e| PortalError::Abi(format!("string at {at} is not UTF-8: {e}")))
    }
}

/// Decode the `(id, creator, title, description, targetAmount, raisedAmount,
/// deadline, extendORNot, withdrawORNot)` tuple that starts at `base`.
fn decode_project_at(decoder: &Decoder<'_>, base: usize) -> Result<ProjectRecord> {
    let field = |i: usize| base + i * WORD;

    let title_at = decoder.offset_at(field(2), base)?;
    let description_at = decoder.offset_at(field(3), base)?;

    Ok(ProjectRecord {
        id: decoder.u64_at(field(0))?,
        creator: decoder.address_at(field(1))?,
        title: decoder.string_at(title_at)?,
        description: decoder.string_at(description_at)?,
        target_amount: decoder.u128_at(field(4))?,
        raised_amount: decoder.u128_at(field(5))?,
        deadline: decoder.u64_at(field(6))?,
        extend_flag: decoder.bool_at(field(7))?,
        withdrawn: decoder.bool_at(field(8))?,
    })
}

/// Decode the return data of `projects(uint256)`.
pub fn decode_project(data: &[u8]) -> Result<ProjectRecord> {
    decode_project_at(&Decoder::new(data), 0)
}

/// Decode the return data of `getAllProjects()`: a single dynamic array of
/// dynamic tuples.
pub fn decode_project_list(data: &[u8]) -> Result<Vec<ProjectRecord>> {
    let decoder = Decoder::new(data);
    let array_at = decoder.offset_at(0, 0)?;
    let len = decoder.u64_at(array_at)? as usize;
    let elements_at = array_at + WORD;

    let mut projects = Vec::with_capacity(len.min(1024));
    for i in 0..len {
        let head = elements_at
            .checked_add(i.checked_mul(WORD).unwrap_or(usize::MAX))
            .ok_or_else(|| PortalError::Abi("array head overflows".to_string()))?;
        let tuple_at = decoder.offset_at(head, elements_at)?;
        projects.push(decode_project_at(&decoder, tuple_at)?);
    }
    Ok(projects)
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
