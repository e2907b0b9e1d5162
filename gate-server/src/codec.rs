//! Verification Code Codec
//!
//! Turns a purchase id into an opaque, transcription-friendly code:
//! `GM-XXXXXXXX-XXXXXXXX-XXXXXXXX` — constant prefix, three groups of 8
//! from an alphabet that excludes the visually ambiguous `0 O 1 I`.
//!
//! The code is derived from SHA-256(secret, purchase id), so it is
//! deterministic (a re-downloaded pass shows the same code without touching
//! redemption state) and unguessable (recovering a purchase id, or an
//! adjacent valid code, requires a ledger lookup). The codec itself never
//! consults redemption state: parsing only proves "syntactically valid".

use sha2::{Digest, Sha256};
use thiserror::Error;

/// System prefix; also what distinguishes our codes from foreign systems
pub const CODE_PREFIX: &str = "GM";

/// 32 symbols, 5 bits each. Digits 2-9 plus A-Z without O and I.
const ALPHABET: &[u8; 32] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Symbols per group, groups per code
const GROUP_LEN: usize = 8;
const GROUPS: usize = 3;
const BODY_LEN: usize = GROUP_LEN * GROUPS;

/// Code syntax errors — returned before any ledger lookup is attempted,
/// distinct from "well-formed but not found"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeFormatError {
    #[error("code is empty")]
    Empty,

    #[error("code does not start with the {CODE_PREFIX} prefix")]
    BadPrefix,

    #[error("code body must be {BODY_LEN} characters, got {0}")]
    BadLength(usize),

    #[error("code contains invalid character '{0}'")]
    BadCharacter(char),
}

/// A syntactically valid verification code in canonical grouped form
///
/// Canonical form is what the ledger stores, so lookups are exact string
/// matches regardless of how the code was typed (case, spacing, hyphens).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the verification code for a purchase.
///
/// Deterministic for a given (purchase id, secret) pair. The secret is
/// deployment-wide config; rotating it regenerates every code.
pub fn encode(purchase_id: i64, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b":");
    hasher.update(purchase_id.to_le_bytes());
    let digest = hasher.finalize();

    // 24 symbols * 5 bits = 120 bits from the digest
    let mut body = String::with_capacity(BODY_LEN);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for byte in digest.iter() {
        acc = (acc << 8) | u32::from(*byte);
        bits += 8;
        while bits >= 5 && body.len() < BODY_LEN {
            bits -= 5;
            let idx = ((acc >> bits) & 0x1F) as usize;
            body.push(ALPHABET[idx] as char);
        }
        if body.len() == BODY_LEN {
            break;
        }
    }

    let mut code = String::with_capacity(CODE_PREFIX.len() + 1 + BODY_LEN + GROUPS - 1);
    code.push_str(CODE_PREFIX);
    for group in body.as_bytes().chunks(GROUP_LEN) {
        code.push('-');
        // chunks() over an ASCII-only body
        code.push_str(std::str::from_utf8(group).expect("alphabet is ASCII"));
    }
    code
}

/// Parse raw scanner/keyboard input into canonical form.
///
/// Tolerates lowercase, stray whitespace, and missing or misplaced hyphens;
/// rejects wrong prefix, wrong length, and characters outside the alphabet.
pub fn parse(raw: &str) -> Result<VerificationCode, CodeFormatError> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if compact.is_empty() {
        return Err(CodeFormatError::Empty);
    }

    let body = compact
        .strip_prefix(CODE_PREFIX)
        .ok_or(CodeFormatError::BadPrefix)?;

    if body.len() != BODY_LEN {
        return Err(CodeFormatError::BadLength(body.len()));
    }

    if let Some(bad) = body
        .chars()
        .find(|c| !c.is_ascii() || !ALPHABET.contains(&(*c as u8)))
    {
        return Err(CodeFormatError::BadCharacter(bad));
    }

    let mut canonical = String::with_capacity(CODE_PREFIX.len() + 1 + BODY_LEN + GROUPS - 1);
    canonical.push_str(CODE_PREFIX);
    for group in body.as_bytes().chunks(GROUP_LEN) {
        canonical.push('-');
        canonical.push_str(std::str::from_utf8(group).expect("alphabet is ASCII"));
    }

    Ok(VerificationCode(canonical))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn encode_is_deterministic() {
        assert_eq!(encode(12345, SECRET), encode(12345, SECRET));
    }

    #[test]
    fn encode_depends_on_secret_and_id() {
        assert_ne!(encode(12345, SECRET), encode(12346, SECRET));
        assert_ne!(encode(12345, SECRET), encode(12345, "other-secret"));
    }

    #[test]
    fn encode_produces_grouped_format() {
        let code = encode(987654321, SECRET);
        assert_eq!(code.len(), 2 + 3 * 9);
        let parts: Vec<&str> = code.split('-').collect();
        assert_eq!(parts[0], "GM");
        assert_eq!(parts.len(), 4);
        for group in &parts[1..] {
            assert_eq!(group.len(), 8);
        }
    }

    #[test]
    fn encode_never_emits_ambiguous_characters() {
        for id in [1, 77, 5000, i64::MAX] {
            let code = encode(id, SECRET);
            for c in ['0', 'O', '1', 'I'] {
                assert!(!code[3..].contains(c), "{code} contains {c}");
            }
        }
    }

    #[test]
    fn parse_round_trips_encoded_codes() {
        let code = encode(4242, SECRET);
        let parsed = parse(&code).unwrap();
        assert_eq!(parsed.as_str(), code);
    }

    #[test]
    fn parse_normalizes_case_hyphens_and_whitespace() {
        let code = encode(4242, SECRET);
        let sloppy = format!("  {} ", code.to_lowercase().replace('-', " "));
        assert_eq!(parse(&sloppy).unwrap().as_str(), code);
    }

    #[test]
    fn parse_rejects_garbage_before_lookup() {
        assert_eq!(parse(""), Err(CodeFormatError::Empty));
        assert_eq!(parse("   "), Err(CodeFormatError::Empty));
        assert_eq!(
            parse("XX-23456789-23456789-23456789"),
            Err(CodeFormatError::BadPrefix)
        );
        assert_eq!(
            parse("GM-2345678-2345678-2345678"),
            Err(CodeFormatError::BadLength(21))
        );
        // 'O' is excluded from the alphabet
        assert_eq!(
            parse("GM-O3456789-23456789-23456789"),
            Err(CodeFormatError::BadCharacter('O'))
        );
    }

    #[test]
    fn parse_rejects_truncated_and_extended_codes() {
        let code = encode(4242, SECRET);
        assert!(matches!(
            parse(&code[..code.len() - 1]),
            Err(CodeFormatError::BadLength(_))
        ));
        assert!(matches!(
            parse(&format!("{code}A")),
            Err(CodeFormatError::BadLength(_))
        ));
    }
}
