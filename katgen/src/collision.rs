//! Collision oracle
//!
//! For a fixed setting no two phrases should hash to the same output, and
//! for a fixed phrase no two settings should. Every exception is due to a
//! documented limitation or bug of some method, and [`explain_collision`]
//! names which one. A collision it cannot explain means a test case is
//! wrong or a shim is broken.

use crate::case::{HashValue, Setting};
use std::fmt;

/// Bytes of the phrase traditional DES reads.
pub const DES_PHRASE_LIMIT: usize = 8;
/// Bytes of the phrase bigcrypt reads.
pub const BIGCRYPT_PHRASE_LIMIT: usize = 128;
/// Bytes of the phrase bcrypt reads.
pub const BCRYPT_PHRASE_LIMIT: usize = 72;
/// 32-bit words in an expanded Blowfish key.
pub const BF_KEY_WORDS: usize = 18;

/// A known reason for two cases to share an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quirk {
    /// A bigcrypt setting and a descrypt setting with the same salt, and a
    /// phrase short enough that bigcrypt hashes a single segment.
    BigcryptSingleSegment,
    /// NT hashes ignore everything in the setting after the tag.
    NtIgnoresSalt,
    /// Sun MD5 settings differing only by the parser's tolerated suffix.
    SunMd5EquivalentSettings,
    /// bcrypt reads only the first 72 bytes.
    BcryptTruncation,
    /// bcrypt `$2x$` sign-extends high-bit bytes into their neighbours.
    BcryptSignExtension,
    /// DES ignores the 8th bit of each byte and everything past byte 8.
    DesTruncation,
    /// bigcrypt ignores the 8th bit of each byte and everything past byte 128.
    BigcryptTruncation,
    /// BSDi DES ignores the 8th bit of each byte.
    BsdiHighBit,
}

impl Quirk {
    pub fn description(self) -> &'static str {
        match self {
            Quirk::BigcryptSingleSegment => "single-segment bigcrypt equals descrypt",
            Quirk::NtIgnoresSalt => "NT hash ignores its salt",
            Quirk::SunMd5EquivalentSettings => "equivalent Sun MD5 settings",
            Quirk::BcryptTruncation => "bcrypt truncates phrases to 72 bytes",
            Quirk::BcryptSignExtension => "bcrypt $2x$ sign-extension bug",
            Quirk::DesTruncation => "DES truncates phrases to 8 seven-bit bytes",
            Quirk::BigcryptTruncation => "bigcrypt truncates phrases to 128 seven-bit bytes",
            Quirk::BsdiHighBit => "BSDi DES ignores the 8th bit",
        }
    }
}

impl fmt::Display for Quirk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Whether `p1` and `p2` are equal once the 8th bit of every byte is
/// cleared, looking at no more than `limit` bytes.
///
/// Two strings that differ in length within the limit are unequal; two
/// that agree on the first `limit` bytes are equal whatever follows.
pub fn strneq_7bit(p1: &[u8], p2: &[u8], limit: usize) -> bool {
    for i in 0..limit {
        match (p1.get(i), p2.get(i)) {
            (None, None) => return true,
            (Some(a), Some(b)) if a & 0x7f == b & 0x7f => continue,
            _ => return false,
        }
    }
    true
}

/// Expand `phrase` into 18 key words the way bcrypt `$2x$` does, i.e. with
/// each byte sign-extended before it is or-ed into its word.
///
/// Reading proceeds cyclically over the phrase and its terminating NUL. An
/// empty phrase expands to all zeros.
pub fn buggy_expand_bf_key(phrase: &[u8]) -> [u32; BF_KEY_WORDS] {
    let mut words = [0u32; BF_KEY_WORDS];
    if phrase.is_empty() {
        return words;
    }

    let mut p = 0usize;
    for word in words.iter_mut() {
        let mut tmp = 0u32;
        for _ in 0..4 {
            let c = phrase.get(p).copied().unwrap_or(0);
            let sign_extended = (i32::from(c & 0x7f) - i32::from(c & 0x80)) as u32;
            tmp = (tmp << 8) | sign_extended;
            p += 1;
            if p == phrase.len() + 1 {
                p = 0;
            }
        }
        *word = tmp;
    }
    words
}

/// Whether two phrases collide under the `$2x$` sign-extension bug.
pub fn sign_extension_collision(p1: &[u8], p2: &[u8]) -> bool {
    buggy_expand_bf_key(p1) == buggy_expand_bf_key(p2)
}

/// Whether two Sun MD5 settings hash identically.
///
/// The shorter must be a prefix of the longer. If it ends in `$` the longer
/// adds exactly one more `$`; otherwise the longer adds exactly `$x`.
pub fn equivalent_sunmd5_settings(s1: &[u8], s2: &[u8]) -> bool {
    if !s1.starts_with(b"$md5") || !s2.starts_with(b"$md5") {
        return false;
    }
    let (short, long) = if s1.len() < s2.len() { (s1, s2) } else { (s2, s1) };
    if !long.starts_with(short) {
        return false;
    }
    let rest = &long[short.len()..];
    if short.last() == Some(&b'$') {
        rest == b"$"
    } else {
        rest == b"$x"
    }
}

fn is_tagged(setting: &[u8]) -> bool {
    matches!(setting.first(), Some(b'$') | Some(b'_'))
}

/// Explain why two cases with different inputs may share an output, or
/// `None` if nothing does.
pub fn explain_collision(p1: &[u8], s1: &[u8], p2: &[u8], s2: &[u8]) -> Option<Quirk> {
    if s1 != s2 {
        let des_vs_bigcrypt = !is_tagged(s1)
            && !is_tagged(s2)
            && ((s1.len() == 2 && s2.len() > 2 && p2.len() <= DES_PHRASE_LIMIT)
                || (s2.len() == 2 && s1.len() > 2 && p1.len() <= DES_PHRASE_LIMIT));
        if des_vs_bigcrypt {
            return strneq_7bit(p1, p2, DES_PHRASE_LIMIT).then_some(Quirk::BigcryptSingleSegment);
        }
        if s1.starts_with(b"$3$") && s2.starts_with(b"$3$") {
            return (p1 == p2).then_some(Quirk::NtIgnoresSalt);
        }
        if equivalent_sunmd5_settings(s1, s2) {
            return (p1 == p2).then_some(Quirk::SunMd5EquivalentSettings);
        }
        return None;
    }

    let setting = s1;
    if setting.starts_with(b"$2") {
        let limit = BCRYPT_PHRASE_LIMIT;
        if p1[..p1.len().min(limit)] == p2[..p2.len().min(limit)] {
            return Some(Quirk::BcryptTruncation);
        }
        if setting.starts_with(b"$2x") && sign_extension_collision(p1, p2) {
            return Some(Quirk::BcryptSignExtension);
        }
        return None;
    }
    if !is_tagged(setting) {
        return if setting.len() == 2 {
            strneq_7bit(p1, p2, DES_PHRASE_LIMIT).then_some(Quirk::DesTruncation)
        } else {
            strneq_7bit(p1, p2, BIGCRYPT_PHRASE_LIMIT).then_some(Quirk::BigcryptTruncation)
        };
    }
    if setting.first() == Some(&b'_') {
        let limit = p1.len().max(p2.len());
        return strneq_7bit(p1, p2, limit).then_some(Quirk::BsdiHighBit);
    }
    None
}

/// Whether a collision between `(p1, s1)` and `(p2, s2)` is explained by a
/// known quirk.
pub fn collision_expected(p1: &[u8], s1: &[u8], p2: &[u8], s2: &[u8]) -> bool {
    explain_collision(p1, s1, p2, s2).is_some()
}

/// Quote a byte string for diagnostics: printable ASCII as-is, everything
/// else as an escape.
pub fn quote_bytes(bytes: &[u8]) -> String {
    format!("b'{}'", bytes.escape_ascii())
}

/// A collision no quirk explains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedCollision {
    pub hash: HashValue,
    /// Phrase and setting that first produced `hash`
    pub first: (Vec<u8>, Setting),
    /// Phrase and setting that produced it again
    pub second: (Vec<u8>, Setting),
}

impl fmt::Display for UnexpectedCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "UNEXPECTED HASH COLLISION:")?;
        writeln!(f, "  hash = {}", String::from_utf8_lossy(&self.hash))?;
        writeln!(f, "    p1 = {}", quote_bytes(&self.first.0))?;
        writeln!(f, "    p2 = {}", quote_bytes(&self.second.0))?;
        writeln!(f, "    s1 = {}", String::from_utf8_lossy(&self.first.1))?;
        write!(f, "    s2 = {}", String::from_utf8_lossy(&self.second.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strneq_7bit_masks_high_bit() {
        assert!(strneq_7bit(b"U*U***U*", b"\xd5\xaa\xd5\xaa\xaa\xaa\xd5\xaa", 8));
        assert!(!strneq_7bit(b"U*U***U", b"U*U***U*", 8));
        assert!(strneq_7bit(b"U*U*U*U*", b"U*U*U*U*ignored", 8));
        assert!(strneq_7bit(b"", b"", 0));
        assert!(strneq_7bit(b"abc", b"xyz", 0));
    }

    #[test]
    fn test_buggy_expansion_empty() {
        assert_eq!(buggy_expand_bf_key(b""), [0u32; BF_KEY_WORDS]);
    }

    #[test]
    fn test_buggy_expansion_cycles_through_nul() {
        let words = buggy_expand_bf_key(b"abc");
        // a b c NUL a b c NUL ...
        assert_eq!(words[0], 0x6162_6300);
        assert_eq!(words[1], 0x6162_6300);
    }

    #[test]
    fn test_buggy_expansion_sign_extends() {
        let words = buggy_expand_bf_key(b"\xa3");
        // 0xa3 sign-extends to 0xffffffa3 and wipes the bytes before it
        assert_eq!(words[0], 0xffff_a300);
        assert!(words.iter().all(|&w| w == 0xffff_a300));
    }

    #[test]
    fn test_known_sign_extension_pair() {
        assert!(sign_extension_collision(b"\xa3", b"\xff\xff\xa3"));
        assert!(!sign_extension_collision(b"\xa3", b"\xa3a"));
    }

    #[test]
    fn test_sunmd5_equivalence() {
        assert!(equivalent_sunmd5_settings(b"$md5$salt", b"$md5$salt$x"));
        assert!(equivalent_sunmd5_settings(b"$md5$salt$", b"$md5$salt$$"));
        assert!(!equivalent_sunmd5_settings(b"$md5$salt", b"$md5$salt$"));
        assert!(!equivalent_sunmd5_settings(b"$md5$salt$", b"$md5$salt$x"));
        assert!(!equivalent_sunmd5_settings(b"$md5$salt", b"$md5$salt$$"));
        assert!(!equivalent_sunmd5_settings(b"$1$salt", b"$1$salt$x"));
    }

    #[test]
    fn test_explanations() {
        assert_eq!(
            explain_collision(b"U*U*U*U*", b"CC", b"U*U*U*U*ignored", b"CC"),
            Some(Quirk::DesTruncation)
        );
        assert_eq!(
            explain_collision(b"abc", b"$3$", b"abc", b"$3$__not_used__0123456789abcdef"),
            Some(Quirk::NtIgnoresSalt)
        );
        assert_eq!(explain_collision(b"abc", b"$1$a", b"abd", b"$1$a"), None);
    }

    #[test]
    fn test_diagnostic_format() {
        let collision = UnexpectedCollision {
            hash: b"$1$x$y".to_vec(),
            first: (b"a".to_vec(), b"$1$x".to_vec()),
            second: (b"\xff".to_vec(), b"$1$x".to_vec()),
        };
        assert_eq!(
            collision.to_string(),
            "UNEXPECTED HASH COLLISION:\n  hash = $1$x$y\n    p1 = b'a'\n    \
             p2 = b'\\xff'\n    s1 = $1$x\n    s2 = $1$x"
        );
    }
}
