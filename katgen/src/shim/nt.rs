//! Windows NT hash, `$3$`

use super::{Shim, ShimContext};
use crate::case::TestCase;
use crate::error::KatResult;
use crate::registry::Params;
use md4::{Digest, Md4};

/// A setting with text after the tag, which the method ignores.
pub const DECORATED_SETTING: &[u8] = b"$3$__not_used__0123456789abcdef";

/// `$3$$` followed by the lowercase hex MD4 of the phrase widened to
/// UTF-16LE. Widening is byte by byte, i.e. the phrase is read as
/// ISO-8859-1 whatever its actual encoding.
pub fn nthash(phrase: &[u8]) -> Vec<u8> {
    let widened: Vec<u8> = phrase.iter().flat_map(|&b| [b, 0]).collect();
    let digest = Md4::digest(&widened);
    format!("$3$${}", hex::encode(digest)).into_bytes()
}

/// NT hash. Has no salt; both the bare tag and a tag followed by junk must
/// hash the same.
pub struct Nt;

impl Shim for Nt {
    fn generate(
        &self,
        phrase: &[u8],
        _params: &Params,
        _ctx: &mut ShimContext<'_>,
    ) -> KatResult<Vec<TestCase>> {
        let expected = nthash(phrase);
        Ok(vec![
            TestCase::new(phrase, b"$3$".to_vec(), expected.clone()),
            TestCase::new(phrase, DECORATED_SETTING.to_vec(), expected),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_answers() {
        assert_eq!(nthash(b""), b"$3$$31d6cfe0d16ae931b73c59d7e0c089c0");
        assert_eq!(nthash(b"abc"), b"$3$$e0fba38268d0ec66ef1cb452d5885e53");
        assert_eq!(
            nthash(b"|_337T`/p3"),
            b"$3$$ca8ad8058c3226764a3af34a8edcbb2e"
        );
    }

    #[test]
    fn test_high_bytes_widen_as_latin1() {
        // U+00E9 in UTF-16LE is E9 00, the same as the single byte E9
        let widened = Md4::digest([0xe9u8, 0x00]);
        assert_eq!(nthash(&[0xe9]), format!("$3$${}", hex::encode(widened)).into_bytes());
    }
}
