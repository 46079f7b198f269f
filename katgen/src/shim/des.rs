//! DES-based methods: traditional, bigcrypt and BSDi extended

use super::{Shim, ShimContext};
use crate::case::TestCase;
use crate::error::{KatError, KatResult};
use crate::registry::{MethodId, Params};
use pwhash::{bsdi_crypt, unix_crypt, HashSetup};

/// Bytes of the phrase traditional DES looks at.
pub const DES_KEY_LEN: usize = 8;

/// Bytes of the phrase bigcrypt looks at.
pub const BIGCRYPT_MAX_PHRASE: usize = 128;

/// Characters of output per 8-byte bigcrypt segment, salt excluded.
const SEGMENT_OUTPUT_LEN: usize = 11;

fn des_crypt(method: MethodId, salt: &str, key: &[u8]) -> KatResult<String> {
    let key = &key[..key.len().min(DES_KEY_LEN)];
    #[allow(deprecated)]
    let hashed = unix_crypt::hash_with(salt, key);
    hashed.map_err(|e| KatError::reference(method, e))
}

/// Traditional DES crypt. The setting is the two salt characters.
pub struct Descrypt;

impl Shim for Descrypt {
    fn generate(
        &self,
        phrase: &[u8],
        params: &Params,
        _ctx: &mut ShimContext<'_>,
    ) -> KatResult<Vec<TestCase>> {
        let expected = des_crypt(MethodId::Descrypt, params.salt, phrase)?.into_bytes();
        let setting = expected[..2].to_vec();
        Ok(vec![TestCase::new(phrase, setting, expected)])
    }
}

/// Compute a bigcrypt hash.
///
/// The phrase is cut into 8-byte segments (at least one, even for the empty
/// phrase). The first is DES-crypted with `salt`, each later one with the
/// first two characters of the previous segment's output.
pub fn bigcrypt(salt: &str, phrase: &[u8]) -> KatResult<Vec<u8>> {
    let phrase = &phrase[..phrase.len().min(BIGCRYPT_MAX_PHRASE)];
    let segments: Vec<&[u8]> = if phrase.is_empty() {
        vec![phrase]
    } else {
        phrase.chunks(DES_KEY_LEN).collect()
    };

    let mut out = salt.as_bytes()[..2].to_vec();
    let mut segment_salt = salt[..2].to_string();
    for segment in segments {
        let hashed = des_crypt(MethodId::Bigcrypt, &segment_salt, segment)?;
        let block = &hashed[2..2 + SEGMENT_OUTPUT_LEN];
        out.extend_from_slice(block.as_bytes());
        segment_salt = block[..2].to_string();
    }
    Ok(out)
}

/// DES crypt extended to 128-byte phrases. Bigcrypt has no tag, so the
/// setting is padded past the traditional length to select it.
pub struct Bigcrypt;

impl Shim for Bigcrypt {
    fn generate(
        &self,
        phrase: &[u8],
        params: &Params,
        _ctx: &mut ShimContext<'_>,
    ) -> KatResult<Vec<TestCase>> {
        let expected = bigcrypt(params.salt, phrase)?;
        let mut setting = expected[..2].to_vec();
        setting.extend_from_slice(b"..............");
        Ok(vec![TestCase::new(phrase, setting, expected)])
    }
}

/// BSDi extended DES. The setting is `_`, four count characters and four
/// salt characters.
pub struct Bsdicrypt;

impl Shim for Bsdicrypt {
    fn generate(
        &self,
        phrase: &[u8],
        params: &Params,
        _ctx: &mut ShimContext<'_>,
    ) -> KatResult<Vec<TestCase>> {
        let setup = HashSetup {
            salt: Some(params.salt),
            rounds: Some(params.rounds),
        };
        #[allow(deprecated)]
        let hashed = bsdi_crypt::hash_with(setup, phrase);
        let expected = hashed
            .map_err(|e| KatError::reference(MethodId::Bsdicrypt, e))?
            .into_bytes();
        let setting = expected[..9].to_vec();
        Ok(vec![TestCase::new(phrase, setting, expected)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::CryptScratch;

    fn run(shim: &dyn Shim, phrase: &[u8], rounds: u32, salt: &'static str) -> Vec<TestCase> {
        let mut scratch = CryptScratch::new();
        let mut ctx = ShimContext::new(None, &mut scratch);
        shim.generate(phrase, &Params { rounds, salt }, &mut ctx)
            .unwrap()
    }

    #[test]
    fn test_descrypt_known_answer() {
        let cases = run(&Descrypt, b"U*U*U*U*", 0, "CC");
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].setting, b"CC");
        assert_eq!(cases[0].expected.as_deref(), Some(&b"CCNf8Sbh3HDfQ"[..]));
    }

    #[test]
    fn test_descrypt_ignores_ninth_byte() {
        let short = run(&Descrypt, b"U*U***U*", 0, "CC");
        let long = run(&Descrypt, b"U*U***U*ignored", 0, "CC");
        assert_eq!(short[0].expected, long[0].expected);
    }

    #[test]
    fn test_bigcrypt_segments() {
        let short = bigcrypt("CC", b"").unwrap();
        assert_eq!(short.len(), 2 + SEGMENT_OUTPUT_LEN);

        let two = bigcrypt("CC", b"123456789").unwrap();
        assert_eq!(two.len(), 2 + 2 * SEGMENT_OUTPUT_LEN);

        // The first segment is plain DES crypt of the first eight bytes
        let des = des_crypt(MethodId::Bigcrypt, "CC", b"12345678").unwrap();
        assert_eq!(&two[..13], des.as_bytes());
    }

    #[test]
    fn test_bigcrypt_truncates_to_128_bytes() {
        let long = [b'x'; 200];
        let out = bigcrypt("ab", &long).unwrap();
        assert_eq!(out.len(), 2 + 16 * SEGMENT_OUTPUT_LEN);
        assert_eq!(out, bigcrypt("ab", &long[..128]).unwrap());
    }

    #[test]
    fn test_bigcrypt_setting_is_padded() {
        let cases = run(&Bigcrypt, b"abc", 0, "ab");
        assert_eq!(cases[0].setting, b"ab..............");
    }

    #[test]
    fn test_bsdicrypt_known_answer() {
        // _J9.. encodes 725 rounds
        let cases = run(&Bsdicrypt, b"U*U*U*U*", 725, "CCCC");
        assert_eq!(cases[0].setting, b"_J9..CCCC");
        assert_eq!(
            cases[0].expected.as_deref(),
            Some(&b"_J9..CCCCXBrJUJV154M"[..])
        );
    }
}
