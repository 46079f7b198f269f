//! scrypt in the `$7$` format

use super::{Shim, ShimContext};
use crate::case::TestCase;
use crate::error::{KatError, KatResult};
use crate::hash64;
use crate::registry::{MethodId, Params};

/// Block size parameter.
const R: u32 = 8;
/// Parallelism parameter.
const P: u32 = 1;
/// `rounds` counts up from N = 2^8.
const LOG2_N_BASE: u32 = 7;
const OUTPUT_LEN: usize = 32;

/// `$7$` setting for the given cost and salt. The salt is used as-is, not
/// decoded.
pub fn scrypt_setting(log2_n: u32, r: u32, p: u32, salt: &[u8]) -> Vec<u8> {
    let mut setting = b"$7$".to_vec();
    setting.push(hash64::encode_int6(log2_n));
    setting.extend(hash64::encode_int30(r));
    setting.extend(hash64::encode_int30(p));
    setting.extend_from_slice(salt);
    setting
}

/// Full `$7$` hash of `phrase`.
pub fn scrypt_hash(phrase: &[u8], log2_n: u32, r: u32, p: u32, salt: &[u8]) -> KatResult<Vec<u8>> {
    let log_n = u8::try_from(log2_n)
        .map_err(|e| KatError::reference(MethodId::Scrypt, e))?;
    let params = scrypt::Params::new(log_n, r, p, OUTPUT_LEN)
        .map_err(|e| KatError::reference(MethodId::Scrypt, e))?;
    let mut output = [0u8; OUTPUT_LEN];
    scrypt::scrypt(phrase, salt, &params, &mut output)
        .map_err(|e| KatError::reference(MethodId::Scrypt, e))?;

    let mut hash = scrypt_setting(log2_n, r, p, salt);
    hash.push(b'$');
    hash.extend(hash64::encode_bytes(&output));
    Ok(hash)
}

/// scrypt with `r = 8`, `p = 1` and `N = 2^(rounds + 7)`.
pub struct Scrypt;

impl Shim for Scrypt {
    fn generate(
        &self,
        phrase: &[u8],
        params: &Params,
        _ctx: &mut ShimContext<'_>,
    ) -> KatResult<Vec<TestCase>> {
        let log2_n = params.rounds + LOG2_N_BASE;
        let salt = params.salt.as_bytes();
        let setting = scrypt_setting(log2_n, R, P, salt);
        let expected = scrypt_hash(phrase, log2_n, R, P, salt)?;
        Ok(vec![TestCase::new(phrase, setting, expected)])
    }
}
