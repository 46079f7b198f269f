//! yescrypt, gost-yescrypt and sm3-yescrypt
//!
//! No implementation independent of the library under test exists, so the
//! expected output is whatever the library returns for a hand-built
//! setting. These cases check round-tripping and guard against the
//! library's behaviour drifting, not interoperability.

use super::{Shim, ShimContext};
use crate::case::TestCase;
use crate::error::{KatError, KatResult};
use crate::registry::{MethodId, Params};

/// Encoded yescrypt parameters for a rounds value.
fn encoded_params(method: MethodId, rounds: u32) -> KatResult<&'static str> {
    match rounds {
        1 => Ok("j75"),
        2 => Ok("j85"),
        _ => Err(KatError::UnsupportedRounds { method, rounds }),
    }
}

/// `$<ident>$<params>$<salt>`.
pub fn yescrypt_setting(method: MethodId, ident: &str, rounds: u32, salt: &str) -> KatResult<Vec<u8>> {
    let params = encoded_params(method, rounds)?;
    Ok(format!("${}${}${}", ident, params, salt).into_bytes())
}

/// One member of the yescrypt family, identified by its setting tag.
pub struct Yescrypt {
    method: MethodId,
    ident: &'static str,
}

impl Yescrypt {
    pub fn new(method: MethodId, ident: &'static str) -> Self {
        Self { method, ident }
    }
}

impl Shim for Yescrypt {
    fn generate(
        &self,
        phrase: &[u8],
        params: &Params,
        ctx: &mut ShimContext<'_>,
    ) -> KatResult<Vec<TestCase>> {
        let setting = yescrypt_setting(self.method, self.ident, params.rounds, params.salt)?;
        let case = match ctx.crypt(phrase, &setting)? {
            Some(expected) => TestCase::new(phrase, setting, expected),
            None => TestCase::settings_only(phrase, setting),
        };
        Ok(vec![case])
    }
}
