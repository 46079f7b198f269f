//! SHA-crypt family: NetBSD sha1crypt, Drepper's SHA-256/SHA-512 crypt and
//! the same Drepper construction over SM3

use super::{setting_of, Shim, ShimContext};
use crate::case::TestCase;
use crate::error::{KatError, KatResult};
use crate::hash64;
use crate::registry::{MethodId, Params};
use digest::Digest;
use pwhash::{sha1_crypt, sha256_crypt, sha512_crypt, HashSetup};

/// Round count a Drepper-style setting leaves implicit.
pub const ROUNDS_DEFAULT: u32 = 5000;

/// Longest salt a Drepper-style method uses.
pub const SALT_LEN_MAX: usize = 16;

/// Shim over the pwhash implementations.
pub struct ShaCrypt {
    method: MethodId,
}

impl ShaCrypt {
    pub fn new(method: MethodId) -> Self {
        Self { method }
    }

    fn hash(&self, phrase: &[u8], params: &Params) -> KatResult<String> {
        let rounds = match self.method {
            MethodId::Sha1crypt => Some(params.rounds),
            _ if params.rounds == ROUNDS_DEFAULT => None,
            _ => Some(params.rounds),
        };
        let setup = HashSetup {
            salt: Some(params.salt),
            rounds,
        };
        #[allow(deprecated)]
        let hashed = match self.method {
            MethodId::Sha1crypt => sha1_crypt::hash_with(setup, phrase),
            MethodId::Sha256crypt => sha256_crypt::hash_with(setup, phrase),
            _ => sha512_crypt::hash_with(setup, phrase),
        };
        hashed.map_err(|e| KatError::reference(self.method, e))
    }
}

impl Shim for ShaCrypt {
    fn generate(
        &self,
        phrase: &[u8],
        params: &Params,
        _ctx: &mut ShimContext<'_>,
    ) -> KatResult<Vec<TestCase>> {
        let expected = self.hash(phrase, params)?.into_bytes();
        let setting = setting_of(&expected).to_vec();
        Ok(vec![TestCase::new(phrase, setting, expected)])
    }
}

/// `block` repeated to exactly `len` bytes.
fn recycled(block: &[u8], len: usize) -> Vec<u8> {
    block.iter().copied().cycle().take(len).collect()
}

/// Raw result of Drepper's construction over digest `D`.
pub fn drepper_digest<D: Digest>(phrase: &[u8], salt: &[u8], rounds: u32) -> Vec<u8> {
    let size = <D as Digest>::output_size();

    let mut alternate = D::new();
    alternate.update(phrase);
    alternate.update(salt);
    alternate.update(phrase);
    let alternate = alternate.finalize();

    let mut ctx = D::new();
    ctx.update(phrase);
    ctx.update(salt);
    let mut cnt = phrase.len();
    while cnt > size {
        ctx.update(&alternate);
        cnt -= size;
    }
    ctx.update(&alternate[..cnt]);
    let mut cnt = phrase.len();
    while cnt > 0 {
        if cnt & 1 != 0 {
            ctx.update(&alternate);
        } else {
            ctx.update(phrase);
        }
        cnt >>= 1;
    }
    let mut result = ctx.finalize().to_vec();

    let mut dp = D::new();
    for _ in 0..phrase.len() {
        dp.update(phrase);
    }
    let p_bytes = recycled(&dp.finalize(), phrase.len());

    let mut ds = D::new();
    for _ in 0..16 + usize::from(result[0]) {
        ds.update(salt);
    }
    let s_bytes = recycled(&ds.finalize(), salt.len());

    for round in 0..rounds {
        let mut ctx = D::new();
        if round & 1 != 0 {
            ctx.update(&p_bytes);
        } else {
            ctx.update(&result);
        }
        if round % 3 != 0 {
            ctx.update(&s_bytes);
        }
        if round % 7 != 0 {
            ctx.update(&p_bytes);
        }
        if round & 1 != 0 {
            ctx.update(&result);
        } else {
            ctx.update(&p_bytes);
        }
        result = ctx.finalize().to_vec();
    }
    result
}

/// Byte triples `(B2, B1, B0)` of a 32-byte Drepper result, most
/// significant first. Bytes 30 and 31 follow as a final short group.
const GROUPS_32: [(usize, usize, usize); 10] = [
    (0, 10, 20),
    (21, 1, 11),
    (12, 22, 2),
    (3, 13, 23),
    (24, 4, 14),
    (15, 25, 5),
    (6, 16, 26),
    (27, 7, 17),
    (18, 28, 8),
    (9, 19, 29),
];

/// SM3 crypt, `$sm3$`.
pub fn sm3crypt(phrase: &[u8], salt: &str, rounds: u32) -> Vec<u8> {
    let salt = &salt.as_bytes()[..salt.len().min(SALT_LEN_MAX)];
    let result = drepper_digest::<sm3::Sm3>(phrase, salt, rounds);

    let mut out = b"$sm3$".to_vec();
    if rounds != ROUNDS_DEFAULT {
        out.extend_from_slice(format!("rounds={}$", rounds).as_bytes());
    }
    out.extend_from_slice(salt);
    out.push(b'$');
    encode_result_32(&mut out, &result);
    out
}

/// Permute and encode a 32-byte result the way SHA-256 crypt does.
fn encode_result_32(out: &mut Vec<u8>, result: &[u8]) {
    for &(b2, b1, b0) in GROUPS_32.iter() {
        hash64::encode_group(out, result[b0], result[b1], result[b2], 4);
    }
    hash64::encode_group(out, result[30], result[31], 0, 3);
}

/// SM3 crypt shim.
pub struct Sm3crypt;

impl Shim for Sm3crypt {
    fn generate(
        &self,
        phrase: &[u8],
        params: &Params,
        _ctx: &mut ShimContext<'_>,
    ) -> KatResult<Vec<TestCase>> {
        let expected = sm3crypt(phrase, params.salt, params.rounds);
        let setting = setting_of(&expected).to_vec();
        Ok(vec![TestCase::new(phrase, setting, expected)])
    }
}
