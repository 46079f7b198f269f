//! Method shims
//!
//! A shim turns one `(phrase, rounds, salt)` triple into zero or more test
//! cases. The expected output always comes from somewhere other than the
//! library under test when such a source exists: a reference crate, or a
//! hand-written construction where no crate implements the method. Only the
//! yescrypt family falls back to the library itself.

mod bcrypt;
mod des;
mod md5;
mod nt;
mod scrypt;
mod sha;
mod yescrypt;

pub use bcrypt::{Bcrypt, BcryptQuirk};
pub use des::{Bigcrypt, Bsdicrypt, Descrypt};
pub use md5::{sunmd5_checksum, Md5crypt, Sunmd5};
pub use nt::Nt;
pub use scrypt::Scrypt;
pub use sha::{sm3crypt, ShaCrypt, Sm3crypt};
pub use yescrypt::{yescrypt_setting, Yescrypt};

use crate::case::TestCase;
use crate::error::KatResult;
use crate::library::{CryptScratch, LibCrypt};
use crate::registry::{MethodId, Params};

/// Computes the known answers of one method.
pub trait Shim: Send + Sync {
    fn generate(
        &self,
        phrase: &[u8],
        params: &Params,
        ctx: &mut ShimContext<'_>,
    ) -> KatResult<Vec<TestCase>>;
}

/// Per-worker state handed to every shim call.
///
/// Without a library the run is settings-only: shims that depend on the
/// library emit cases with no expected output.
pub struct ShimContext<'a> {
    library: Option<&'a LibCrypt>,
    scratch: &'a mut CryptScratch,
}

impl<'a> ShimContext<'a> {
    pub fn new(library: Option<&'a LibCrypt>, scratch: &'a mut CryptScratch) -> Self {
        Self { library, scratch }
    }

    pub fn settings_only(&self) -> bool {
        self.library.is_none()
    }

    /// Hash with the library under test, or `None` in settings-only mode.
    pub fn crypt(&mut self, phrase: &[u8], setting: &[u8]) -> KatResult<Option<Vec<u8>>> {
        match self.library {
            Some(library) => library.crypt(self.scratch, phrase, setting).map(Some),
            None => Ok(None),
        }
    }
}

/// Build the shim for `id`.
pub fn for_method(id: MethodId) -> Box<dyn Shim> {
    match id {
        MethodId::Bcrypt => Box::new(Bcrypt::new(MethodId::Bcrypt)),
        MethodId::BcryptY => Box::new(Bcrypt::new(MethodId::BcryptY)),
        MethodId::BcryptA => Box::new(BcryptQuirk::two_a()),
        MethodId::BcryptX => Box::new(BcryptQuirk::two_x()),
        MethodId::Bigcrypt => Box::new(Bigcrypt),
        MethodId::Bsdicrypt => Box::new(Bsdicrypt),
        MethodId::Descrypt => Box::new(Descrypt),
        MethodId::GostYescrypt => Box::new(Yescrypt::new(MethodId::GostYescrypt, "gy")),
        MethodId::Md5crypt => Box::new(Md5crypt),
        MethodId::Nt => Box::new(Nt),
        MethodId::Scrypt => Box::new(Scrypt),
        MethodId::Sha1crypt => Box::new(ShaCrypt::new(MethodId::Sha1crypt)),
        MethodId::Sha256crypt => Box::new(ShaCrypt::new(MethodId::Sha256crypt)),
        MethodId::Sha512crypt => Box::new(ShaCrypt::new(MethodId::Sha512crypt)),
        MethodId::Sm3crypt => Box::new(Sm3crypt),
        MethodId::Sm3Yescrypt => Box::new(Yescrypt::new(MethodId::Sm3Yescrypt, "sm3y")),
        MethodId::Sunmd5 => Box::new(Sunmd5),
        MethodId::Yescrypt => Box::new(Yescrypt::new(MethodId::Yescrypt, "y")),
    }
}

/// The setting embedded in a `$`-delimited hash: everything before the
/// last `$`.
pub(crate) fn setting_of(hash: &[u8]) -> &[u8] {
    match hash.iter().rposition(|&b| b == b'$') {
        Some(end) => &hash[..end],
        None => hash,
    }
}
