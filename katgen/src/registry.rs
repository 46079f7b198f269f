//! Method registry
//!
//! Maps every method identifier to its parameter domain and to the shim that
//! computes its known answers. The table is built once at startup and shared
//! read-only by all workers.

use crate::case::TestCase;
use crate::error::{KatError, KatResult};
use crate::shim::{self, Shim, ShimContext};
use std::fmt;
use std::str::FromStr;

/// Identifier of a hashing method, as used in the consumer's `INCLUDE_<id>`
/// and `TEST_<id>` macros.
///
/// Variants are listed in registry-declared order; [`MethodId::position`]
/// relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MethodId {
    Bcrypt,
    BcryptY,
    BcryptA,
    BcryptX,
    Bigcrypt,
    Bsdicrypt,
    Descrypt,
    GostYescrypt,
    Md5crypt,
    Nt,
    Scrypt,
    Sha1crypt,
    Sha256crypt,
    Sha512crypt,
    Sm3crypt,
    Sm3Yescrypt,
    Sunmd5,
    Yescrypt,
}

impl MethodId {
    /// Every method in declared order.
    pub const ALL: [MethodId; 18] = [
        MethodId::Bcrypt,
        MethodId::BcryptY,
        MethodId::BcryptA,
        MethodId::BcryptX,
        MethodId::Bigcrypt,
        MethodId::Bsdicrypt,
        MethodId::Descrypt,
        MethodId::GostYescrypt,
        MethodId::Md5crypt,
        MethodId::Nt,
        MethodId::Scrypt,
        MethodId::Sha1crypt,
        MethodId::Sha256crypt,
        MethodId::Sha512crypt,
        MethodId::Sm3crypt,
        MethodId::Sm3Yescrypt,
        MethodId::Sunmd5,
        MethodId::Yescrypt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MethodId::Bcrypt => "bcrypt",
            MethodId::BcryptY => "bcrypt_y",
            MethodId::BcryptA => "bcrypt_a",
            MethodId::BcryptX => "bcrypt_x",
            MethodId::Bigcrypt => "bigcrypt",
            MethodId::Bsdicrypt => "bsdicrypt",
            MethodId::Descrypt => "descrypt",
            MethodId::GostYescrypt => "gost_yescrypt",
            MethodId::Md5crypt => "md5crypt",
            MethodId::Nt => "nt",
            MethodId::Scrypt => "scrypt",
            MethodId::Sha1crypt => "sha1crypt",
            MethodId::Sha256crypt => "sha256crypt",
            MethodId::Sha512crypt => "sha512crypt",
            MethodId::Sm3crypt => "sm3crypt",
            MethodId::Sm3Yescrypt => "sm3_yescrypt",
            MethodId::Sunmd5 => "sunmd5",
            MethodId::Yescrypt => "yescrypt",
        }
    }

    /// Index in declared order.
    pub fn position(self) -> usize {
        self as usize
    }

    /// Whether expected outputs come from the library under test rather
    /// than an independent implementation.
    pub fn needs_library(self) -> bool {
        matches!(
            self,
            MethodId::GostYescrypt | MethodId::Sm3Yescrypt | MethodId::Yescrypt
        )
    }

    /// The `(rounds, salt)` tuples every phrase is hashed with.
    pub fn params(self) -> &'static [Params] {
        match self {
            MethodId::Bcrypt | MethodId::BcryptY | MethodId::BcryptA | MethodId::BcryptX => {
                BCRYPT_PARAMS
            }
            MethodId::Bigcrypt | MethodId::Descrypt => DES_PARAMS,
            MethodId::Bsdicrypt => BSDI_PARAMS,
            MethodId::GostYescrypt | MethodId::Sm3Yescrypt | MethodId::Yescrypt => {
                YESCRYPT_PARAMS
            }
            MethodId::Md5crypt => MD5_PARAMS,
            MethodId::Nt => NT_PARAMS,
            MethodId::Scrypt => SCRYPT_PARAMS,
            MethodId::Sha1crypt => SHA1_PARAMS,
            MethodId::Sha256crypt | MethodId::Sha512crypt | MethodId::Sm3crypt => SHA2_PARAMS,
            MethodId::Sunmd5 => SUNMD5_PARAMS,
        }
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MethodId {
    type Err = KatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MethodId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| KatError::UnknownMethod(s.to_string()))
    }
}

/// One point of a method's parameter domain.
///
/// `rounds` is method specific: a log2 cost for bcrypt, an iteration count
/// for the SHA and BSDi families, an extra-rounds count for sunmd5, a
/// log2 N offset for scrypt and a parameter preset for the yescrypt family.
/// Methods without a cost use 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub rounds: u32,
    pub salt: &'static str,
}

const fn p(rounds: u32, salt: &'static str) -> Params {
    Params { rounds, salt }
}

const BCRYPT_PARAMS: &[Params] = &[
    p(5, "CCCCCCCCCCCCCCCCCCCCC."),
    p(5, "abcdefghijklmnopqrstuu"),
    p(4, "CCCCCCCCCCCCCCCCCCCCC."),
    p(4, "abcdefghijklmnopqrstuu"),
];

const DES_PARAMS: &[Params] = &[p(0, "CC"), p(0, "ab")];

// Round counts must be odd.
const BSDI_PARAMS: &[Params] = &[p(1, "CCCC"), p(1, "abcd"), p(13, "CCCC"), p(13, "abcd")];

const YESCRYPT_PARAMS: &[Params] = &[
    p(1, "......."),
    p(1, "LdJMENpBABJJ3hIHjB1Bi."),
    p(2, "......."),
    p(2, "LdJMENpBABJJ3hIHjB1Bi."),
];

const MD5_PARAMS: &[Params] = &[p(0, "CCCCCCCC"), p(0, "abcdefgh")];

const NT_PARAMS: &[Params] = &[p(0, "")];

const SCRYPT_PARAMS: &[Params] = &[
    p(1, "SodiumChloride"),
    p(1, "unUNunUNunUNun"),
    p(2, "SodiumChloride"),
    p(2, "unUNunUNunUNun"),
];

const SHA1_PARAMS: &[Params] = &[
    p(12, "GGXpNqoJvglVTkGU"),
    p(12, "xSZGpk6Bp4SA3.cR"),
    p(456, "GGXpNqoJvglVTkGU"),
    p(456, "xSZGpk6Bp4SA3.cR"),
];

const SHA2_PARAMS: &[Params] = &[
    p(1000, "saltstring"),
    p(1000, "short"),
    p(5000, "saltstring"),
    p(5000, "short"),
];

const SUNMD5_PARAMS: &[Params] = &[
    p(0, "9ZLwtuTO"),
    p(0, "1xMeE.at"),
    p(12, "9ZLwtuTO"),
    p(12, "1xMeE.at"),
];

/// A registered method: identifier, parameter domain and shim.
pub struct Method {
    pub id: MethodId,
    pub params: &'static [Params],
    shim: Box<dyn Shim>,
}

impl Method {
    fn new(id: MethodId) -> Self {
        Self {
            id,
            params: id.params(),
            shim: shim::for_method(id),
        }
    }

    /// Run this method's shim for one phrase and one parameter tuple.
    pub fn generate(
        &self,
        phrase: &[u8],
        params: &Params,
        ctx: &mut ShimContext<'_>,
    ) -> KatResult<Vec<TestCase>> {
        self.shim.generate(phrase, params, ctx)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("id", &self.id)
            .field("params", &self.params)
            .finish()
    }
}

/// The selected methods, in declared order.
#[derive(Debug)]
pub struct Registry {
    methods: Vec<Method>,
}

impl Registry {
    /// Registry with every method.
    pub fn new() -> Self {
        Self::with_methods(&MethodId::ALL)
    }

    /// Registry restricted to `selection`. Declared order is kept whatever
    /// order the selection is given in, and repeats are ignored.
    pub fn with_methods(selection: &[MethodId]) -> Self {
        let methods = MethodId::ALL
            .iter()
            .copied()
            .filter(|id| selection.contains(id))
            .map(Method::new)
            .collect();
        Self { methods }
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn get(&self, id: MethodId) -> Option<&Method> {
        self.methods.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Whether any selected method needs the library under test.
    pub fn needs_library(&self) -> bool {
        self.methods.iter().any(|m| m.id.needs_library())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_order_is_discriminant_order() {
        for (i, id) in MethodId::ALL.iter().enumerate() {
            assert_eq!(id.position(), i);
        }
    }

    #[test]
    fn test_names_round_trip() {
        for id in MethodId::ALL {
            assert_eq!(id.as_str().parse::<MethodId>().unwrap(), id);
        }
        assert!(matches!(
            "md4crypt".parse::<MethodId>(),
            Err(KatError::UnknownMethod(_))
        ));
    }

    #[test]
    fn test_selection_keeps_declared_order() {
        let registry =
            Registry::with_methods(&[MethodId::Yescrypt, MethodId::Bcrypt, MethodId::Yescrypt]);
        let ids: Vec<MethodId> = registry.methods().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![MethodId::Bcrypt, MethodId::Yescrypt]);
    }

    #[test]
    fn test_library_only_for_yescrypt_family() {
        let needing: Vec<MethodId> = MethodId::ALL
            .iter()
            .copied()
            .filter(|id| id.needs_library())
            .collect();
        assert_eq!(
            needing,
            vec![MethodId::GostYescrypt, MethodId::Sm3Yescrypt, MethodId::Yescrypt]
        );
        assert!(!Registry::with_methods(&[MethodId::Nt, MethodId::Scrypt]).needs_library());
    }

    #[test]
    fn test_every_method_has_parameters() {
        for id in MethodId::ALL {
            assert!(!id.params().is_empty(), "{} has no parameters", id);
        }
        assert!(BSDI_PARAMS.iter().all(|p| p.rounds % 2 == 1));
    }
}
