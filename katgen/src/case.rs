//! Test case data model

use crate::registry::MethodId;

/// Self-describing configuration string: method tag, cost, salt.
///
/// Kept as bytes. Every setting the shims build is ASCII, but the scrypt
/// shim assembles its setting from raw encoded bytes and the oracle never
/// needs to treat it as text.
pub type Setting = Vec<u8>;

/// Full hash output, the corpus-wide uniqueness key.
pub type HashValue = Vec<u8>;

/// One known-answer test: a phrase, the setting to hash it with, and the
/// output an independent implementation produced for that pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestCase {
    pub phrase: Vec<u8>,
    pub setting: Setting,
    /// `None` when no independent answer is available and the case only
    /// checks that the setting round-trips.
    pub expected: Option<HashValue>,
}

impl TestCase {
    pub fn new(phrase: &[u8], setting: impl Into<Setting>, expected: impl Into<HashValue>) -> Self {
        Self {
            phrase: phrase.to_vec(),
            setting: setting.into(),
            expected: Some(expected.into()),
        }
    }

    /// A case with no expected output.
    pub fn settings_only(phrase: &[u8], setting: impl Into<Setting>) -> Self {
        Self {
            phrase: phrase.to_vec(),
            setting: setting.into(),
            expected: None,
        }
    }
}

/// A generated case together with where it came from.
///
/// `(method, task, index)` is the registry-declared order: tasks are numbered
/// method-major, then phrase, then parameter tuple, and `index` counts the
/// cases a single shim call produced. Sorting on this key restores the
/// sequential generation order no matter how workers were scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCase {
    pub method: MethodId,
    pub task: usize,
    pub index: usize,
    pub case: TestCase,
}

impl GeneratedCase {
    pub fn order_key(&self) -> (usize, usize, usize) {
        (self.method.position(), self.task, self.index)
    }
}
