//! Corpus assembly
//!
//! Cases arrive from the workers in any order. The assembler puts them back
//! into registry-declared order, groups them by method and checks every
//! output against the ones seen before it.
//!
//! The collision check is incremental: each output is compared only with
//! the first case that produced it. A pair of cases that ought to collide
//! under some quirk but does not is never noticed.

use crate::case::{GeneratedCase, HashValue, Setting, TestCase};
use crate::collision::{explain_collision, UnexpectedCollision};
use crate::error::{KatError, KatResult};
use crate::registry::MethodId;
use std::collections::HashMap;

/// All cases of one method, in generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCases {
    pub method: MethodId,
    pub cases: Vec<TestCase>,
}

/// The ordered, grouped table contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    groups: Vec<MethodCases>,
}

impl Corpus {
    pub fn groups(&self) -> &[MethodCases] {
        &self.groups
    }

    pub fn get(&self, method: MethodId) -> Option<&MethodCases> {
        self.groups.iter().find(|g| g.method == method)
    }

    /// Total number of cases.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.cases.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.cases.is_empty())
    }
}

/// Result of assembling a run.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub corpus: Corpus,
    /// Collisions no quirk explains, in detection order
    pub collisions: Vec<UnexpectedCollision>,
    /// Collisions a quirk explains
    pub accepted_duplicates: usize,
}

impl Assembly {
    /// The corpus, or every unexplained collision.
    pub fn into_corpus(self) -> KatResult<Corpus> {
        if self.collisions.is_empty() {
            Ok(self.corpus)
        } else {
            Err(KatError::Collisions(self.collisions))
        }
    }
}

/// Incremental collision map and method grouping.
#[derive(Debug, Default)]
pub struct Assembler {
    first_seen: HashMap<HashValue, (Vec<u8>, Setting)>,
    groups: Vec<MethodCases>,
    collisions: Vec<UnexpectedCollision>,
    accepted_duplicates: usize,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the next case in order.
    pub fn add(&mut self, method: MethodId, case: TestCase) {
        if let Some(expected) = &case.expected {
            self.check(expected, &case);
        }

        match self.groups.iter_mut().find(|g| g.method == method) {
            Some(group) => group.cases.push(case),
            None => self.groups.push(MethodCases {
                method,
                cases: vec![case],
            }),
        }
    }

    fn check(&mut self, expected: &HashValue, case: &TestCase) {
        let Some((first_phrase, first_setting)) = self.first_seen.get(expected) else {
            self.first_seen
                .insert(expected.clone(), (case.phrase.clone(), case.setting.clone()));
            return;
        };

        match explain_collision(first_phrase, first_setting, &case.phrase, &case.setting) {
            Some(quirk) => {
                log::debug!(
                    "Accepted collision on {}: {}",
                    String::from_utf8_lossy(expected),
                    quirk
                );
                self.accepted_duplicates += 1;
            }
            None => {
                let collision = UnexpectedCollision {
                    hash: expected.clone(),
                    first: (first_phrase.clone(), first_setting.clone()),
                    second: (case.phrase.clone(), case.setting.clone()),
                };
                log::error!(
                    "Unexpected collision on {}",
                    String::from_utf8_lossy(expected)
                );
                self.collisions.push(collision);
            }
        }
    }

    pub fn finish(self) -> Assembly {
        Assembly {
            corpus: Corpus {
                groups: self.groups,
            },
            collisions: self.collisions,
            accepted_duplicates: self.accepted_duplicates,
        }
    }
}

/// Restore declared order, group by method and run the collision check.
pub fn assemble(mut cases: Vec<GeneratedCase>) -> Assembly {
    cases.sort_by_key(GeneratedCase::order_key);

    let mut assembler = Assembler::new();
    for generated in cases {
        assembler.add(generated.method, generated.case);
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(method: MethodId, task: usize, phrase: &[u8], setting: &[u8], hash: &[u8]) -> GeneratedCase {
        GeneratedCase {
            method,
            task,
            index: 0,
            case: TestCase::new(phrase, setting.to_vec(), hash.to_vec()),
        }
    }

    #[test]
    fn test_order_restored() {
        let cases = vec![
            generated(MethodId::Nt, 5, b"b", b"$3$", b"h2"),
            generated(MethodId::Bcrypt, 1, b"a", b"$2b$05$x", b"h1"),
            generated(MethodId::Nt, 4, b"a", b"$3$", b"h3"),
        ];
        let assembly = assemble(cases);
        let groups = assembly.corpus.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].method, MethodId::Bcrypt);
        assert_eq!(groups[1].method, MethodId::Nt);
        assert_eq!(groups[1].cases[0].phrase, b"a");
        assert_eq!(groups[1].cases[1].phrase, b"b");
        assert_eq!(assembly.corpus.len(), 3);
    }

    #[test]
    fn test_accepted_duplicate_counted() {
        let mut assembler = Assembler::new();
        assembler.add(
            MethodId::Descrypt,
            TestCase::new(b"U*U*U*U*", b"CC".to_vec(), b"CCNf8Sbh3HDfQ".to_vec()),
        );
        assembler.add(
            MethodId::Descrypt,
            TestCase::new(b"U*U*U*U*ignored", b"CC".to_vec(), b"CCNf8Sbh3HDfQ".to_vec()),
        );
        let assembly = assembler.finish();
        assert_eq!(assembly.accepted_duplicates, 1);
        assert!(assembly.collisions.is_empty());
        assert_eq!(assembly.corpus.len(), 2);
    }

    #[test]
    fn test_unexplained_collision_reported() {
        let mut assembler = Assembler::new();
        assembler.add(MethodId::Md5crypt, TestCase::new(b"a", b"$1$x".to_vec(), b"$1$x$h".to_vec()));
        assembler.add(MethodId::Md5crypt, TestCase::new(b"b", b"$1$x".to_vec(), b"$1$x$h".to_vec()));
        let assembly = assembler.finish();
        assert_eq!(assembly.collisions.len(), 1);
        assert_eq!(assembly.collisions[0].first.0, b"a");
        assert_eq!(assembly.collisions[0].second.0, b"b");
        assert!(matches!(assembly.into_corpus(), Err(KatError::Collisions(list)) if list.len() == 1));
    }

    #[test]
    fn test_settings_only_cases_skip_the_check() {
        let mut assembler = Assembler::new();
        assembler.add(MethodId::Yescrypt, TestCase::settings_only(b"a", b"$y$j75$x".to_vec()));
        assembler.add(MethodId::Yescrypt, TestCase::settings_only(b"b", b"$y$j75$x".to_vec()));
        let assembly = assembler.finish();
        assert!(assembly.collisions.is_empty());
        assert_eq!(assembly.accepted_duplicates, 0);
        assert_eq!(assembly.corpus.len(), 2);
    }
}
