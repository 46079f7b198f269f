//! Machine-readable run summary

use crate::collision::{quote_bytes, UnexpectedCollision};
use crate::corpus::Assembly;
use crate::error::KatResult;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Case counts for one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSummary {
    pub method: String,
    pub cases: usize,
    /// Cases emitted with no expected output
    pub settings_only: usize,
}

/// An unexplained collision with its byte strings quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollisionSummary {
    pub hash: String,
    pub first_phrase: String,
    pub first_setting: String,
    pub second_phrase: String,
    pub second_setting: String,
}

impl From<&UnexpectedCollision> for CollisionSummary {
    fn from(collision: &UnexpectedCollision) -> Self {
        Self {
            hash: String::from_utf8_lossy(&collision.hash).into_owned(),
            first_phrase: quote_bytes(&collision.first.0),
            first_setting: String::from_utf8_lossy(&collision.first.1).into_owned(),
            second_phrase: quote_bytes(&collision.second.0),
            second_setting: String::from_utf8_lossy(&collision.second.1).into_owned(),
        }
    }
}

/// Summary of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub generator: String,
    pub methods: Vec<MethodSummary>,
    pub total_cases: usize,
    pub accepted_duplicates: usize,
    pub unexpected_collisions: Vec<CollisionSummary>,
    /// SHA-256 of the rendered table, absent when no table was rendered
    pub table_sha256: Option<String>,
}

impl GenerationReport {
    pub fn new(assembly: &Assembly) -> Self {
        let methods = assembly
            .corpus
            .groups()
            .iter()
            .map(|group| MethodSummary {
                method: group.method.to_string(),
                cases: group.cases.len(),
                settings_only: group.cases.iter().filter(|c| c.expected.is_none()).count(),
            })
            .collect();

        Self {
            generator: format!("katgen {}", env!("CARGO_PKG_VERSION")),
            methods,
            total_cases: assembly.corpus.len(),
            accepted_duplicates: assembly.accepted_duplicates,
            unexpected_collisions: assembly.collisions.iter().map(CollisionSummary::from).collect(),
            table_sha256: None,
        }
    }

    pub fn with_table(mut self, table: &str) -> Self {
        self.table_sha256 = Some(fingerprint(table));
        self
    }

    pub fn write_json(&self, path: &Path) -> KatResult<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Lowercase hex SHA-256 of a rendered table.
pub fn fingerprint(table: &str) -> String {
    hex::encode(Sha256::digest(table.as_bytes()))
}
