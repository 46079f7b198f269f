//! # katgen
//!
//! Known-answer test tables for passphrase hashing methods.
//!
//! Every phrase of a fixed corpus is hashed with every method under a small
//! set of cost and salt parameters. Expected outputs come from
//! implementations independent of the library under test wherever one
//! exists, so the table checks interoperability rather than just
//! self-consistency.
//!
//! ## Modules
//!
//! - **phrases**: The passphrase corpus
//! - **registry**: Method identifiers, parameter domains and shims
//! - **shim**: Per-method reference computations
//! - **generator**: Parallel generation over all tasks
//! - **collision**: Oracle deciding which duplicate outputs are expected
//! - **corpus**: Ordering, grouping and the collision check
//! - **serialize**: Rendering as a guarded C table
//!
//! ## Examples
//!
//! ```rust
//! use katgen::{collision_expected, strneq_7bit};
//!
//! // DES ignores the 8th bit and everything past byte 8
//! assert!(strneq_7bit(b"U*U*U*U*", b"U*U*U*U*ignored", 8));
//! assert!(collision_expected(b"U*U*U*U*", b"CC", b"U*U*U*U*ignored", b"CC"));
//! assert!(!collision_expected(b"abc", b"$1$salt", b"abd", b"$1$salt"));
//! ```

pub mod case;
pub mod collision;
pub mod config;
pub mod corpus;
pub mod error;
pub mod generator;
pub mod hash64;
pub mod library;
pub mod phrases;
pub mod registry;
pub mod report;
pub mod serialize;
pub mod shim;

// Re-export commonly used items
pub use case::{GeneratedCase, HashValue, Setting, TestCase};
pub use collision::{
    buggy_expand_bf_key, collision_expected, equivalent_sunmd5_settings, explain_collision,
    sign_extension_collision, strneq_7bit, Quirk, UnexpectedCollision,
};
pub use config::GeneratorConfig;
pub use corpus::{assemble, Assembler, Assembly, Corpus};
pub use error::{KatError, KatResult};
pub use generator::generate;
pub use registry::{MethodId, Params, Registry};
pub use report::GenerationReport;
pub use serialize::{c_escape, render_table};

/// Print text in a nice box with automatic sizing
pub fn print_box(text: &str) {
    let text_len = text.chars().count();
    let total_width = text_len + 4; // 2 spaces padding on each side

    println!("\n╔{}╗", "═".repeat(total_width));
    println!("║  {}  ║", text);
    println!("╚{}╝\n", "═".repeat(total_width));
}
