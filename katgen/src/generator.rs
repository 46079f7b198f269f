//! Parallel case generation
//!
//! Every `(method, phrase, parameters)` triple is an independent task. Tasks
//! run on a rayon pool; each worker owns the scratch area the library under
//! test hashes into. Results carry their task number so the assembler can
//! restore the sequential order.

use crate::case::GeneratedCase;
use crate::config::GeneratorConfig;
use crate::corpus::{assemble, Assembly};
use crate::error::{KatError, KatResult};
use crate::library::{CryptScratch, LibCrypt};
use crate::registry::{Method, Params, Registry};
use crate::shim::ShimContext;
use rayon::prelude::*;

/// One shim invocation.
#[derive(Debug, Clone, Copy)]
pub struct Task<'a> {
    /// Position in the sequential order
    pub index: usize,
    pub method: &'a Method,
    pub phrase: &'a [u8],
    pub params: &'a Params,
}

/// Tasks in sequential order: method-major, then phrase, then parameter
/// tuple.
pub fn build_tasks<'a>(registry: &'a Registry, phrases: &'a [&'a [u8]]) -> Vec<Task<'a>> {
    let mut tasks = Vec::new();
    for method in registry.methods() {
        for phrase in phrases {
            for params in method.params {
                tasks.push(Task {
                    index: tasks.len(),
                    method,
                    phrase: *phrase,
                    params,
                });
            }
        }
    }
    tasks
}

/// Run a single task.
pub fn run_task(task: &Task<'_>, ctx: &mut ShimContext<'_>) -> KatResult<Vec<GeneratedCase>> {
    let cases = task.method.generate(task.phrase, task.params, ctx)?;
    Ok(cases
        .into_iter()
        .enumerate()
        .map(|(index, case)| GeneratedCase {
            method: task.method.id,
            task: task.index,
            index,
            case,
        })
        .collect())
}

/// Run every task on the current rayon pool. The first error aborts the
/// run.
pub fn generate_cases(
    registry: &Registry,
    phrases: &[&[u8]],
    library: Option<&LibCrypt>,
) -> KatResult<Vec<GeneratedCase>> {
    let tasks = build_tasks(registry, phrases);
    log::info!(
        "Generating {} tasks for {} methods",
        tasks.len(),
        registry.len()
    );

    let per_task: Vec<Vec<GeneratedCase>> = tasks
        .par_iter()
        .map_init(CryptScratch::new, |scratch, task| {
            let mut ctx = ShimContext::new(library, scratch);
            run_task(task, &mut ctx)
        })
        .collect::<KatResult<_>>()?;

    Ok(per_task.into_iter().flatten().collect())
}

/// Generate and assemble the corpus `config` describes.
///
/// # Errors
///
/// Returns a configuration error if the library under test cannot be
/// loaded, a shim rejects its parameters or the worker pool cannot start.
/// Unexplained collisions are not errors here; they are returned in the
/// [`Assembly`].
///
/// # Example
///
/// ```no_run
/// use katgen::{generate, GeneratorConfig, MethodId};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GeneratorConfig::new().with_methods([MethodId::Nt]);
/// let assembly = generate(&config)?;
/// println!("{} cases", assembly.corpus.len());
/// # Ok(())
/// # }
/// ```
pub fn generate(config: &GeneratorConfig) -> KatResult<Assembly> {
    let registry = config.registry();
    let library = if config.needs_library() {
        Some(LibCrypt::open(&config.library_path)?)
    } else {
        None
    };
    if config.settings_only {
        log::info!("Settings-only mode: the library under test is not used");
    }

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = config.threads {
        pool = pool.num_threads(threads);
    }
    let pool = pool
        .build()
        .map_err(|e| KatError::ThreadPool(e.to_string()))?;

    let cases = pool.install(|| generate_cases(&registry, config.phrases, library.as_ref()))?;
    let assembly = assemble(cases);
    for group in assembly.corpus.groups() {
        log::debug!("{}: {} cases", group.method, group.cases.len());
    }
    log::info!(
        "Assembled {} cases, {} accepted duplicates, {} unexpected collisions",
        assembly.corpus.len(),
        assembly.accepted_duplicates,
        assembly.collisions.len()
    );
    Ok(assembly)
}
