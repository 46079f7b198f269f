//! Known-answer table generator
//!
//! Writes the C table to stdout (or `--output`), or with `--check` verifies
//! that a table on disk is exactly what this build would generate.
//!
//! Exit status: 0 on success, 1 on unexplained collisions, a table mismatch
//! or a configuration error, 2 on a usage error.

use katgen::error::{KatError, KatResult};
use katgen::library::DEFAULT_LIBRARY_PATH;
use katgen::{generate, print_box, render_table, GenerationReport, GeneratorConfig, MethodId};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug)]
struct CliArgs {
    config: GeneratorConfig,
    output: Option<PathBuf>,
    check: Option<PathBuf>,
    report: Option<PathBuf>,
    verbose: bool,
    list_methods: bool,
    help: bool,
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("katgen: {}", err);
            eprintln!("Try 'katgen --help' for more information.");
            return ExitCode::from(2);
        }
    };

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(KatError::Collisions(list)) => {
            for collision in &list {
                eprintln!("{}", collision);
            }
            eprintln!("katgen: {}", KatError::Collisions(list));
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("katgen: {}", err);
            ExitCode::from(1)
        }
    }
}

fn run(args: &CliArgs) -> KatResult<()> {
    if args.help {
        print_help();
        return Ok(());
    }
    if args.list_methods {
        list_methods();
        return Ok(());
    }

    let assembly = generate(&args.config)?;
    let mut report = GenerationReport::new(&assembly);

    if !assembly.collisions.is_empty() {
        if let Some(path) = &args.report {
            report.write_json(path)?;
        }
        return Err(KatError::Collisions(assembly.collisions));
    }

    let table = render_table(&assembly.corpus);
    report = report.with_table(&table);
    log::info!("Table fingerprint: {}", report.table_sha256.as_deref().unwrap_or(""));
    if let Some(path) = &args.report {
        report.write_json(path)?;
    }

    if let Some(path) = &args.check {
        let on_disk = fs::read(path)?;
        if on_disk != table.as_bytes() {
            return Err(KatError::Mismatch(describe_mismatch(&on_disk, table.as_bytes(), path)));
        }
        log::info!("{} is up to date", path.display());
        return Ok(());
    }

    match &args.output {
        Some(path) => fs::write(path, &table)?,
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(table.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}

/// First differing line between the file on disk and the generated table.
fn describe_mismatch(on_disk: &[u8], generated: &[u8], path: &std::path::Path) -> String {
    let mut disk_lines = on_disk.split(|&b| b == b'\n');
    let mut generated_lines = generated.split(|&b| b == b'\n');
    let mut line = 1;
    loop {
        match (disk_lines.next(), generated_lines.next()) {
            (Some(a), Some(b)) if a == b => line += 1,
            (None, None) => return format!("{} differs in trailing bytes", path.display()),
            (a, b) => {
                return format!(
                    "{}:{}: found {:?}, generated {:?}",
                    path.display(),
                    line,
                    a.map(String::from_utf8_lossy).unwrap_or_default(),
                    b.map(String::from_utf8_lossy).unwrap_or_default()
                )
            }
        }
    }
}

fn parse_args<I>(args: I) -> KatResult<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut config = GeneratorConfig::new();
    let mut methods = Vec::<MethodId>::new();
    let mut output = None::<PathBuf>;
    let mut check = None::<PathBuf>;
    let mut report = None::<PathBuf>;
    let mut verbose = false;
    let mut list_methods = false;
    let mut help = false;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .ok_or_else(|| KatError::Usage(format!("missing value for {}", flag)))
        };
        match arg.as_str() {
            "--output" | "-o" => output = Some(PathBuf::from(value("--output")?)),
            "--check" => check = Some(PathBuf::from(value("--check")?)),
            "--library" => config = config.with_library_path(value("--library")?),
            "--settings-only" => config = config.with_settings_only(true),
            "--method" | "-m" => methods.push(value("--method")?.parse()?),
            "--threads" | "-j" => {
                let raw = value("--threads")?;
                let threads = raw
                    .parse::<usize>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or_else(|| KatError::Usage(format!("invalid thread count `{}`", raw)))?;
                config = config.with_threads(threads);
            }
            "--report" => report = Some(PathBuf::from(value("--report")?)),
            "--list-methods" => list_methods = true,
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => help = true,
            other => return Err(KatError::Usage(format!("unknown argument `{}`", other))),
        }
    }

    if output.is_some() && check.is_some() {
        return Err(KatError::Usage(
            "--output and --check cannot be used together".to_string(),
        ));
    }
    if !methods.is_empty() {
        config = config.with_methods(methods);
    }

    Ok(CliArgs {
        config,
        output,
        check,
        report,
        verbose,
        list_methods,
        help,
    })
}

fn list_methods() {
    print_box("Registered hashing methods");
    for id in MethodId::ALL {
        let source = if id.needs_library() {
            "library under test"
        } else {
            "independent"
        };
        println!("  {:<14} {:>2} parameter sets, {}", id, id.params().len(), source);
    }
}

fn print_help() {
    println!("Usage: katgen [OPTIONS]");
    println!();
    println!("Generate the known-answer test table for passphrase hashing methods.");
    println!();
    println!("Options:");
    println!("  -o, --output <path>    write the table to <path> instead of stdout");
    println!("      --check <path>     fail unless <path> matches the generated table");
    println!(
        "      --library <path>   library under test (default: {})",
        DEFAULT_LIBRARY_PATH
    );
    println!("      --settings-only    do not load the library; its methods emit settings only");
    println!("  -m, --method <id>      generate only this method (repeatable)");
    println!("  -j, --threads <n>      number of worker threads");
    println!("      --report <path>    write a JSON run summary to <path>");
    println!("      --list-methods     list method identifiers and exit");
    println!("  -v, --verbose          debug logging (RUST_LOG overrides)");
    println!("  -h, --help             show this help");
}
