//! Normalize a JSON problem file into clauses

use clap::Parser;
use clausify::json::{ClauseSetJson, ProblemJson};
use clausify::{Interner, NormalizeConfig, Normalizer, PrenexOrder, WriterSink};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Convert first-order formulas into a clause set", long_about = None)]
struct Args {
    /// Problem file: {"formulas": [...]}
    problem: PathBuf,

    /// JSON configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the formulas after every stage
    #[arg(long)]
    trace: bool,

    /// Print the clause set as JSON instead of one clause per line
    #[arg(long)]
    json: bool,

    /// Keep quantifiers in traversal order when building the prenex prefix
    #[arg(long)]
    preserve_order: bool,

    /// Fail if distribution produces more clauses than this
    #[arg(long)]
    max_clauses: Option<usize>,

    /// Wall-clock budget in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print per-stage timings as JSON on stderr
    #[arg(long)]
    profile: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> clausify::Result<()> {
    let mut config = match &args.config {
        Some(path) => NormalizeConfig::from_json_file(path)?,
        None => NormalizeConfig::default(),
    };
    config.trace |= args.trace;
    config.enable_profiling |= args.profile;
    if args.preserve_order {
        config.prenex_order = PrenexOrder::Preserve;
    }
    if let Some(max_clauses) = args.max_clauses {
        config.max_clauses = max_clauses;
    }
    if args.timeout_ms.is_some() {
        config.timeout_ms = args.timeout_ms;
    }

    let problem = ProblemJson::from_json_file(&args.problem)?;
    let mut interner = Interner::new();
    let formulas = problem.to_formulas(&mut interner);

    let mut sink = WriterSink::stdout();
    let result = Normalizer::new(config).normalize_with_sink(formulas, &mut interner, &mut sink)?;

    if args.json {
        let json = ClauseSetJson::from_clauses(&result.clauses, &interner);
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        for clause in &result.clauses {
            println!("{}", clause.display(&interner));
        }
    }

    if let Some(profile) = &result.profile {
        eprintln!("{}", serde_json::to_string_pretty(profile)?);
    }

    Ok(())
}
