use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fuzzdex::{
    inspect, load_directory, EngineConfig, InvertedIndex, QueryOutcome, SearchEngine,
    SpellCorrector,
};

mod cli;
use cli::display::{
    correction, format_size, pad_right, row, score_value, section_bot, section_top, themed, CYAN,
    GRAY,
};
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "fuzzdex=debug" } else { "fuzzdex=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    match cli.command {
        Commands::Build { corpus } => run_build(&config, &corpus),
        Commands::Search {
            query,
            k,
            no_correct,
            json,
        } => run_search(&config, &query, k, no_correct, json),
        Commands::Correct { text } => run_correct(&config, &text),
        Commands::Inspect { file } => run_inspect(&file),
    }
}

/// Config file (or defaults), then command-line directory overrides.
fn resolve_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(dir) = &cli.index_dir {
        config.index_dir = dir.clone();
    }
    if let Some(dir) = &cli.spell_dir {
        config.spell_dir = dir.clone();
    }
    Ok(config)
}

fn run_build(config: &EngineConfig, corpus: &Path) -> Result<()> {
    let started = Instant::now();
    let engine = SearchEngine::open(config, true, || load_directory(corpus))
        .with_context(|| format!("building from {}", corpus.display()))?;

    let index = engine.index();
    let spell = engine.corrector();
    section_top("BUILD");
    row(&format!("documents   {}", index.document_count()));
    row(&format!("terms       {}", index.postings().len()));
    row(&format!("dictionary  {} words, {} occurrences", spell.dictionary().len(), spell.total()));
    row(&format!("index       {}", config.index_dir.display()));
    row(&format!("spell       {}", config.spell_dir.display()));
    row(&themed(GRAY, &[], &format!("took {:.1?}", started.elapsed())));
    section_bot();
    Ok(())
}

fn require_dir(dir: &Path, what: &str) -> Result<()> {
    if !dir.exists() {
        bail!("no {} at {}; run `fuzzdex build --corpus <dir>` first", what, dir.display());
    }
    Ok(())
}

fn load_index(config: &EngineConfig) -> Result<InvertedIndex> {
    require_dir(&config.index_dir, "index")?;
    InvertedIndex::load(&config.index_dir, &config.index)
        .with_context(|| format!("loading index from {}", config.index_dir.display()))
}

fn load_corrector(config: &EngineConfig) -> Result<SpellCorrector> {
    require_dir(&config.spell_dir, "spelling dictionary")?;
    SpellCorrector::load(&config.spell_dir, &config.spell)
        .with_context(|| format!("loading spelling dictionary from {}", config.spell_dir.display()))
}

fn run_search(config: &EngineConfig, query: &str, k: usize, no_correct: bool, json: bool) -> Result<()> {
    let index = load_index(config)?;
    let outcome = if no_correct {
        QueryOutcome {
            corrected: query.to_string(),
            hits: index.find(query, k),
        }
    } else {
        SearchEngine::new(load_corrector(config)?, index).query(query, k)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    section_top("SEARCH");
    row(&format!("query  {}", correction(query, &outcome.corrected)));
    if outcome.hits.is_empty() {
        row(&themed(GRAY, &[], "no matching documents"));
    }
    for (rank, hit) in outcome.hits.iter().enumerate() {
        row(&format!(
            "{:>3}. {} {}",
            rank + 1,
            pad_right(&themed(CYAN, &[], &hit.document), 48),
            score_value(hit.score)
        ));
    }
    section_bot();
    Ok(())
}

fn run_correct(config: &EngineConfig, text: &str) -> Result<()> {
    let corrector = load_corrector(config)?;
    println!("{}", corrector.spell_correction(text));
    Ok(())
}

fn run_inspect(file: &Path) -> Result<()> {
    let info = inspect(file).with_context(|| format!("inspecting {}", file.display()))?;
    section_top("ARTIFACT");
    row(&format!("file        {}", file.display()));
    row(&format!("kind        {}", info.kind.name()));
    row(&format!("version     {}", info.version));
    row(&format!(
        "payload     {}{}",
        format_size(info.payload_len),
        if info.compressed { " (brotli)" } else { "" }
    ));
    row(&format!("file size   {}", format_size(info.file_len)));
    row(&format!("crc32       {:08x} ✓", info.crc32));
    section_bot();
    Ok(())
}
