use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use linkage_tools::config::{LinkConfig, StrategyKind};
use linkage_tools::pipeline::{self, render_preview};
use linkage_tools::{Result, Scorer, io, logging};
use tracing::warn;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = logging::init_tracing() {
        eprintln!("warning: {error}");
    }
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Map(args) => execute_map(args),
        Command::Preview(args) => execute_preview(args),
    }
}

fn execute_map(args: MapArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let run = pipeline::run_mapping(&args.portal, &args.catalogue, &config)?;

    if args.preview {
        let rows = config.preview_rows;
        print!("{}", render_preview("Portal File Preview", &run.portal, rows));
        print!("{}", render_preview("Catalogue File Preview", &run.catalogue, rows));
        print!("{}", render_preview("Mapped Data Preview", &run.mapped, rows));
    }

    if run.summary.matched == 0 && run.summary.records > 0 {
        warn!("no portal record found a catalogue match");
    }

    run.export(&args.output, &config.sheet_name)?;

    if args.summary_json {
        println!("{}", serde_json::to_string_pretty(&run.summary)?);
    } else {
        println!(
            "{} of {} records mapped ({} unmatched) -> {}",
            run.summary.matched,
            run.summary.records,
            run.summary.unmatched,
            args.output.display()
        );
    }
    Ok(())
}

fn execute_preview(args: PreviewArgs) -> Result<()> {
    let table = io::load_table(&args.input)?;
    let title = args.input.display().to_string();
    print!("{}", render_preview(&title, &table, args.rows));
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Enrich a portal file with an attribute looked up from a catalogue file."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Link a portal file to a catalogue file and export the mapped table.
    Map(MapArgs),
    /// Print the first rows of a CSV or spreadsheet file.
    Preview(PreviewArgs),
}

#[derive(clap::Args)]
struct MapArgs {
    /// Portal file (CSV or spreadsheet) holding the key column.
    #[arg(long)]
    portal: PathBuf,

    /// Catalogue file (CSV or spreadsheet) holding key and target columns.
    #[arg(long)]
    catalogue: PathBuf,

    /// Output file; `.xlsx` or `.csv`.
    #[arg(long, default_value = "mapped_data.xlsx")]
    output: PathBuf,

    /// Optional TOML file with linkage settings. Flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Linkage strategy.
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Minimum similarity (0-100) for fuzzy matches.
    #[arg(long)]
    threshold: Option<i64>,

    /// Similarity function for fuzzy matches.
    #[arg(long, value_enum)]
    scorer: Option<ScorerArg>,

    /// Column shared by portal and catalogue.
    #[arg(long)]
    key_column: Option<String>,

    /// Catalogue column copied into the portal.
    #[arg(long)]
    target_column: Option<String>,

    /// Strip surrounding whitespace from keys before comparing.
    #[arg(long)]
    trim_keys: bool,

    /// Compare keys case-insensitively.
    #[arg(long)]
    case_insensitive: bool,

    /// Print the first rows of each table before exporting.
    #[arg(long)]
    preview: bool,

    /// Rows shown per table with `--preview`.
    #[arg(long)]
    preview_rows: Option<usize>,

    /// Print the match summary as JSON.
    #[arg(long)]
    summary_json: bool,
}

#[derive(clap::Args)]
struct PreviewArgs {
    /// File to preview.
    #[arg(long)]
    input: PathBuf,

    /// Number of rows to show.
    #[arg(long, default_value_t = 5)]
    rows: usize,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StrategyArg {
    Exact,
    Fuzzy,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Exact => StrategyKind::Exact,
            StrategyArg::Fuzzy => StrategyKind::Fuzzy,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ScorerArg {
    Indel,
    Levenshtein,
}

impl From<ScorerArg> for Scorer {
    fn from(arg: ScorerArg) -> Self {
        match arg {
            ScorerArg::Indel => Scorer::Indel,
            ScorerArg::Levenshtein => Scorer::Levenshtein,
        }
    }
}

impl MapArgs {
    fn resolve_config(&self) -> Result<LinkConfig> {
        let mut config = match &self.config {
            Some(path) => LinkConfig::from_path(path)?,
            None => LinkConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config.strategy = strategy.into();
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(scorer) = self.scorer {
            config.scorer = scorer.into();
        }
        if let Some(key) = &self.key_column {
            config.key_column = key.clone();
        }
        if let Some(target) = &self.target_column {
            config.target_column = target.clone();
        }
        config.normalization.trim |= self.trim_keys;
        config.normalization.case_insensitive |= self.case_insensitive;
        if let Some(rows) = self.preview_rows {
            config.preview_rows = rows;
        }
        config.validate()?;
        Ok(config)
    }
}
