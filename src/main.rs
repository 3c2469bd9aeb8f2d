use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use johnson::instrument::TimingReport;
use johnson::io::{generate_graph, graph_file_name, load_graph, write_distance_matrix, write_graph};
use johnson::{Activity, Johnson, JohnsonConfig, JohnsonStats, Selection, Timings};

#[derive(Parser)]
#[command(name = "johnson")]
#[command(about = "All-pairs shortest paths with Johnson's algorithm", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute all-pairs shortest paths for a graph file
    Run {
        /// Graph file
        #[arg(short = 'g', long = "graph")]
        graph: PathBuf,

        /// Log per-source progress
        #[arg(short, long, default_value_t = false)]
        verbose: bool,

        /// Worker threads (defaults to available parallelism)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Print the distance matrix to stdout
        #[arg(short = 'P', long = "print", default_value_t = false)]
        print: bool,

        /// Print section timings to stderr
        #[arg(short = 'I', long = "instrument", default_value_t = false)]
        instrument: bool,

        /// Minimum sources per worker task in the Dijkstra sweep
        #[arg(long)]
        chunk: Option<usize>,

        /// Minimum-selection strategy for Dijkstra
        #[arg(long, value_enum, default_value_t = SelectionArg::Heap)]
        selection: SelectionArg,

        /// Write a JSON report (config, timings, stats) to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Write a random graph file
    Generate {
        /// Number of vertices
        #[arg(short = 'n', long, default_value_t = 10)]
        nnode: usize,

        /// Number of edges
        #[arg(short = 'e', long, default_value_t = 20)]
        nedge: usize,

        /// Random seed
        #[arg(short = 's', long, default_value_t = 1)]
        seed: u64,

        /// Output directory
        #[arg(short = 'o', long, default_value = "graphs")]
        out_dir: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SelectionArg {
    Scan,
    Heap,
}

impl From<SelectionArg> for Selection {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::Scan => Selection::Scan,
            SelectionArg::Heap => Selection::Heap,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    graph: &'a str,
    nnode: usize,
    nedge: usize,
    config: &'a JohnsonConfig,
    stats: JohnsonStats,
    timings: TimingReport,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = matches!(cli.command, Commands::Run { verbose: true, .. });
    init_tracing(verbose);

    match cli.command {
        Commands::Run {
            graph,
            verbose,
            threads,
            print,
            instrument,
            chunk,
            selection,
            json,
        } => {
            let mut config = JohnsonConfig::default()
                .with_selection(selection.into())
                .with_verbose(verbose);
            if let Some(threads) = threads {
                config = config.with_threads(threads);
            }
            if let Some(chunk) = chunk {
                config = config.with_chunk_size(chunk);
            }
            run(&graph, config, print, instrument, json)?;
        }
        Commands::Generate {
            nnode,
            nedge,
            seed,
            out_dir,
        } => generate(nnode, nedge, seed, &out_dir)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(
    path: &Path,
    config: JohnsonConfig,
    print: bool,
    instrument: bool,
    json: Option<PathBuf>,
) -> Result<()> {
    let timings = Timings::new(instrument || json.is_some());

    let graph = {
        let _t = timings.track(Activity::LoadGraph);
        load_graph(path).with_context(|| format!("Failed to load graph {}", path.display()))?
    };

    let engine = Johnson::new(&graph, config);
    let solution = engine
        .run_with_timings(&timings)
        .context("Johnson's algorithm failed")?;

    if print {
        let _t = timings.track(Activity::PrintGraph);
        let stdout = io::stdout();
        write_distance_matrix(BufWriter::new(stdout.lock()), solution.paths())
            .context("Failed to write distance matrix")?;
    }

    if !timings.is_enabled() {
        return Ok(());
    }

    let report = timings.report();
    if instrument {
        eprint!("{}", report.render());
    }

    if let Some(json_path) = json {
        let graph_name = path.display().to_string();
        let report = Report {
            graph: &graph_name,
            nnode: graph.node_count(),
            nedge: graph.edge_count(),
            config: engine.config(),
            stats: solution.stats(),
            timings: report,
        };
        let file = File::create(&json_path)
            .with_context(|| format!("Failed to create {}", json_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &report)
            .context("Failed to write JSON report")?;
        writer.flush().context("Failed to write JSON report")?;
    }

    Ok(())
}

fn generate(nnode: usize, nedge: usize, seed: u64, out_dir: &Path) -> Result<()> {
    let graph = generate_graph(nnode, nedge, seed).context("Failed to generate graph")?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create directory {}", out_dir.display()))?;
    let path = out_dir.join(graph_file_name(nnode, nedge, seed));
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_graph(BufWriter::new(file), &graph)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{}", path.display());
    Ok(())
}
