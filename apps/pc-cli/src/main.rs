mod case;
mod error;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pc_function_objects::run::object_registry;
use pc_function_objects::{FunctionObjectList, run_case};
use pc_mesh::MeshAccess;
use tracing_subscriber::EnvFilter;

use crate::case::{CaseDef, DuctCase};
use crate::error::CliResult;

#[derive(Parser)]
#[command(name = "pc-cli")]
#[command(about = "pipecalc CLI - face-zone pipe flow diagnostics on a generated duct", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a case and write postProcessing output
    Run {
        /// Path to the case YAML file
        case_path: PathBuf,
        /// Case directory for output (defaults to the case file's directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Build the mesh and function objects without running
    Check {
        /// Path to the case YAML file
        case_path: PathBuf,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { case_path, out } => cmd_run(&case_path, out),
        Commands::Check { case_path } => cmd_check(&case_path),
    }
}

fn case_dir(case_path: &Path, out: Option<PathBuf>) -> PathBuf {
    out.unwrap_or_else(|| {
        case_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

fn cmd_run(case_path: &Path, out: Option<PathBuf>) -> CliResult<()> {
    let def = CaseDef::load(case_path)?;
    let opts = def.run_options();
    let functions = def.functions()?;
    let mut case = DuctCase::new(def, case_dir(case_path, out))?;

    let time = opts.initial_time();
    let mut list = FunctionObjectList::from_dict(object_registry(&case, &time), &functions, false)?;
    println!("Running {} with {} function object(s)", case_path.display(), list.len());

    let summary = run_case(&mut case, &mut list, &opts)?;
    println!(
        "✓ {} steps to t = {} ({} mesh change(s))",
        summary.steps, summary.t_final, summary.topology_changes
    );
    for path in list.output_files() {
        if path.exists() {
            println!("  {}", path.display());
        }
    }
    Ok(())
}

fn cmd_check(case_path: &Path) -> CliResult<()> {
    println!("Checking case: {}", case_path.display());
    let def = CaseDef::load(case_path)?;
    let opts = def.run_options();
    opts.validate()?;
    let functions = def.functions()?;
    let case = DuctCase::new(def, case_dir(case_path, None))?;

    let mesh = case.polymesh();
    println!(
        "  mesh: {} cells, {} faces ({} internal)",
        mesh.n_cells(),
        mesh.n_faces(),
        mesh.n_internal_faces()
    );
    for patch in mesh.patches() {
        println!("  patch {}: {} faces", patch.name(), patch.size());
    }
    for zone in mesh.face_zones() {
        println!("  face zone {}: {} faces", zone.name(), zone.len());
    }

    let time = opts.initial_time();
    let list = FunctionObjectList::from_dict(object_registry(&case, &time), &functions, false)?;
    for name in list.names() {
        println!("  function object {name}");
    }
    println!("✓ Case is valid");
    Ok(())
}
