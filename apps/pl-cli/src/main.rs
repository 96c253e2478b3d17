use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use pl_app::{AppResult, TranslateRequest, project_service, translate_service};

#[derive(Parser)]
#[command(name = "pl-cli")]
#[command(about = "Plant loop CLI - translate plant projects into IDF", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
    },
    /// List plant loops in a project
    Loops {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
    },
    /// Translate a project into IDF records
    Translate {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
        /// Output IDF file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Omit `!- Field Name` comments
        #[arg(long)]
        no_comments: bool,
        /// Skip equipment that sits on no plant loop
        #[arg(long)]
        skip_unconnected: bool,
    },
    /// Rewrite a project in another format (by output extension)
    Convert {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
        /// Output project path; `.json` writes JSON, anything else YAML
        output: PathBuf,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Loops { project_path } => cmd_loops(&project_path),
        Commands::Translate {
            project_path,
            output,
            no_comments,
            skip_unconnected,
        } => {
            let request = TranslateRequest {
                field_comments: no_comments.then_some(false),
                translate_unconnected_components: skip_unconnected.then_some(false),
            };
            cmd_translate(&project_path, output.as_deref(), request)
        }
        Commands::Convert {
            project_path,
            output,
        } => cmd_convert(&project_path, &output),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_loops(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let loops = project_service::list_plant_loops(&project);

    if loops.is_empty() {
        println!("No plant loops found in project");
    } else {
        println!("Plant loops in project:");
        for pl in loops {
            println!(
                "  {} - {} ({} supply branches, {} demand branches, {} components{})",
                pl.name,
                pl.fluid,
                pl.supply_branches,
                pl.demand_branches,
                pl.component_count,
                if pl.has_user_schemes {
                    ", user operation schemes"
                } else {
                    ""
                }
            );
        }
    }
    Ok(())
}

fn cmd_translate(
    project_path: &Path,
    output: Option<&Path>,
    request: TranslateRequest,
) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let response = translate_service::translate_project(&project, request)?;

    match output {
        Some(path) => {
            translate_service::write_idf(path, &response)?;
            println!(
                "✓ Wrote {} records to {}",
                response.workspace.len(),
                path.display()
            );
        }
        None => print!("{}", response.to_idf_string()),
    }
    Ok(())
}

fn cmd_convert(project_path: &Path, output: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    project_service::save_project(output, &project)?;
    println!("✓ Saved project to {}", output.display());
    Ok(())
}
