//! Unit catalog compiler CLI
//!
//! One-shot batch tool: compile a catalog (the embedded default or a file)
//! and splice the generated C++ fragments into the marker regions of the
//! target files, or inspect the resolved catalog.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use metron_catalog::UnitRegistry;
use metron_codegen::generators::cpp::CppGenerator;
use metron_codegen::generators::GeneratorConfig;
use metron_codegen::splice::UpdateOutcome;
use metron_codegen::{splice_output, CodeGenerator, TargetLayout};

#[derive(Parser)]
#[command(name = "metron", version, about = "Dimensional-unit catalog compiler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate C++ fragments and splice them into the target files
    Generate {
        /// Catalog file; the embedded default catalog when omitted
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Directory holding unit_types.hpp, units.hpp and units.cpp
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Prefix for generated class names
        #[arg(long, default_value = "Unit")]
        class_prefix: String,
        /// Export macro placed on generated class declarations
        #[arg(long)]
        export_macro: Option<String>,
        /// Also write one fragment file per type into this directory
        #[arg(long)]
        fragments: Option<PathBuf>,
    },
    /// Parse and resolve a catalog, reporting problems without writing
    Check {
        /// Catalog file; the embedded default catalog when omitted
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Print the resolved catalog as JSON
    Dump {
        /// Catalog file; the embedded default catalog when omitted
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Compact instead of pretty-printed output
        #[arg(long)]
        compact: bool,
    },
}

fn load_registry(catalog: Option<&PathBuf>) -> Result<UnitRegistry> {
    let text = match catalog {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?,
        None => metron_catalog::DEFAULT_CATALOG.to_string(),
    };
    let registry = metron_catalog::compile_with_options(&text, &metron_catalog::default_options())
        .context("compiling catalog")?;
    Ok(registry)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            catalog,
            dir,
            class_prefix,
            export_macro,
            fragments,
        } => {
            let registry = load_registry(catalog.as_ref())?;
            let config = GeneratorConfig {
                class_prefix,
                export_macro,
            };
            let codegen = CodeGenerator::from_registry(registry);
            let output = codegen
                .generate(CppGenerator::new(config))
                .context("running C++ generator")?;

            if let Some(fragment_dir) = fragments {
                metron_codegen::utils::write_fragments(&fragment_dir, &output.fragments)?;
            }

            let outcomes = splice_output(&output, &TargetLayout::standard(&dir))?;
            for (path, outcome) in outcomes {
                match outcome {
                    UpdateOutcome::Unchanged => println!("no changes to {}", path.display()),
                    UpdateOutcome::Written { backup } => println!(
                        "updated {} (previous content in {})",
                        path.display(),
                        backup.display()
                    ),
                }
            }
        }
        Command::Check { catalog } => {
            let registry = load_registry(catalog.as_ref())?;
            println!("catalog OK: {} unit types", registry.len());
        }
        Command::Dump { catalog, compact } => {
            let registry = load_registry(catalog.as_ref())?;
            let json = if compact {
                serde_json::to_string(&registry)?
            } else {
                serde_json::to_string_pretty(&registry)?
            };
            println!("{json}");
        }
    }
    Ok(())
}
