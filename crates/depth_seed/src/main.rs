//! Seed Roster CLI
//!
//! CSV → JSON seed import, seed verification, record schema

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "depth_seed")]
#[command(about = "Build and check depth chart seed rosters", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build a JSON seed from a roster CSV
    Import {
        /// Input CSV file path
        #[arg(long)]
        csv: PathBuf,

        /// Output JSON seed file path
        #[arg(long)]
        out: PathBuf,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Check that a seed loads and every position is densely ordered
    Verify {
        /// Seed JSON file path
        #[arg(long)]
        r#in: PathBuf,
    },

    /// Print the JSON Schema of a seed record
    Schema,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Import { csv, out, metadata } => {
            println!("🔨 Importing roster from CSV...");
            println!("   CSV Input: {}", csv.display());
            println!("   Output:    {}", out.display());

            let (meta, stats) = depth_seed::import_csv(&csv, &out)?;

            println!(
                "   Parsed {} players (failed: {}, total rows: {}, renumbered: {})",
                stats.parsed, stats.failed, stats.total_rows, stats.renumbered
            );
            print_metadata(&meta);

            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }

        Commands::Verify { r#in } => {
            println!("🔍 Verifying seed {}...", r#in.display());
            let report = depth_seed::verify_seed(&r#in)?;

            println!("   Players:  {}", report.count);
            println!("   Checksum: {}", report.checksum);

            if report.is_dense() {
                println!("✅ Every position is densely ordered");
            } else {
                for violation in &report.violations {
                    println!("   {} has orders {:?}", violation.position, violation.orders);
                }
                anyhow::bail!(
                    "❌ Seed verification failed - {} position(s) not densely ordered",
                    report.violations.len()
                );
            }
        }

        Commands::Schema => {
            println!("{}", depth_seed::seed_schema()?);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &depth_seed::SeedMetadata) {
    println!("\n✅ Seed written successfully!");
    println!("   Players:   {}", meta.count);
    for (position, count) in &meta.positions {
        println!("     {position:<7} {count}");
    }
    println!("   Checksum:  {}", meta.checksum);
    println!("   Created:   {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn save_metadata(path: &PathBuf, meta: &depth_seed::SeedMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    println!("\n📄 Metadata saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("depth_seed CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
