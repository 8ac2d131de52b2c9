use clap::{Args, Subcommand};
use std::fs;
use std::path::PathBuf;

use dietplan_core::AppStateStore;

#[derive(Args)]
pub struct DataCommand {
    #[command(subcommand)]
    pub command: DataSubcommand,
}

#[derive(Subcommand)]
pub enum DataSubcommand {
    /// Export all data as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Import data previously exported; only slices present in the file change
    Import {
        /// Path to the export file
        file: PathBuf,
    },
}

impl DataCommand {
    pub fn run(self, store: &mut AppStateStore) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            DataSubcommand::Export { output } => {
                let json = store.export_data()?;
                match output {
                    Some(path) => {
                        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
                        {
                            fs::create_dir_all(parent)?;
                        }
                        fs::write(&path, json)?;
                        println!("Exported to {}", path.display());
                    }
                    None => println!("{}", json),
                }
                Ok(())
            }

            DataSubcommand::Import { file } => {
                let contents = fs::read_to_string(&file)
                    .map_err(|e| format!("Failed to read '{}': {}", file.display(), e))?;
                store.import_data(&contents)?;
                println!("Imported data from {}", file.display());
                Ok(())
            }
        }
    }
}
