use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use tagsmith_manifest::TagsmithToml;

use super::UnwrapOrExit;
use crate::{
    host::FileHost,
    ops::{self, BakeOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BakeCommand {
    /// Path to tagsmith.toml (defaults to ./tagsmith.toml)
    #[arg(short, long, default_value = "tagsmith.toml")]
    pub config: PathBuf,

    /// Output directory (defaults to [generation].output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl BakeCommand {
    /// Run the bake command
    pub fn run(&self) -> Result<()> {
        let toml = TagsmithToml::open(&self.config).unwrap_or_exit();
        let host = FileHost::open(&toml).unwrap_or_exit();

        let opts = BakeOptions {
            output_dir: self.output.as_deref(),
            dry_run: self.dry_run,
        };
        let report = ops::bake(&toml, host, opts)?;
        report.render(&mut TerminalOutput::new());

        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }
}
