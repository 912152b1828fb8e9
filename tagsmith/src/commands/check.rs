use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use tagsmith_manifest::TagsmithToml;

use super::UnwrapOrExit;
use crate::{
    host::FileHost,
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to tagsmith.toml (defaults to ./tagsmith.toml)
    #[arg(short, long, default_value = "tagsmith.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let toml = TagsmithToml::open(&self.config).unwrap_or_exit();
        let host = FileHost::open(&toml).unwrap_or_exit();

        let report = ops::check(&toml, host)?;
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
