use clap::Args;
use eyre::Result;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        ops::explain().render(&mut TerminalOutput::new());
        Ok(())
    }
}
