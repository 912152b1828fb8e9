//! Explain command report data structures.

use tagsmith_codegen::{RuleInfo, pipeline::PhaseInfo};

use super::output::{Output, Report};

/// The pipeline phases and registered rules.
#[derive(Debug)]
pub struct ExplainReport {
    pub phases: Vec<PhaseInfo>,
    pub validators: Vec<RuleInfo>,
    pub processors: Vec<RuleInfo>,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("tagsmith Pipeline Explanation");
        out.newline();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section(&format!("Validators ({})", self.validators.len()));
        for rule in &self.validators {
            out.list_item(&format!("{}: {}", rule.kind, rule.description));
        }
        out.newline();

        out.section(&format!("Processors ({}, in run order)", self.processors.len()));
        for (i, rule) in self.processors.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{}: {}", rule.kind, rule.description));
        }
    }
}
