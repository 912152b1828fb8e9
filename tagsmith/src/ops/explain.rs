//! Explain operation - pipeline explanation.

use tagsmith_codegen::{Registry, pipeline::phases};

use crate::reports::ExplainReport;

/// Describe the pipeline phases and the built-in rules.
pub fn explain() -> ExplainReport {
    let registry = Registry::standard();

    ExplainReport {
        phases: phases::standard().iter().map(|p| p.info()).collect(),
        validators: registry.validators.info(),
        processors: registry.processors.info(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_lists_everything() {
        let report = explain();
        let phases: Vec<_> = report.phases.iter().map(|p| p.name).collect();
        assert_eq!(phases, ["extract", "resolve", "validate", "process", "render"]);
        assert_eq!(report.validators.len(), 35);
        assert_eq!(report.processors.len(), 35);
        assert_eq!(report.processors[0].kind.as_str(), "enhanced-component");
    }
}
