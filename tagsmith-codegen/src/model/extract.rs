use std::sync::Arc;

use tagsmith_core::{MarkerKind, RawDeclaration};

use super::{AnnotatedDeclaration, ExtractedModel};

/// Build the extracted model from the host's per-kind declaration sets.
///
/// Kinds keep the given order and declarations keep discovery order. A
/// declaration listed twice for the same kind keeps its first position.
pub fn extract(
    raw: impl IntoIterator<Item = (MarkerKind, Vec<RawDeclaration>)>,
) -> ExtractedModel {
    let mut model = ExtractedModel::default();

    for (kind, declarations) in raw {
        let slot = model.by_kind.entry(kind.clone()).or_default();
        for RawDeclaration { element, args } in declarations {
            let key = (element.qualified_name(), kind.clone());
            if !model.annotated.insert(key) {
                continue;
            }
            slot.push(Arc::new(AnnotatedDeclaration {
                marker: kind.clone(),
                element,
                args,
            }));
        }
    }

    model
}
