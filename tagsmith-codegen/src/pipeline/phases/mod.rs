//! Built-in pipeline phases.
//!
//! These are the phases every pipeline runs, in this order:
//!
//! - [`ExtractPhase`] - collects marked declarations from the host
//! - [`ResolvePhase`] - builds the layered resource catalog
//! - [`ValidatePhase`] - runs the validator registry
//! - [`ProcessPhase`] - runs the processor registry
//! - [`RenderPhase`] - hands the generation model to the renderer

mod extract;
mod process;
mod render;
mod resolve;
mod validate;

pub use extract::ExtractPhase;
pub use process::ProcessPhase;
pub use render::RenderPhase;
pub use resolve::ResolvePhase;
pub use validate::ValidatePhase;

use super::Phase;

/// The built-in phases in execution order.
pub fn standard() -> Vec<Box<dyn Phase>> {
    vec![
        Box::new(ExtractPhase),
        Box::new(ResolvePhase),
        Box::new(ValidatePhase),
        Box::new(ProcessPhase),
        Box::new(RenderPhase),
    ]
}
