//! The pipeline's state progression, used by diagnostics and logging to
//! report how far a transaction got before being emitted or erased.

use std::fmt;

/// A checkpoint in the classification pipeline. `Parser::parse` advances
/// through these in order; reaching `Erased` at any point short-circuits
/// the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    IngestOk,
    DeltasBuilt,
    SwapperChosen,
    Classified,
    Single,
    Split,
    Mapped,
    Validated,
    Emitted,
    Erased,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineState::Init => "init",
            PipelineState::IngestOk => "ingest_ok",
            PipelineState::DeltasBuilt => "deltas_built",
            PipelineState::SwapperChosen => "swapper_chosen",
            PipelineState::Classified => "classified",
            PipelineState::Single => "single",
            PipelineState::Split => "split",
            PipelineState::Mapped => "mapped",
            PipelineState::Validated => "validated",
            PipelineState::Emitted => "emitted",
            PipelineState::Erased => "erased",
        };
        write!(f, "{}", s)
    }
}
