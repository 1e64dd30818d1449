use std::{io, path::PathBuf};

use crate::store::SeriesId;

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("cannot open {}: {source}", path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
    #[error("series {series} has no samples")]
    EmptySeries { series: SeriesId },
    #[error("largest sample {max} ms needs more than {limit} one-millisecond bins")]
    RangeTooWide { max: u64, limit: u64 },
    #[error("no series to plan bins for")]
    EmptyGroup,
    #[error("terminal: {0}")]
    Terminal(#[from] io::Error),
}

/// Result type for the plotting pipeline.
pub type PlotResult<T> = Result<T, PlotError>;
