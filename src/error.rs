use thiserror::Error;

/// Errors surfaced by the offset pipeline.
///
/// An engine that yields no rings is not an error; the pipeline maps that
/// outcome to an empty path sequence.
#[derive(Debug, Error)]
pub enum OffsetError {
    /// The offset distance was not a finite number. The pipeline accepts a
    /// bare distance or an options value carrying one.
    #[error(
        "offset expects a finite distance as its second argument, got {distance}; \
         pass a bare number, e.g. `offsetter.offset(&path, 10.0)`, or options, e.g. \
         `offsetter.offset(&path, OffsetOptions::new(10.0).with_simplify(Simplify::Identity))`"
    )]
    Argument { distance: f64 },

    /// Failure propagated unmodified from the offset engine or another
    /// collaborator.
    #[error(transparent)]
    Engine(#[from] anyhow::Error),
}
