//! Bridge to the external risk-scoring process.
//!
//! Each prediction request spawns one scorer process, pipes the JSON
//! payload to its stdin, and relays its stdout as JSON. A
//! [`pool::ScorerPool`] caps how many scorers run at once and enforces a
//! per-request timeout; [`subprocess`] owns the spawn/pipe/wait cycle;
//! [`outcome`] classifies what came back.

pub mod outcome;
pub mod pool;
pub mod subprocess;

pub use outcome::{PredictionError, ProcessOutput};
pub use pool::{ScorerCommand, ScorerPool};
