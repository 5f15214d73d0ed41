//! Reading and decoding a single reply stream.
//!
//! - `reader` - Cancellable pulls from the response body (TransportReader)
//! - `pipeline` - Wiring reader → decoder → parser → interpreter (pump)

mod pipeline;
mod reader;

pub use pipeline::{process_blocks, pump, StreamEnd};
pub use reader::{Pull, TransportReader};
