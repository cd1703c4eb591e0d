//! Consumer implementations.
//!
//! - [`FilteringConsumer`] — decorator that filters batches before forwarding
//! - [`SinkConsumer`], [`NopConsumer`], [`ErrConsumer`] — terminal stages

mod filtering;
mod sink;

pub use filtering::{FilteringConsumer, consumer_with_filter};
pub use sink::{ErrConsumer, NopConsumer, SinkConsumer};
