// Deck building: concept ingestion, validation, shuffled cyclic card filling.
// Pure and synchronous; the only randomness is the injected shuffle RNG.

pub mod builder;
pub mod handlers;
pub mod ingest;
pub mod models;
