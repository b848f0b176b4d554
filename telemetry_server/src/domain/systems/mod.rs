// Per-tick simulation systems. Each one mutates a single slice of the snapshot.

pub mod climate;
pub mod energy;
pub mod water;
