pub mod memory;

pub use memory::{MemoryBlock, MemorySurface, MemoryWorld, SurfaceCall};
