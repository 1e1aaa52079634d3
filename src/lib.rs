//! Named lazy chunks
//!
//! Assigns stable, human-readable ids to bundler output chunks that would
//! otherwise fall back to numeric ids. Names are derived from the source
//! file path of the dynamically imported module and deduplicated within a
//! single compilation pass.

pub mod config;
pub mod graph;
pub mod namer;
pub mod plugins;
pub mod transform;

pub use config::{ConfigError, NameResolver, NamerConfig, NamerOptions, Strictness};
pub use graph::{BlockKind, Chunk, ChunkGroup, Dependency, DependencyBlock, DependencyKind};
pub use namer::ChunkNamer;
pub use plugins::{CompilationPlugin, NamedLazyChunksPlugin};
