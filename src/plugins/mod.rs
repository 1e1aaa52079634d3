//! Host-facing plugin surface
//!
//! The bundler drives these hooks directly: once per compilation to reset
//! per-pass state, then once, synchronously, with every chunk that still
//! needs an identifier.

use tracing::debug;

use crate::config::{ConfigError, NamerOptions};
use crate::graph::Chunk;
use crate::namer::ChunkNamer;

/// Compilation lifecycle hooks a host bundler invokes on a plugin.
///
/// All hooks are synchronous; the host guarantees serial invocation within
/// one compilation.
pub trait CompilationPlugin {
    /// Plugin name for logging and debugging
    fn name(&self) -> &str;

    /// Called once at the start of every compilation, before any chunk is
    /// queried
    fn compilation_start(&mut self) {}

    /// Called once per compilation with the full set of chunks, before the
    /// bundler assigns its own default ids
    fn before_chunk_ids(&mut self, _chunks: &mut [Chunk]) {}
}

/// Names lazy chunks after the module they dynamically import
pub struct NamedLazyChunksPlugin {
    namer: ChunkNamer,
}

impl NamedLazyChunksPlugin {
    /// Create the plugin; misconfiguration fails here, before any build
    pub fn new(options: NamerOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            namer: ChunkNamer::new(options)?,
        })
    }

    /// Create the plugin from a plugin options table in the bundler config
    pub fn from_table(table: toml::Table) -> Result<Self, ConfigError> {
        Self::new(NamerOptions::from_table(table)?)
    }
}

impl CompilationPlugin for NamedLazyChunksPlugin {
    fn name(&self) -> &str {
        "named-lazy-chunks"
    }

    fn compilation_start(&mut self) {
        self.namer.reset();
    }

    fn before_chunk_ids(&mut self, chunks: &mut [Chunk]) {
        for chunk in chunks.iter_mut().filter(|chunk| !chunk.has_id()) {
            if let Some(name) = self.namer.resolve_name(chunk) {
                debug!("Assigned chunk id: {}", name);
                chunk.id = Some(name);
            }
        }
    }
}
