//! Chunk naming and per-compilation collision resolution

use tracing::trace;

use crate::config::{ConfigError, NamerConfig, NamerOptions, Strictness};
use crate::graph::{BlockKind, Chunk, DependencyKind};
use crate::transform;

/// Names assigned so far in the current compilation, keyed by name with the
/// request path that produced each one.
///
/// The same request is idempotently given the same name; two different
/// requests never share one.
#[derive(Debug, Default)]
pub struct NameRegistry {
    assigned: std::collections::HashMap<String, String>,
}

impl NameRegistry {
    /// Drop all assignments. Must run once at every compilation start so
    /// watch-mode rebuilds do not inherit stale collision state.
    pub fn clear(&mut self) {
        self.assigned.clear();
    }

    /// Claim a name for `request`, appending `.0`, `.1`, ... to the base
    /// until a name is free or already owned by this same request.
    fn claim(&mut self, base_name: &str, request: &str) -> String {
        if self.is_available(base_name, request) {
            self.assigned
                .insert(base_name.to_string(), request.to_string());
            return base_name.to_string();
        }

        let mut num = 0;
        loop {
            let candidate = format!("{base_name}.{num}");
            if self.is_available(&candidate, request) {
                self.assigned.insert(candidate.clone(), request.to_string());
                return candidate;
            }
            num += 1;
        }
    }

    fn is_available(&self, name: &str, request: &str) -> bool {
        match self.assigned.get(name) {
            None => true,
            Some(owner) => owner == request,
        }
    }
}

/// Answers "what id should this chunk have?" once per unnamed chunk
#[derive(Debug)]
pub struct ChunkNamer {
    config: NamerConfig,
    registry: NameRegistry,
}

impl ChunkNamer {
    /// Build a namer from validated options
    pub fn new(options: NamerOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            config: NamerConfig::new(options)?,
            registry: NameRegistry::default(),
        })
    }

    /// Reset per-compilation state. The host calls this once at the start
    /// of every compilation, before any chunk query.
    pub fn reset(&mut self) {
        self.registry.clear();
    }

    /// Resolve a display name for one chunk, or decline.
    ///
    /// Entry chunks keep their configured name untouched; the registry is
    /// not consulted for them since the bundler already guarantees entry
    /// names are unique.
    pub fn resolve_name(&mut self, chunk: &Chunk) -> Option<String> {
        if let Some(name) = &chunk.name {
            return Some(name.clone());
        }

        let request = self.qualifying_request(chunk)?;
        let base_name = transform::derive_name(&request, &self.config)?;
        let name = self.registry.claim(&base_name, &request);
        trace!("Resolved chunk name {} for request {}", name, request);
        Some(name)
    }

    /// Find the dependency request that identifies this lazy chunk, per the
    /// configured strictness.
    fn qualifying_request(&self, chunk: &Chunk) -> Option<String> {
        match self.config.strictness {
            Strictness::Strict => {
                let block = chunk.groups.first()?.blocks.first()?;
                if block.kind != BlockKind::Async {
                    return None;
                }
                match block.dependencies.as_slice() {
                    [dep] if is_async_import(dep.kind) => Some(dep.request.clone()),
                    _ => None,
                }
            }
            Strictness::Lenient => {
                for group in &chunk.groups {
                    let block = match group.blocks.first() {
                        Some(block) if block.kind == BlockKind::Async => block,
                        _ => continue,
                    };
                    for dep in &block.dependencies {
                        if is_async_import(dep.kind) || dep.kind == DependencyKind::CommonJsRequire
                        {
                            return Some(dep.request.clone());
                        }
                    }
                }
                None
            }
        }
    }
}

fn is_async_import(kind: DependencyKind) -> bool {
    matches!(
        kind,
        DependencyKind::DynamicImport | DependencyKind::ContextDynamicImport
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::graph::{Chunk, ChunkGroup, Dependency, DependencyBlock};

    fn namer(options: NamerOptions) -> ChunkNamer {
        ChunkNamer::new(options).unwrap()
    }

    fn lazy_chunk(dep: Dependency) -> Chunk {
        Chunk::lazy(vec![ChunkGroup::new(vec![DependencyBlock::lazy(vec![dep])])])
    }

    #[test]
    fn test_entry_chunk_name_wins() {
        let mut namer = namer(NamerOptions::default());
        let chunk = Chunk::entry("main");
        assert_eq!(namer.resolve_name(&chunk).as_deref(), Some("main"));

        // Registry untouched: a lazy chunk may still claim the bare name.
        let lazy = lazy_chunk(Dependency::dynamic_import("./main.js"));
        assert_eq!(namer.resolve_name(&lazy).as_deref(), Some("main"));
    }

    #[test]
    fn test_dynamic_import_chunk_gets_module_name() {
        let mut namer = namer(NamerOptions::default());
        let chunk = lazy_chunk(Dependency::dynamic_import("./foo.js"));
        assert_eq!(namer.resolve_name(&chunk).as_deref(), Some("foo"));
    }

    #[test]
    fn test_context_import_qualifies() {
        let mut namer = namer(NamerOptions::default());
        let chunk = lazy_chunk(Dependency::context_import("./pages/bar.js"));
        assert_eq!(namer.resolve_name(&chunk).as_deref(), Some("bar"));
    }

    #[test]
    fn test_sync_block_yields_no_name() {
        let mut namer = namer(NamerOptions::default());
        let chunk = Chunk::lazy(vec![ChunkGroup::new(vec![DependencyBlock::sync(vec![
            Dependency::dynamic_import("./foo.js"),
        ])])]);
        assert_eq!(namer.resolve_name(&chunk), None);
    }

    #[test]
    fn test_strict_rejects_require_dependencies() {
        let mut namer = namer(NamerOptions::default());
        let chunk = lazy_chunk(Dependency::require("./foo.js"));
        assert_eq!(namer.resolve_name(&chunk), None);
    }

    #[test]
    fn test_strict_rejects_multiple_dependencies() {
        let mut namer = namer(NamerOptions::default());
        let chunk = Chunk::lazy(vec![ChunkGroup::new(vec![DependencyBlock::lazy(vec![
            Dependency::dynamic_import("./foo.js"),
            Dependency::dynamic_import("./bar.js"),
        ])])]);
        assert_eq!(namer.resolve_name(&chunk), None);
    }

    #[test]
    fn test_strict_stops_at_first_group() {
        let mut namer = namer(NamerOptions::default());
        let chunk = Chunk::lazy(vec![
            ChunkGroup::new(vec![DependencyBlock::sync(vec![])]),
            ChunkGroup::new(vec![DependencyBlock::lazy(vec![
                Dependency::dynamic_import("./foo.js"),
            ])]),
        ]);
        assert_eq!(namer.resolve_name(&chunk), None);
    }

    #[test]
    fn test_lenient_scans_later_groups() {
        let mut namer = namer(NamerOptions {
            strictness: Strictness::Lenient,
            ..Default::default()
        });
        let chunk = Chunk::lazy(vec![
            ChunkGroup::new(vec![DependencyBlock::sync(vec![])]),
            ChunkGroup::new(vec![DependencyBlock::lazy(vec![
                Dependency::require("./foo.js"),
            ])]),
        ]);
        assert_eq!(namer.resolve_name(&chunk).as_deref(), Some("foo"));
    }

    #[test]
    fn test_lenient_takes_first_qualifying_dependency() {
        let mut namer = namer(NamerOptions {
            strictness: Strictness::Lenient,
            ..Default::default()
        });
        let chunk = Chunk::lazy(vec![ChunkGroup::new(vec![DependencyBlock::lazy(vec![
            Dependency::dynamic_import("./foo.js"),
            Dependency::dynamic_import("./bar.js"),
        ])])]);
        assert_eq!(namer.resolve_name(&chunk).as_deref(), Some("foo"));
    }

    #[test]
    fn test_chunk_without_groups_yields_no_name() {
        let mut namer = namer(NamerOptions::default());
        assert_eq!(namer.resolve_name(&Chunk::lazy(vec![])), None);
    }

    #[test]
    fn test_same_request_is_idempotent() {
        let mut namer = namer(NamerOptions::default());
        let first = lazy_chunk(Dependency::dynamic_import("./foo.js"));
        let second = lazy_chunk(Dependency::dynamic_import("./foo.js"));
        assert_eq!(namer.resolve_name(&first).as_deref(), Some("foo"));
        assert_eq!(namer.resolve_name(&second).as_deref(), Some("foo"));
    }

    #[test]
    fn test_collisions_get_monotonic_suffixes() {
        let mut namer = namer(NamerOptions::default());
        let a = lazy_chunk(Dependency::dynamic_import("./a/foo.js"));
        let b = lazy_chunk(Dependency::dynamic_import("./b/foo.js"));
        let c = lazy_chunk(Dependency::dynamic_import("./c/foo.js"));
        assert_eq!(namer.resolve_name(&a).as_deref(), Some("foo"));
        assert_eq!(namer.resolve_name(&b).as_deref(), Some("foo.0"));
        assert_eq!(namer.resolve_name(&c).as_deref(), Some("foo.1"));

        // Re-asking for an already-named request returns its name.
        let again = lazy_chunk(Dependency::dynamic_import("./b/foo.js"));
        assert_eq!(namer.resolve_name(&again).as_deref(), Some("foo.0"));
    }

    #[test]
    fn test_reset_clears_collision_state() {
        let mut namer = namer(NamerOptions::default());
        let a = lazy_chunk(Dependency::dynamic_import("./a/foo.js"));
        let b = lazy_chunk(Dependency::dynamic_import("./b/foo.js"));
        namer.resolve_name(&a);
        assert_eq!(namer.resolve_name(&b).as_deref(), Some("foo.0"));

        namer.reset();
        assert_eq!(namer.resolve_name(&b).as_deref(), Some("foo"));
    }

    #[test]
    fn test_unusable_path_yields_no_name() {
        let mut namer = namer(NamerOptions::default());
        let chunk = lazy_chunk(Dependency::dynamic_import("src/.js"));
        assert_eq!(namer.resolve_name(&chunk), None);
    }
}
