//! Read-only view of the host bundler's chunk graph
//!
//! The bundler owns this data; the namer only reads dependency metadata
//! and assigns the `id` field of chunks that lack one.

/// Kind tag of a single dependency edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    /// `import()` of a statically known path
    DynamicImport,
    /// `import()` whose path is resolved through a directory context
    ContextDynamicImport,
    /// Synchronous `require()`
    CommonJsRequire,
}

/// A single dependency edge with the raw request path as written in source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Import path as authored, before resolution
    pub request: String,

    /// Kind of dependency edge
    pub kind: DependencyKind,
}

impl Dependency {
    pub fn dynamic_import(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            kind: DependencyKind::DynamicImport,
        }
    }

    pub fn context_import(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            kind: DependencyKind::ContextDynamicImport,
        }
    }

    pub fn require(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            kind: DependencyKind::CommonJsRequire,
        }
    }
}

/// Whether a block's modules load with the importer or on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Loaded together with the importing module
    Sync,
    /// Loaded on demand at a dynamic-import boundary
    Async,
}

/// A unit of module-graph metadata describing how a chunk is loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyBlock {
    /// Load semantics of this block
    pub kind: BlockKind,

    /// Dependency edges carried by this block
    pub dependencies: Vec<Dependency>,
}

impl DependencyBlock {
    /// Create an asynchronous-loading block
    pub fn lazy(dependencies: Vec<Dependency>) -> Self {
        Self {
            kind: BlockKind::Async,
            dependencies,
        }
    }

    /// Create a synchronous block
    pub fn sync(dependencies: Vec<Dependency>) -> Self {
        Self {
            kind: BlockKind::Sync,
            dependencies,
        }
    }
}

/// A grouping of chunks sharing a load point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkGroup {
    /// Dependency blocks in the order the bundler recorded them
    pub blocks: Vec<DependencyBlock>,
}

impl ChunkGroup {
    pub fn new(blocks: Vec<DependencyBlock>) -> Self {
        Self { blocks }
    }
}

/// A bundler output unit that needs a display identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    /// Pre-existing display name; set for entry chunks
    pub name: Option<String>,

    /// Final identifier; the namer fills this in when unset
    pub id: Option<String>,

    /// Chunk groups this chunk belongs to
    pub groups: Vec<ChunkGroup>,
}

impl Chunk {
    /// Create an entry chunk with its configured name
    pub fn entry(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            id: None,
            groups: Vec::new(),
        }
    }

    /// Create an unnamed lazy chunk from its groups
    pub fn lazy(groups: Vec<ChunkGroup>) -> Self {
        Self {
            name: None,
            id: None,
            groups,
        }
    }

    /// Whether the bundler already assigned an identifier
    pub fn has_id(&self) -> bool {
        self.id.is_some()
    }
}
