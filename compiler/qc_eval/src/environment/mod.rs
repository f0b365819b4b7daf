//! Lexically chained variable storage.
//!
//! Scopes live in an arena and are addressed by [`ScopeId`]. Each frame owns
//! its bindings and points at most at one parent. Frames are created for the
//! program, for every IF branch and for every function call, and released in
//! LIFO order when that context ends (see `Interpreter::scoped`).

use std::fmt;

use rustc_hash::FxHashMap;

use crate::Value;

/// Handle to a frame in the [`Environment`] arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

/// A stored value plus its constant flag.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub value: Value,
    pub constant: bool,
}

impl Binding {
    pub fn variable(value: Value) -> Self {
        Binding {
            value,
            constant: false,
        }
    }

    pub fn constant(value: Value) -> Self {
        Binding {
            value,
            constant: true,
        }
    }
}

/// Result of a lookup through the scope chain.
///
/// `Undeclared` means no scope in the chain has the identifier, which is
/// distinct from a binding that holds `undefined`.
#[derive(Debug, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a Binding),
    Undeclared,
}

struct Frame {
    bindings: FxHashMap<String, Binding>,
    parent: Option<ScopeId>,
}

impl Frame {
    fn new(parent: Option<ScopeId>) -> Self {
        Frame {
            bindings: FxHashMap::default(),
            parent,
        }
    }
}

/// Arena of scope frames. Frame 0 is the root and is never released.
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    /// Create an environment holding only the root scope.
    pub fn new() -> Self {
        Environment {
            frames: vec![Frame::new(None)],
        }
    }

    /// The root scope.
    #[inline]
    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Allocate a child of `parent`.
    pub fn child(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(u32::try_from(self.frames.len()).unwrap_or(u32::MAX));
        self.frames.push(Frame::new(Some(parent)));
        id
    }

    /// Parent of `scope`, `None` for the root.
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.frames[scope.index()].parent
    }

    /// Number of live frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Release every frame allocated after the first `depth` frames.
    ///
    /// The root frame always survives.
    pub fn release_to(&mut self, depth: usize) {
        self.frames.truncate(depth.max(1));
    }

    /// Create or overwrite `id` in `scope` only. Parents are never touched.
    pub fn declare(&mut self, scope: ScopeId, id: impl Into<String>, binding: Binding) {
        self.frames[scope.index()]
            .bindings
            .insert(id.into(), binding);
    }

    /// Look `id` up in `scope`, then in each ancestor.
    pub fn get(&self, scope: ScopeId, id: &str) -> Lookup<'_> {
        let mut current = Some(scope);
        while let Some(scope) = current {
            let frame = &self.frames[scope.index()];
            if let Some(binding) = frame.bindings.get(id) {
                return Lookup::Found(binding);
            }
            current = frame.parent;
        }
        Lookup::Undeclared
    }

    /// Mutable access to the binding in the nearest scope declaring `id`.
    pub fn resolve_mut(&mut self, scope: ScopeId, id: &str) -> Option<&mut Binding> {
        let owner = self.owner_of(scope, id)?;
        self.frames[owner.index()].bindings.get_mut(id)
    }

    /// Overwrite the value of `id` in the nearest scope declaring it.
    ///
    /// Returns `false`, changing nothing, when no scope in the chain has `id`.
    pub fn set(&mut self, scope: ScopeId, id: &str, value: Value) -> bool {
        match self.resolve_mut(scope, id) {
            Some(binding) => {
                binding.value = value;
                true
            }
            None => false,
        }
    }

    /// The scope in the chain that declares `id`.
    pub fn owner_of(&self, scope: ScopeId, id: &str) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(scope) = current {
            let frame = &self.frames[scope.index()];
            if frame.bindings.contains_key(id) {
                return Some(scope);
            }
            current = frame.parent;
        }
        None
    }

    /// The frame's own bindings, sorted by identifier.
    pub fn bindings(&self, scope: ScopeId) -> Vec<(&str, &Binding)> {
        let mut bindings: Vec<_> = self.frames[scope.index()]
            .bindings
            .iter()
            .map(|(id, binding)| (id.as_str(), binding))
            .collect();
        bindings.sort_unstable_by(|a, b| a.0.cmp(b.0));
        bindings
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
