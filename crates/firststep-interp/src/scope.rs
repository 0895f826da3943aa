//! Nested scope arena for the interpreter (spec.md §4.3, §9).
//!
//! Scopes form a tree-shaped stack: each push links to the currently
//! active scope as parent, and pop walks back to it. Rather than a real
//! `Rc`/parent-pointer tree (the shape `faxc-sem::scope::{Rib, ScopeTree}`
//! uses for name resolution), this stores every scope ever pushed in one
//! arena and just rewinds a `current` cursor on pop — cheaper, and the
//! active root-to-leaf path is always reachable through `parent` links.
//!
//! `$ret` (spec.md §4.3, §9) is not a magic name lookup here: a scope
//! pushed for a function call is marked `is_function_base`, and that bit
//! is what bounds `Assign`'s outward walk. The return value itself is
//! still stored as an ordinary binding under a reserved [`Symbol`] no
//! source identifier can spell (identifiers never contain `$`).

use std::collections::HashMap;

use firststep_util::{Idx, IndexVec, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl Idx for ScopeId {
    fn from_usize(idx: usize) -> Self {
        ScopeId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

struct Scope {
    bindings: HashMap<Symbol, Option<i32>>,
    parent: Option<ScopeId>,
    is_function_base: bool,
}

/// The interpreter's scope chain: an arena of [`Scope`]s plus a cursor
/// naming the currently active one.
pub struct ScopeTree {
    scopes: IndexVec<ScopeId, Scope>,
    current: Option<ScopeId>,
}

/// Reserved name for the in-environment return-value slot (spec.md §4.3,
/// §9 "Return via in-env sentinel"). Not a legal identifier spelling
/// (spec.md §4.1: identifiers are `[a-zA-Z_][a-zA-Z0-9_]*`), so it can
/// never collide with a user binding.
fn ret_symbol() -> Symbol {
    Symbol::intern("$ret")
}

impl ScopeTree {
    pub fn new() -> Self {
        Self {
            scopes: IndexVec::new(),
            current: None,
        }
    }

    /// Pushes a new scope on top of whatever is currently active.
    /// `is_function_base` marks a scope created for a function call
    /// (holds parameters and `$ret`) rather than a plain `Block`.
    pub fn push(&mut self, is_function_base: bool) {
        let parent = self.current;
        let id = self.scopes.push(Scope {
            bindings: HashMap::new(),
            parent,
            is_function_base,
        });
        self.current = Some(id);
    }

    /// Pops back to the parent of the current scope. Always call this on
    /// every exit path (including error returns) so the active path
    /// matches the call/block nesting, per spec.md §5's scoped-acquisition
    /// requirement.
    pub fn pop(&mut self) {
        let cur = self.current.expect("pop() without a matching push()");
        self.current = self.scopes[cur].parent;
    }

    /// Installs the `$ret` slot, unset, in the current (function-base)
    /// scope.
    pub fn declare_return_slot(&mut self) {
        let cur = self.current.expect("declare_return_slot() outside a scope");
        self.scopes[cur].bindings.insert(ret_symbol(), None);
    }

    /// `Return`'s write target: walks outward to the nearest
    /// function-base scope and sets its `$ret`.
    pub fn write_return(&mut self, value: i32) {
        let mut id = self.current;
        while let Some(i) = id {
            if self.scopes[i].is_function_base {
                self.scopes[i].bindings.insert(ret_symbol(), Some(value));
                return;
            }
            id = self.scopes[i].parent;
        }
        unreachable!("write_return() called outside any function frame");
    }

    /// Reads `$ret` out of the current scope, which is the function-base
    /// scope itself right after its body block has been evaluated and
    /// popped back to it.
    pub fn read_return(&self) -> Option<i32> {
        let cur = self.current.expect("read_return() outside a scope");
        self.scopes[cur].bindings.get(&ret_symbol()).copied().flatten()
    }

    /// `Define`: insert `name` in the innermost scope. `Err(())` if it is
    /// already bound there (redefinition, spec.md §4.3).
    pub fn define(&mut self, name: Symbol, value: i32) -> Result<(), ()> {
        let cur = self.current.expect("define() outside a scope");
        let scope = &mut self.scopes[cur];
        if scope.bindings.contains_key(&name) {
            return Err(());
        }
        scope.bindings.insert(name, Some(value));
        Ok(())
    }

    /// Binds a function parameter without the redefinition check `define`
    /// performs — duplicate parameter names are a per-call error in
    /// spec.md's original (`CallFunction`'s "redefinition of argument"),
    /// not a binding-time one, so the caller checks the result itself.
    pub fn bind_param(&mut self, name: Symbol, value: i32) -> Result<(), ()> {
        self.define(name, value)
    }

    /// `Id`: search outward from the innermost scope. No `$ret` boundary
    /// applies to reads — only `assign` stops at the function frontier
    /// (spec.md §4.3, §9).
    pub fn lookup(&self, name: Symbol) -> Option<i32> {
        let mut id = self.current;
        while let Some(i) = id {
            if let Some(&v) = self.scopes[i].bindings.get(&name) {
                return v;
            }
            id = self.scopes[i].parent;
        }
        None
    }

    /// `Assign`: update the first scope outward that already binds `name`,
    /// never walking past a function-base scope that doesn't have it
    /// (spec.md §4.3's `$ret`-frontier rule). Returns `false` if no such
    /// binding was found before the frontier.
    pub fn assign(&mut self, name: Symbol, value: i32) -> bool {
        let mut id = self.current;
        while let Some(i) = id {
            let scope = &mut self.scopes[i];
            if scope.bindings.contains_key(&name) {
                scope.bindings.insert(name, Some(value));
                return true;
            }
            if scope.is_function_base {
                return false;
            }
            id = scope.parent;
        }
        false
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
