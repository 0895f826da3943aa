//! Name-to-`Val` scope chain used while lowering one function (spec.md
//! §4.4). Shaped like `firststep_interp`'s `ScopeTree` — same arena +
//! parent-pointer idea, grounded on `faxc-sem::scope::{Rib, ScopeTree}`
//! — but carries IR [`crate::ir::Val`]s instead of `i32`s, and has no
//! `$ret` frontier: lowering never chains scopes across function
//! boundaries the way the interpreter's call stack does, so nothing here
//! needs to stop an outward walk early.

use std::collections::HashMap;

use firststep_util::{Idx, IndexVec, Symbol};

use crate::ir::Val;

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
    bindings: HashMap<Symbol, Val>,
    parent: Option<ScopeId>,
}

pub struct Env {
    scopes: IndexVec<ScopeId, Scope>,
    current: Option<ScopeId>,
}

impl Env {
    pub fn new() -> Self {
        Self {
            scopes: IndexVec::new(),
            current: None,
        }
    }

    pub fn push(&mut self) {
        let parent = self.current;
        let id = self.scopes.push(Scope {
            bindings: HashMap::new(),
            parent,
        });
        self.current = Some(id);
    }

    pub fn pop(&mut self) {
        let cur = self.current.expect("pop() without a matching push()");
        self.current = self.scopes[cur].parent;
    }

    /// `Define`: fails if `name` is already bound in the innermost scope.
    pub fn define(&mut self, name: Symbol, v: Val) -> Result<(), ()> {
        let cur = self.current.expect("define() outside a scope");
        let scope = &mut self.scopes[cur];
        if scope.bindings.contains_key(&name) {
            return Err(());
        }
        scope.bindings.insert(name, v);
        Ok(())
    }

    /// Binds a function parameter, overwriting silently on a duplicate
    /// name — mirrors `firststep_interp::Interpreter`'s parameter
    /// binding, which defers the redefinition check to the caller.
    pub fn bind_param(&mut self, name: Symbol, v: Val) {
        let cur = self.current.expect("bind_param() outside a scope");
        self.scopes[cur].bindings.insert(name, v);
    }

    pub fn lookup(&self, name: Symbol) -> Option<Val> {
        let mut id = self.current;
        while let Some(i) = id {
            if let Some(&v) = self.scopes[i].bindings.get(&name) {
                return Some(v);
            }
            id = self.scopes[i].parent;
        }
        None
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
