use crate::entry::{LabelData, SymEntry, SymbolId};
use crate::scope::Scope;
use crate::storage::{ObjectType, StorageClass};
use b_util::{IndexVec, Symbol};

/// Owns every symbol allocated during one compilation. `spec.md` §4.2
/// describes exactly two live scopes at a time: the process-wide global
/// scope and, while inside a function body, that function's local scope.
pub struct SymbolTable {
    arena: IndexVec<SymbolId, SymEntry>,
    global: Scope,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { arena: IndexVec::new(), global: Scope::new() }
    }

    pub fn global(&self) -> &Scope {
        &self.global
    }

    pub fn entry(&self, id: SymbolId) -> &SymEntry {
        &self.arena[id]
    }

    pub fn entry_mut(&mut self, id: SymbolId) -> &mut SymEntry {
        &mut self.arena[id]
    }

    /// `get(scope, name)`: returns the existing entry for `name` in `scope`,
    /// or allocates a fresh `New` one and appends it.
    pub fn get(&mut self, scope: &mut Scope, name: Symbol) -> SymbolId {
        if let Some(id) = scope.lookup(name) {
            return id;
        }
        let id = self.arena.push(SymEntry::new(name));
        scope.insert(name, id);
        id
    }

    /// Same as [`Self::get`] but against the global scope specifically;
    /// convenient since `self.global` can't be borrowed mutably alongside
    /// `self.arena` through a plain method call on `Scope`.
    pub fn get_global(&mut self, name: Symbol) -> SymbolId {
        if let Some(id) = self.global.lookup(name) {
            return id;
        }
        let id = self.arena.push(SymEntry::new(name));
        self.global.insert(name, id);
        id
    }

    /// `find(name)`: local scope first, then global. Returns `None` if
    /// neither has it.
    pub fn find(&self, local: Option<&Scope>, name: Symbol) -> Option<SymbolId> {
        local.and_then(|l| l.lookup(name)).or_else(|| self.global.lookup(name))
    }

    /// `mklabel()`: allocates a fresh, uniquely-numbered `Label` symbol
    /// named `@N` in `local`, where `N` is `next_label`'s current value
    /// (caller owns incrementing it, since it lives on the enclosing
    /// function's `FuncData`).
    pub fn mklabel(&mut self, local: &mut Scope, label_num: u32, interner: &mut b_util::Interner) -> SymbolId {
        let name = interner.intern(&format!("@{label_num}"));
        let mut entry = SymEntry::new(name);
        entry.storage = StorageClass::Internal;
        entry.object = ObjectType::Label;
        // `labpc` is assigned here rather than at definition time: the name
        // counter and the JMP/BZ/CASE target counter are the same sequence
        // (spec.md §4.3/§4.4), so there's no separate numbering pass to run.
        entry.label = Some(LabelData { labpc: Some(label_num), ..LabelData::default() });
        let id = self.arena.push(entry);
        local.insert(name, id);
        id
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use b_util::Interner;

    #[test]
    fn get_creates_once_then_reuses() {
        let mut table = SymbolTable::new();
        let mut interner = Interner::new();
        let mut scope = Scope::new();
        let name = interner.intern("x");
        let a = table.get(&mut scope, name);
        let b = table.get(&mut scope, name);
        assert_eq!(a, b);
        assert_eq!(table.entry(a).storage, StorageClass::New);
    }

    #[test]
    fn find_checks_local_before_global() {
        let mut table = SymbolTable::new();
        let mut interner = Interner::new();
        let name = interner.intern("x");
        let global_id = table.get_global(name);
        let mut local = Scope::new();
        let local_id = table.get(&mut local, name);
        assert_ne!(global_id, local_id);
        assert_eq!(table.find(Some(&local), name), Some(local_id));
        assert_eq!(table.find(None, name), Some(global_id));
    }

    #[test]
    fn mklabel_names_are_distinct_and_monotonic() {
        let mut table = SymbolTable::new();
        let mut interner = Interner::new();
        let mut local = Scope::new();
        let l0 = table.mklabel(&mut local, 0, &mut interner);
        let l1 = table.mklabel(&mut local, 1, &mut interner);
        assert_ne!(l0, l1);
        assert_eq!(table.entry(l0).object, ObjectType::Label);
        assert_eq!(interner.resolve(table.entry(l0).name), "@0");
        assert_eq!(interner.resolve(table.entry(l1).name), "@1");
    }
}
