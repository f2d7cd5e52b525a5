use super::Symbol;
use rustc_hash::FxHashMap;

/// Owned string interner. One per compilation (lives on the driver's
/// `Session`), not a process-wide singleton.
#[derive(Default)]
pub struct Interner {
    map: FxHashMap<Box<str>, Symbol>,
    strings: Vec<Box<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self { map: FxHashMap::default(), strings: Vec::new() }
    }

    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }
        let idx = self.strings.len() as u32;
        let boxed: Box<str> = s.into();
        self.strings.push(boxed.clone());
        let sym = Symbol(idx);
        self.map.insert(boxed, sym);
        sym
    }

    pub fn resolve(&self, symbol: Symbol) -> &str {
        &self.strings[symbol.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_interns_to_same_symbol() {
        let mut interner = Interner::new();
        let a = interner.intern("count");
        let b = interner.intern("count");
        assert_eq!(a, b);
    }

    #[test]
    fn different_strings_get_different_symbols() {
        let mut interner = Interner::new();
        let a = interner.intern("count");
        let b = interner.intern("total");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_roundtrips() {
        let mut interner = Interner::new();
        let sym = interner.intern("printf");
        assert_eq!(interner.resolve(sym), "printf");
    }
}
