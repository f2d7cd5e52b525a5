//! Single-pass recursive-descent parser and code generator for `b`.
//!
//! The parser threads a pointer to the function currently being parsed
//! (its [`FuncCtx`]) through every statement and expression method, and
//! every expression-parsing method returns a [`ValueCategory`] alongside
//! emitting code into that function's fragment (`spec.md` §4.3).

mod expr;
mod items;
mod stmt;
mod switch;
mod tokens;
mod value;

pub use value::ValueCategory;

use b_code::{CodeFragment, CodeNode};
use b_lex::{Token, TokenKind};
use b_sem::{CodeFragmentId, Scope, StorageClass, SymbolId, SymbolTable};
use b_util::{DiagnosticCode, FileId, Handler, IndexVec, Interner, Span};
use switch::SwitchFrame;
use tokens::TokenStream;

/// Maximum argument count a call may pass (`spec.md` §7).
pub const MAX_ARGS: usize = 64;

/// State local to the function currently being parsed. Reset each time
/// `parse_funcdef` starts a new one.
pub struct FuncCtx {
    pub frag: CodeFragment,
    pub avinit: CodeFragment,
    pub locals: Scope,
    pub next_label: u32,
    pub switch_stack: Vec<SwitchFrame>,
    pub next_arg_offset: i32,
    pub next_auto_offset: i32,
    pub enter_index: usize,
    pub ret_label: SymbolId,
}

/// Everything the whole program's worth of parsing produces: the symbol
/// table (with every global and every function's locals hanging off it)
/// and the arena of code fragments functions point into.
pub struct Program {
    pub table: SymbolTable,
    pub fragments: IndexVec<CodeFragmentId, CodeFragment>,
}

pub struct Parser<'a> {
    tokens: TokenStream<'a>,
    cur: Token,
    interner: &'a mut Interner,
    handler: &'a Handler,
    table: SymbolTable,
    fragments: IndexVec<CodeFragmentId, CodeFragment>,
    /// `spec.md` §7's "errf": once set, parsing still runs to collect more
    /// diagnostics but no intermediate file should be written at the end.
    errf: bool,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, file_id: FileId, interner: &'a mut Interner, handler: &'a Handler) -> Self {
        let mut tokens = TokenStream::new(source, file_id);
        let cur = tokens.next(interner, handler);
        Self { tokens, cur, interner, handler, table: SymbolTable::new(), fragments: IndexVec::new(), errf: false }
    }

    pub fn has_failed(&self) -> bool {
        self.errf || self.handler.has_errors()
    }

    /// Consumes the whole token stream, building every global definition.
    /// Returns the finished program regardless of whether diagnostics were
    /// raised; callers check [`Self::has_failed`] before asking the writer
    /// to serialize it.
    pub fn parse_program(mut self) -> Program {
        while !matches!(self.cur.kind, TokenKind::Eof) {
            self.parse_definition();
        }
        self.check_undefined_globals();
        Program { table: self.table, fragments: self.fragments }
    }

    /// A name referenced but never given a real definition stays `New`
    /// forever (`spec.md` §3 invariant (b)); this is the only point where
    /// that's reported, since a use earlier in the file may yet be
    /// satisfied by a definition later in it.
    fn check_undefined_globals(&mut self) {
        let undefined: Vec<SymbolId> = self
            .table
            .global()
            .in_order()
            .iter()
            .copied()
            .filter(|id| self.table.entry(*id).storage == StorageClass::New)
            .collect();
        for id in undefined {
            let name = self.interner.resolve(self.table.entry(id).name).to_string();
            self.errf = true;
            self.handler
                .build_error(Span::DUMMY, format!("undefined name `{name}`"))
                .code(DiagnosticCode::UNDEFINED_NAME)
                .emit(self.handler);
        }
    }

    fn advance(&mut self) -> Token {
        let next = self.tokens.next(self.interner, self.handler);
        std::mem::replace(&mut self.cur, next)
    }

    fn unread(&mut self, tok: Token) {
        self.tokens.unread(tok);
    }

    fn span(&self) -> Span {
        self.cur.span
    }

    fn error(&mut self, message: impl Into<String>, code: DiagnosticCode) {
        self.errf = true;
        self.handler.build_error(self.span(), message).code(code).emit(self.handler);
    }

    /// Consumes the current token if it matches `kind`; otherwise reports
    /// `what expected` and leaves the token stream where it is (so the
    /// caller's own resync, usually "consume one token and continue",
    /// still makes progress).
    fn expect(&mut self, kind: TokenKind, what: &str) -> bool {
        if self.cur.kind == kind {
            self.advance();
            true
        } else {
            self.error(format!("'{what}' expected"), DiagnosticCode::EXPECTED_TOKEN);
            false
        }
    }

    fn expect_int_const(&mut self) -> i64 {
        if let TokenKind::IntConst(v) = self.cur.kind {
            self.advance();
            v
        } else {
            self.error("integer constant expected", DiagnosticCode::INTEGER_CONSTANT_EXPECTED);
            0
        }
    }

    fn mklabel(&mut self, func: &mut FuncCtx) -> SymbolId {
        let n = func.next_label;
        func.next_label += 1;
        self.table.mklabel(&mut func.locals, n, self.interner)
    }

    /// Emits a `NAMDEF` for `label` at the current end of `func.frag` and
    /// resolves any outstanding forward reference. A label whose `def_node`
    /// is already set has been defined once before — a duplicate, since
    /// user labels only reach here once (via a `goto` or its own statement)
    /// before that.
    fn define_label(&mut self, func: &mut FuncCtx, label: SymbolId) {
        if self.table.entry(label).label.as_ref().is_some_and(|d| d.def_node.is_some()) {
            self.error("duplicate definition", DiagnosticCode::DUPLICATE_DEFINITION);
        }
        let idx = func.frag.push(CodeNode::NamDef(label));
        let entry = self.table.entry_mut(label);
        if let Some(data) = entry.label.as_mut() {
            data.forward = false;
            data.def_node = Some(idx as u32);
        }
    }
}
