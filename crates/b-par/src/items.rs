use crate::{FuncCtx, Parser};
use b_code::{CodeFragment, CodeNode, Const};
use b_lex::TokenKind;
use b_sem::{Ival, ObjectType, StorageClass, SymbolId};
use b_util::{DiagnosticCode, Span, Symbol};

impl<'a> Parser<'a> {
    /// `definition := name ( '(' funcdef | datadef )`
    pub(crate) fn parse_definition(&mut self) {
        let span = self.span();
        let name = match self.cur.kind.clone() {
            TokenKind::Name(n) => n,
            _ => {
                self.error("name expected", DiagnosticCode::EXPECTED_TOKEN);
                self.advance();
                return;
            }
        };
        self.advance();

        if self.cur.kind == TokenKind::LParen {
            self.advance();
            self.parse_funcdef(name, span);
        } else {
            self.parse_datadef(name, span);
        }
    }

    pub(crate) fn check_duplicate(&mut self, id: SymbolId, span: Span) -> bool {
        if self.table.entry(id).storage != StorageClass::New {
            self.handler
                .build_error(span, "duplicate definition")
                .code(DiagnosticCode::DUPLICATE_DEFINITION)
                .emit(self.handler);
            self.errf = true;
            true
        } else {
            false
        }
    }

    /// `funcdef := params? statement`. The leading `name` and `(` have
    /// already been consumed by `parse_definition`.
    fn parse_funcdef(&mut self, name: Symbol, span: Span) {
        let id = self.table.get_global(name);
        self.check_duplicate(id, span);

        let mut func = FuncCtx {
            frag: CodeFragment::new(),
            avinit: CodeFragment::new(),
            locals: b_sem::Scope::new(),
            next_label: 0,
            switch_stack: Vec::new(),
            next_arg_offset: 0,
            next_auto_offset: -1,
            enter_index: 0,
            ret_label: SymbolId(0),
        };
        func.ret_label = self.mklabel(&mut func);

        self.parse_params(&mut func);

        func.enter_index = func.frag.push(CodeNode::Enter(0));
        self.parse_statement(&mut func);

        // Epilogue: default return value, @ret, unwind, restore, return.
        func.frag.push(CodeNode::PshCon(Const::Int(0)));
        let ret_label = func.ret_label;
        self.define_label(&mut func, ret_label);
        func.frag.push(CodeNode::PopT);
        let leave_index = func.frag.push(CodeNode::Leave(0));
        func.frag.push(CodeNode::PushT);
        func.frag.push(CodeNode::Ret);

        for label in func.locals.in_order() {
            if let Some(data) = self.table.entry(*label).label.as_ref() {
                if data.forward {
                    self.handler
                        .build_error(span, "goto target left undefined")
                        .code(DiagnosticCode::UNDEFINED_LABEL)
                        .emit(self.handler);
                    self.errf = true;
                }
            }
        }

        let auto_count = (-func.next_auto_offset - 1).max(0);
        *func.frag.get_mut(func.enter_index).unwrap() = CodeNode::Enter(auto_count);
        *func.frag.get_mut(leave_index).unwrap() = CodeNode::Leave(auto_count);

        let avinit_nodes = std::mem::take(&mut func.avinit).into_nodes();
        func.frag.splice_after(func.enter_index, avinit_nodes);

        let frag_id = self.fragments.push(func.frag);
        let entry = self.table.entry_mut(id);
        entry.storage = StorageClass::Extern;
        entry.object = ObjectType::Func;
        entry.func = Some(b_sem::FuncData { code: frag_id, locals: func.locals, next_label: func.next_label });
    }

    fn parse_params(&mut self, func: &mut FuncCtx) {
        if self.cur.kind == TokenKind::RParen {
            self.advance();
            return;
        }
        loop {
            match self.cur.kind.clone() {
                TokenKind::Name(p) => {
                    self.advance();
                    let span = self.span();
                    let pid = self.table.get(&mut func.locals, p);
                    self.check_duplicate(pid, span);
                    let entry = self.table.entry_mut(pid);
                    entry.storage = StorageClass::Auto;
                    entry.object = ObjectType::Simple;
                    entry.auto_offset = Some(func.next_arg_offset);
                    func.next_arg_offset += 1;
                }
                _ => {
                    self.error("name expected", DiagnosticCode::EXPECTED_TOKEN);
                    break;
                }
            }
            if self.cur.kind == TokenKind::Comma {
                self.advance();
                continue;
            }
            break;
        }
        self.expect(TokenKind::RParen, ")");
    }

    /// `datadef := ( '[' int-const? ']' )? init-list? ';'`
    fn parse_datadef(&mut self, name: Symbol, span: Span) {
        let id = self.table.get_global(name);
        self.check_duplicate(id, span);

        let mut vector_size = None;
        if self.cur.kind == TokenKind::LBracket {
            self.advance();
            if self.cur.kind != TokenKind::RBracket {
                vector_size = Some(self.expect_int_const() as u32);
            }
            self.expect(TokenKind::RBracket, "]");
        }

        let mut inits = Vec::new();
        if self.cur.kind != TokenKind::Semi {
            loop {
                inits.push(self.parse_init());
                if self.cur.kind == TokenKind::Comma {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.expect(TokenKind::Semi, ";");

        let entry = self.table.entry_mut(id);
        entry.storage = StorageClass::Extern;
        entry.object = if vector_size.is_some() || inits.len() > 1 { ObjectType::Vector } else { ObjectType::Simple };
        entry.vector_size = vector_size.or(if inits.len() > 1 { Some(inits.len() as u32) } else { None });
        entry.inits = inits;
    }

    fn parse_init(&mut self) -> Ival {
        match self.cur.kind.clone() {
            TokenKind::Name(n) => {
                self.advance();
                let id = self.table.get_global(n);
                Ival::Symbol(id)
            }
            TokenKind::IntConst(v) => {
                self.advance();
                Ival::Int(v)
            }
            TokenKind::StrConst(bytes) => {
                self.advance();
                Ival::Str(bytes)
            }
            _ => {
                self.error("integer constant expected", DiagnosticCode::INTEGER_CONSTANT_EXPECTED);
                Ival::Int(0)
            }
        }
    }
}
