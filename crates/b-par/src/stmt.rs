use crate::switch::SwitchFrame;
use crate::{FuncCtx, Parser};
use b_code::CodeNode;
use b_lex::TokenKind;
use b_sem::{LabelData, ObjectType, StorageClass};
use b_util::DiagnosticCode;

impl<'a> Parser<'a> {
    /// `statement := ';' | '{' ... '}' | 'auto' ... | 'extrn' ... | 'case' ...
    ///             | 'if' ... | 'while' ... | 'switch' ... | 'goto' ...
    ///             | 'return' ... | name ':' statement | expr ';'`
    pub(crate) fn parse_statement(&mut self, func: &mut FuncCtx) {
        match self.cur.kind.clone() {
            TokenKind::Semi => {
                self.advance();
            }
            TokenKind::LBrace => self.parse_block(func),
            TokenKind::KwAuto => self.parse_auto(func),
            TokenKind::KwExtrn => self.parse_extrn(func),
            TokenKind::KwCase => self.parse_case(func),
            TokenKind::KwIf => self.parse_if(func),
            TokenKind::KwWhile => self.parse_while(func),
            TokenKind::KwSwitch => self.parse_switch(func),
            TokenKind::KwGoto => self.parse_goto(func),
            TokenKind::KwReturn => self.parse_return(func),
            TokenKind::Name(name) => self.parse_name_led_statement(func, name),
            _ => {
                let cat = self.parse_expr(func);
                func.frag.push(CodeNode::Pop);
                let _ = cat;
                self.expect(TokenKind::Semi, ";");
            }
        }
    }

    fn parse_block(&mut self, func: &mut FuncCtx) {
        self.advance();
        while self.cur.kind != TokenKind::RBrace && self.cur.kind != TokenKind::Eof {
            self.parse_statement(func);
        }
        self.expect(TokenKind::RBrace, "}");
    }

    /// Disambiguates `name ':' statement` (a label) from an
    /// expression-statement starting with `name`, using the two-slot
    /// pushback buffer — the parser's only use of lookahead beyond one
    /// token (`spec.md` §4.3).
    fn parse_name_led_statement(&mut self, func: &mut FuncCtx, name: b_util::Symbol) {
        let name_tok = self.advance();
        if self.cur.kind == TokenKind::Colon {
            self.advance();
            let label = self.get_or_make_label(func, name);
            self.define_label(func, label);
            self.parse_statement(func);
            return;
        }
        // Not a label: restore `name_tok` as the current token and queue
        // the one we peeked past it, so `parse_expr` sees exactly the
        // token sequence it would have if no lookahead had happened.
        let peeked = std::mem::replace(&mut self.cur, name_tok);
        self.unread(peeked);
        let cat = self.parse_expr(func);
        func.frag.push(CodeNode::Pop);
        let _ = cat;
        self.expect(TokenKind::Semi, ";");
    }

    /// `auto-decl := name int-const?`. Parameters already occupy offsets
    /// `0, 1, …`; locals are assigned descending from `-1`. A size-`S`
    /// vector reserves `S` content slots below the current offset plus one
    /// more slot for its own pointer, which is what the name itself
    /// resolves to and what `AVINIT` initialises (`spec.md` §8 scenario 5:
    /// `auto x 3;` puts `x` at `-(1+3)`).
    fn parse_auto(&mut self, func: &mut FuncCtx) {
        self.advance();
        loop {
            let span = self.span();
            let name = match self.cur.kind.clone() {
                TokenKind::Name(n) => n,
                _ => {
                    self.error("name expected", DiagnosticCode::EXPECTED_TOKEN);
                    break;
                }
            };
            self.advance();

            let size = if let TokenKind::IntConst(v) = self.cur.kind {
                self.advance();
                Some(v as u32)
            } else {
                None
            };

            let id = self.table.get(&mut func.locals, name);
            self.check_duplicate(id, span);

            let offset = match size {
                None => {
                    let offset = func.next_auto_offset;
                    func.next_auto_offset -= 1;
                    offset
                }
                Some(s) => {
                    func.next_auto_offset -= s as i32;
                    let offset = func.next_auto_offset - 1;
                    func.next_auto_offset = offset;
                    func.avinit.push(CodeNode::AvInit(offset));
                    offset
                }
            };

            let entry = self.table.entry_mut(id);
            entry.storage = StorageClass::Auto;
            entry.object = if size.is_some() { ObjectType::Vector } else { ObjectType::Simple };
            entry.vector_size = size;
            entry.auto_offset = Some(offset);

            if self.cur.kind == TokenKind::Comma {
                self.advance();
                continue;
            }
            break;
        }
        self.expect(TokenKind::Semi, ";");
    }

    /// `extrn name (',' name)* ';'`. An `extrn` name is not a fresh symbol:
    /// it aliases the already-existing (or not-yet-seen) global of that
    /// name directly into the local scope, so looking it up later finds
    /// the same entry the matching top-level definition fills in.
    fn parse_extrn(&mut self, func: &mut FuncCtx) {
        self.advance();
        loop {
            let span = self.span();
            let name = match self.cur.kind.clone() {
                TokenKind::Name(n) => n,
                _ => {
                    self.error("name expected", DiagnosticCode::EXPECTED_TOKEN);
                    break;
                }
            };
            self.advance();

            if func.locals.lookup(name).is_some() {
                self.handler
                    .build_error(span, "duplicate definition")
                    .code(DiagnosticCode::DUPLICATE_DEFINITION)
                    .emit(self.handler);
                self.errf = true;
            } else {
                let id = self.table.get_global(name);
                func.locals.insert(name, id);
            }

            if self.cur.kind == TokenKind::Comma {
                self.advance();
                continue;
            }
            break;
        }
        self.expect(TokenKind::Semi, ";");
    }

    /// `case int-const ':'`. Appends `(K, label)` to the innermost switch
    /// frame and defines the label right here, in place within the body
    /// (`spec.md` §4.3's switch lowering).
    fn parse_case(&mut self, func: &mut FuncCtx) {
        let span = self.span();
        self.advance();
        let disc = self.expect_int_const();
        self.expect(TokenKind::Colon, ":");

        if func.switch_stack.is_empty() {
            self.handler
                .build_error(span, "case outside of switch")
                .code(DiagnosticCode::CASE_OUTSIDE_SWITCH)
                .emit(self.handler);
            self.errf = true;
            return;
        }

        let label = self.mklabel(func);
        self.define_label(func, label);
        func.switch_stack.last_mut().unwrap().cases.push((disc, label));
    }

    /// `if '(' expr ')' statement ('else' statement)?`
    fn parse_if(&mut self, func: &mut FuncCtx) {
        self.advance();
        self.expect(TokenKind::LParen, "(");
        let cat = self.parse_expr(func);
        self.ensure_rvalue(func, cat);
        self.expect(TokenKind::RParen, ")");

        let else_label = self.mklabel(func);
        func.frag.push(CodeNode::Bz(else_label));
        self.parse_statement(func);

        if self.cur.kind == TokenKind::KwElse {
            self.advance();
            let done_label = self.mklabel(func);
            func.frag.push(CodeNode::Jmp(done_label));
            self.define_label(func, else_label);
            self.parse_statement(func);
            self.define_label(func, done_label);
        } else {
            self.define_label(func, else_label);
        }
    }

    /// `while '(' expr ')' statement`
    fn parse_while(&mut self, func: &mut FuncCtx) {
        self.advance();
        self.expect(TokenKind::LParen, "(");
        let top_label = self.mklabel(func);
        self.define_label(func, top_label);
        let cat = self.parse_expr(func);
        self.ensure_rvalue(func, cat);
        self.expect(TokenKind::RParen, ")");

        let bot_label = self.mklabel(func);
        func.frag.push(CodeNode::Bz(bot_label));
        self.parse_statement(func);
        func.frag.push(CodeNode::Jmp(top_label));
        self.define_label(func, bot_label);
    }

    /// `switch expr statement`. The discriminant is evaluated once; every
    /// `case` encountered while parsing the body records a comparison that
    /// gets spliced in right after the discriminant, followed by a
    /// fall-through `POP`/`JMP @nomatch` (`spec.md` §4.3).
    fn parse_switch(&mut self, func: &mut FuncCtx) {
        self.advance();
        let cat = self.parse_expr(func);
        self.ensure_rvalue(func, cat);
        let eval_position = func.frag.position();
        func.switch_stack.push(SwitchFrame::new(eval_position));

        self.parse_statement(func);

        let frame = func.switch_stack.pop().expect("pushed above");
        let nomatch = self.mklabel(func);
        self.define_label(func, nomatch);

        let mut table = Vec::with_capacity(frame.cases.len() + 2);
        for (disc, target) in frame.cases {
            table.push(CodeNode::Case { disc, target });
        }
        table.push(CodeNode::Pop);
        table.push(CodeNode::Jmp(nomatch));
        func.frag.splice_after(eval_position - 1, table);
    }

    /// `goto name ';'`. A name not yet declared anywhere in the function
    /// becomes an `Internal`/`Label` symbol with its forward flag set;
    /// `define_label` clears that flag once the target is actually defined.
    fn parse_goto(&mut self, func: &mut FuncCtx) {
        self.advance();
        let name = match self.cur.kind.clone() {
            TokenKind::Name(n) => n,
            _ => {
                self.error("name expected", DiagnosticCode::EXPECTED_TOKEN);
                return;
            }
        };
        self.advance();
        let label = self.get_or_make_label(func, name);
        func.frag.push(CodeNode::Jmp(label));
        self.expect(TokenKind::Semi, ";");
    }

    /// Finds `name` in the local scope, promoting a fresh or `New` entry to
    /// a forward-referenced label (the only way a `goto`/label-statement
    /// name can be introduced).
    fn get_or_make_label(&mut self, func: &mut FuncCtx, name: b_util::Symbol) -> b_sem::SymbolId {
        let id = self.table.get(&mut func.locals, name);
        if self.table.entry(id).storage == StorageClass::New {
            let labpc = func.next_label;
            func.next_label += 1;
            let entry = self.table.entry_mut(id);
            entry.storage = StorageClass::Internal;
            entry.object = ObjectType::Label;
            entry.label = Some(LabelData { forward: true, labpc: Some(labpc), ..LabelData::default() });
        }
        id
    }

    /// `return ('(' expr ')')? ';'`
    fn parse_return(&mut self, func: &mut FuncCtx) {
        self.advance();
        if self.cur.kind == TokenKind::LParen {
            self.advance();
            let cat = self.parse_expr(func);
            self.ensure_rvalue(func, cat);
            self.expect(TokenKind::RParen, ")");
        } else {
            func.frag.push(CodeNode::PshCon(b_code::Const::Int(0)));
        }
        let ret_label = func.ret_label;
        func.frag.push(CodeNode::Jmp(ret_label));
        self.expect(TokenKind::Semi, ";");
    }
}
