use crate::value::binop_node;
use crate::{FuncCtx, Parser, ValueCategory, MAX_ARGS};
use b_code::{CodeNode, Const};
use b_lex::{BinOp, TokenKind};
use b_util::DiagnosticCode;

impl<'a> Parser<'a> {
    /// `expr := assign` — the grammar defines `expr` as exactly `assign`, so
    /// this is the one entry point every caller (statements, call
    /// arguments, index brackets, conditions) uses.
    pub(crate) fn parse_expr(&mut self, func: &mut FuncCtx) -> ValueCategory {
        self.parse_assign(func)
    }

    /// Emits a `DEREF` if `cat` is `Lvalue`; the operand is `Rvalue` either
    /// way afterwards (`spec.md` §4.3's DEREF-insertion rule).
    pub(crate) fn ensure_rvalue(&mut self, func: &mut FuncCtx, cat: ValueCategory) -> ValueCategory {
        if cat == ValueCategory::Lvalue {
            func.frag.push(CodeNode::Deref);
        }
        ValueCategory::Rvalue
    }

    fn require_lvalue(&mut self, cat: ValueCategory) {
        if cat != ValueCategory::Lvalue {
            self.error("lvalue expected", DiagnosticCode::LVALUE_EXPECTED);
        }
    }

    /// The shared tail of every store: `[addr, val] -> [val]`, with
    /// `mem[addr] = val` as a side effect. Plain assignment, compound
    /// assignment, and prefix `++`/`--` all end this way.
    fn finish_store(&mut self, func: &mut FuncCtx) {
        func.frag.push(CodeNode::Dup);
        func.frag.push(CodeNode::Rot);
        func.frag.push(CodeNode::Store);
    }

    /// `assign := cond (assign-op assign)?`, right-associative, every
    /// assignment operator at the same precedence (`spec.md` §4.3).
    fn parse_assign(&mut self, func: &mut FuncCtx) -> ValueCategory {
        let cat = self.parse_cond(func);
        match self.cur.kind.clone() {
            TokenKind::Assign => {
                self.advance();
                self.require_lvalue(cat);
                let rhs_cat = self.parse_assign(func);
                self.ensure_rvalue(func, rhs_cat);
                self.finish_store(func);
                ValueCategory::Rvalue
            }
            TokenKind::CompoundAssign(op) => {
                self.advance();
                self.require_lvalue(cat);
                func.frag.push(CodeNode::Dup);
                func.frag.push(CodeNode::Deref);
                let rhs_cat = self.parse_assign(func);
                self.ensure_rvalue(func, rhs_cat);
                func.frag.push(binop_node(op));
                self.finish_store(func);
                ValueCategory::Rvalue
            }
            _ => cat,
        }
    }

    /// `cond := or ('?' cond ':' cond)?`
    fn parse_cond(&mut self, func: &mut FuncCtx) -> ValueCategory {
        let cat = self.parse_or(func);
        if self.cur.kind != TokenKind::Question {
            return cat;
        }
        self.advance();
        self.ensure_rvalue(func, cat);
        let else_label = self.mklabel(func);
        func.frag.push(CodeNode::Bz(else_label));
        let then_cat = self.parse_cond(func);
        self.ensure_rvalue(func, then_cat);
        let done_label = self.mklabel(func);
        func.frag.push(CodeNode::Jmp(done_label));
        self.define_label(func, else_label);
        self.expect(TokenKind::Colon, ":");
        let else_cat = self.parse_cond(func);
        self.ensure_rvalue(func, else_cat);
        self.define_label(func, done_label);
        ValueCategory::Rvalue
    }

    /// Shared shape for every left-associative binary-operator precedence
    /// level: parse one operand at the next-tighter level, then fold in
    /// `op rhs` pairs for as long as `cur` names an operator in `ops`.
    fn parse_binary_level(
        &mut self,
        func: &mut FuncCtx,
        ops: &[BinOp],
        next: fn(&mut Self, &mut FuncCtx) -> ValueCategory,
    ) -> ValueCategory {
        let mut cat = next(self, func);
        loop {
            let op = match self.cur.kind {
                TokenKind::Binary(op) if ops.contains(&op) => op,
                _ => break,
            };
            self.advance();
            self.ensure_rvalue(func, cat);
            let rhs_cat = next(self, func);
            self.ensure_rvalue(func, rhs_cat);
            func.frag.push(binop_node(op));
            cat = ValueCategory::Rvalue;
        }
        cat
    }

    fn parse_or(&mut self, func: &mut FuncCtx) -> ValueCategory {
        self.parse_binary_level(func, &[BinOp::Or], Self::parse_and)
    }

    fn parse_and(&mut self, func: &mut FuncCtx) -> ValueCategory {
        self.parse_binary_level(func, &[BinOp::And], Self::parse_eq)
    }

    fn parse_eq(&mut self, func: &mut FuncCtx) -> ValueCategory {
        self.parse_binary_level(func, &[BinOp::Eq, BinOp::Ne], Self::parse_rel)
    }

    fn parse_rel(&mut self, func: &mut FuncCtx) -> ValueCategory {
        self.parse_binary_level(func, &[BinOp::Lt, BinOp::Le, BinOp::Gt, BinOp::Ge], Self::parse_shift)
    }

    fn parse_shift(&mut self, func: &mut FuncCtx) -> ValueCategory {
        self.parse_binary_level(func, &[BinOp::Shl, BinOp::Shr], Self::parse_add)
    }

    fn parse_add(&mut self, func: &mut FuncCtx) -> ValueCategory {
        self.parse_binary_level(func, &[BinOp::Add, BinOp::Sub], Self::parse_mul)
    }

    fn parse_mul(&mut self, func: &mut FuncCtx) -> ValueCategory {
        self.parse_binary_level(func, &[BinOp::Mul, BinOp::Div, BinOp::Mod], Self::parse_unary)
    }

    /// `unary := ('*' | '&' | '-' | '!' | '++' | '--') unary | primary`.
    /// `*` and `&` share token tags with `Mul`/`And` (`spec.md` §9); only
    /// grammatical position — here, at the start of a unary — tells them
    /// apart from the binary operators of the same spelling.
    fn parse_unary(&mut self, func: &mut FuncCtx) -> ValueCategory {
        match self.cur.kind.clone() {
            TokenKind::Binary(BinOp::Mul) => {
                self.advance();
                let cat = self.parse_unary(func);
                self.ensure_rvalue(func, cat);
                ValueCategory::Lvalue
            }
            TokenKind::Binary(BinOp::And) => {
                self.advance();
                let cat = self.parse_unary(func);
                self.require_lvalue(cat);
                ValueCategory::Rvalue
            }
            TokenKind::Binary(BinOp::Sub) => {
                self.advance();
                let cat = self.parse_unary(func);
                self.ensure_rvalue(func, cat);
                func.frag.push(CodeNode::Neg);
                ValueCategory::Rvalue
            }
            TokenKind::Bang => {
                self.advance();
                let cat = self.parse_unary(func);
                self.ensure_rvalue(func, cat);
                func.frag.push(CodeNode::Not);
                ValueCategory::Rvalue
            }
            TokenKind::PlusPlus => self.parse_prefix_incdec(func, true),
            TokenKind::MinusMinus => self.parse_prefix_incdec(func, false),
            _ => self.parse_postfix(func),
        }
    }

    fn parse_prefix_incdec(&mut self, func: &mut FuncCtx, is_inc: bool) -> ValueCategory {
        self.advance();
        let cat = self.parse_unary(func);
        self.require_lvalue(cat);
        func.frag.push(CodeNode::Dup);
        func.frag.push(CodeNode::Deref);
        func.frag.push(CodeNode::PshCon(Const::Int(1)));
        func.frag.push(if is_inc { CodeNode::Add } else { CodeNode::Sub });
        self.finish_store(func);
        ValueCategory::Rvalue
    }

    /// `primary postfix*`, with `postfix := '(' arg-list? ')' | '[' expr ']' | '++' | '--'`.
    fn parse_postfix(&mut self, func: &mut FuncCtx) -> ValueCategory {
        let mut cat = self.parse_primary(func);
        loop {
            match self.cur.kind {
                TokenKind::LParen => {
                    self.advance();
                    cat = self.parse_call(func, cat);
                }
                TokenKind::LBracket => {
                    self.advance();
                    cat = self.parse_index(func, cat);
                }
                TokenKind::PlusPlus => {
                    self.advance();
                    cat = self.parse_postfix_incdec(func, cat, true);
                }
                TokenKind::MinusMinus => {
                    self.advance();
                    cat = self.parse_postfix_incdec(func, cat, false);
                }
                _ => break,
            }
        }
        cat
    }

    fn parse_postfix_incdec(&mut self, func: &mut FuncCtx, base_cat: ValueCategory, is_inc: bool) -> ValueCategory {
        self.require_lvalue(base_cat);
        func.frag.push(CodeNode::Dup);
        func.frag.push(CodeNode::Deref);
        func.frag.push(CodeNode::Dup);
        func.frag.push(CodeNode::Rot);
        func.frag.push(CodeNode::PshCon(Const::Int(1)));
        func.frag.push(if is_inc { CodeNode::Add } else { CodeNode::Sub });
        func.frag.push(CodeNode::Store);
        ValueCategory::Rvalue
    }

    /// Subscription dereferences the base to obtain its pointer value (a
    /// no-op if the base is already an `Rvalue` pointer), adds the index,
    /// and the result is tagged `Lvalue` — the sum is itself an address,
    /// with no opcode needed to say so (`spec.md` §4.3).
    fn parse_index(&mut self, func: &mut FuncCtx, base_cat: ValueCategory) -> ValueCategory {
        self.ensure_rvalue(func, base_cat);
        let idx_cat = self.parse_expr(func);
        self.ensure_rvalue(func, idx_cat);
        self.expect(TokenKind::RBracket, "]");
        func.frag.push(CodeNode::Add);
        ValueCategory::Lvalue
    }

    /// Call lowering per `spec.md` §4.3: `f` is already on the stack (the
    /// caller parsed it as the postfix base); args are pushed left to
    /// right, `f` is copied back to the top with `DUPN`, dereferenced if it
    /// was an `Lvalue`, then `CALL`/`POPT`/`POPN`/`PUSHT` unwind the frame.
    fn parse_call(&mut self, func: &mut FuncCtx, f_cat: ValueCategory) -> ValueCategory {
        let mut n: usize = 0;
        if self.cur.kind != TokenKind::RParen {
            loop {
                let arg_cat = self.parse_assign(func);
                self.ensure_rvalue(func, arg_cat);
                n += 1;
                if self.cur.kind == TokenKind::Comma {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.expect(TokenKind::RParen, ")");
        if n > MAX_ARGS {
            self.error("too many arguments", DiagnosticCode::TOO_MANY_ARGUMENTS);
        }

        func.frag.push(CodeNode::DupN(n as i32));
        if f_cat == ValueCategory::Lvalue {
            func.frag.push(CodeNode::Deref);
        }
        func.frag.push(CodeNode::Call);
        func.frag.push(CodeNode::PopT);
        func.frag.push(CodeNode::PopN(n as i32 + 1));
        func.frag.push(CodeNode::PushT);
        ValueCategory::Rvalue
    }

    /// `primary := name | int-const | str-const | '(' expr ')'`. A bare name
    /// resolves in the local scope first; anything not already declared
    /// there (or never seen before at all) is a global reference — this is
    /// what lets a function call a global defined later in the same file
    /// without an explicit forward declaration. Names still `New` when the
    /// whole program has been parsed are reported as undefined then.
    fn parse_primary(&mut self, func: &mut FuncCtx) -> ValueCategory {
        match self.cur.kind.clone() {
            TokenKind::Name(name) => {
                self.advance();
                let id = match func.locals.lookup(name) {
                    Some(id) => id,
                    None => self.table.get_global(name),
                };
                func.frag.push(CodeNode::PshSym(id));
                ValueCategory::Lvalue
            }
            TokenKind::IntConst(v) => {
                self.advance();
                func.frag.push(CodeNode::PshCon(Const::Int(v)));
                ValueCategory::Rvalue
            }
            TokenKind::StrConst(bytes) => {
                self.advance();
                func.frag.push(CodeNode::PshCon(Const::Str(bytes)));
                ValueCategory::Rvalue
            }
            TokenKind::LParen => {
                self.advance();
                let cat = self.parse_expr(func);
                self.expect(TokenKind::RParen, ")");
                cat
            }
            _ => {
                self.error("expression expected", DiagnosticCode::EXPECTED_TOKEN);
                func.frag.push(CodeNode::PshCon(Const::Int(0)));
                ValueCategory::Rvalue
            }
        }
    }
}
