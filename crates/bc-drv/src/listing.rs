//! `--emit-code`/`--listing` debug dump: a human-readable rendering of the
//! per-function code fragment and per-symbol data definition, the Rust
//! equivalent of `bc.c`'s `cfprint`/`ddprint`.

use b_code::{CodeFragment, CodeNode, Const};
use b_sem::{CodeFragmentId, ObjectType, SymbolTable};
use b_util::{IndexVec, Interner};
use std::fmt::Write as _;

pub fn render(table: &SymbolTable, fragments: &IndexVec<CodeFragmentId, CodeFragment>, interner: &Interner) -> String {
    let mut out = String::new();
    for id in table.global().in_order() {
        let entry = table.entry(*id);
        match entry.object {
            ObjectType::Func => {
                let _ = writeln!(out, "{}:", interner.resolve(entry.name));
                let frag = &fragments[entry.func.as_ref().expect("Func symbol always has FuncData").code];
                render_fragment(&mut out, table, frag, interner);
            }
            ObjectType::Simple | ObjectType::Vector => {
                render_data(&mut out, table, entry, interner);
            }
            ObjectType::Label => {}
        }
    }
    out
}

fn render_fragment(out: &mut String, table: &SymbolTable, frag: &CodeFragment, interner: &Interner) {
    for node in frag.as_slice() {
        match node {
            CodeNode::NamDef(label) => {
                let labpc = table.entry(*label).label.as_ref().and_then(|d| d.labpc).unwrap_or(u32::MAX);
                let _ = writeln!(out, "@{labpc}:");
            }
            CodeNode::Jmp(label) => render_target(out, "JMP", table, *label),
            CodeNode::Bz(label) => render_target(out, "BZ", table, *label),
            CodeNode::Case { disc, target } => {
                let labpc = table.entry(*target).label.as_ref().and_then(|d| d.labpc).unwrap_or(u32::MAX);
                let _ = writeln!(out, "    CASE {disc}: @{labpc}");
            }
            CodeNode::PopN(n) => {
                let _ = writeln!(out, "    POPN {n}");
            }
            CodeNode::DupN(n) => {
                let _ = writeln!(out, "    DUPN {n}");
            }
            CodeNode::Enter(n) => {
                let _ = writeln!(out, "    ENTER {n}");
            }
            CodeNode::Leave(n) => {
                let _ = writeln!(out, "    LEAVE {n}");
            }
            CodeNode::AvInit(n) => {
                let _ = writeln!(out, "    AVINIT {n}");
            }
            CodeNode::PshCon(Const::Int(v)) => {
                let _ = writeln!(out, "    PSHCON {v}");
            }
            CodeNode::PshCon(Const::Str(bytes)) => {
                let _ = writeln!(out, "    PSHCON {:?}", String::from_utf8_lossy(bytes));
            }
            CodeNode::PshSym(sym) => {
                let entry = table.entry(*sym);
                let _ = writeln!(out, "    PSHSYM {} FP[{}]", interner.resolve(entry.name), entry.auto_offset.unwrap_or(0));
            }
            simple => {
                let _ = writeln!(out, "    {}", simple_name(simple));
            }
        }
    }
}

fn render_target(out: &mut String, mnemonic: &str, table: &SymbolTable, label: b_sem::SymbolId) {
    let labpc = table.entry(label).label.as_ref().and_then(|d| d.labpc).unwrap_or(u32::MAX);
    let _ = writeln!(out, "    {mnemonic} @{labpc}");
}

fn simple_name(node: &CodeNode) -> &'static str {
    match node {
        CodeNode::Pop => "POP",
        CodeNode::PopT => "POPT",
        CodeNode::PushT => "PUSHT",
        CodeNode::Dup => "DUP",
        CodeNode::Rot => "ROT",
        CodeNode::Deref => "DEREF",
        CodeNode::Store => "STORE",
        CodeNode::Call => "CALL",
        CodeNode::Ret => "RET",
        CodeNode::Add => "ADD",
        CodeNode::Sub => "SUB",
        CodeNode::Mul => "MUL",
        CodeNode::Div => "DIV",
        CodeNode::Mod => "MOD",
        CodeNode::Shl => "SHL",
        CodeNode::Shr => "SHR",
        CodeNode::Neg => "NEG",
        CodeNode::Not => "NOT",
        CodeNode::And => "AND",
        CodeNode::Or => "OR",
        CodeNode::Eq => "EQ",
        CodeNode::Ne => "NE",
        CodeNode::Lt => "LT",
        CodeNode::Le => "LE",
        CodeNode::Gt => "GT",
        CodeNode::Ge => "GE",
        _ => "?",
    }
}

fn render_data(out: &mut String, table: &SymbolTable, entry: &b_sem::SymEntry, interner: &Interner) {
    let _ = write!(out, "{}", interner.resolve(entry.name));
    if entry.object == ObjectType::Vector {
        let _ = write!(out, "[{}]", entry.vector_size.unwrap_or(0));
    }
    out.push('\n');
    for (i, ival) in entry.inits.iter().enumerate() {
        match ival {
            b_sem::Ival::Int(v) => {
                let _ = writeln!(out, "  [{i}] {v}");
            }
            b_sem::Ival::Str(bytes) => {
                let _ = writeln!(out, "  [{i}] {:?}", String::from_utf8_lossy(bytes));
            }
            b_sem::Ival::Symbol(sym) => {
                let _ = writeln!(out, "  [{i}] {}", interner.resolve(table.entry(*sym).name));
            }
        }
    }
}
