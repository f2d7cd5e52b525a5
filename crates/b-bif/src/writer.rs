use crate::error::WriteError;
use crate::opcode::*;
use b_code::{CodeFragment, CodeNode, Const, StringPool};
use b_sem::{CodeFragmentId, Ival, ObjectType, StorageClass, SymbolId, SymbolTable};
use b_util::{IndexVec, Interner};
use rustc_hash::FxHashMap;
use std::io::Write;

/// Serializes a fully-parsed program into the wire format (`spec.md` §6).
/// Callers are expected to have already checked `Parser::has_failed` —
/// this function assumes the table holds no symbol still `New` and no
/// function still holds a forward-referenced label.
pub fn write_program<W: Write>(
    table: &SymbolTable,
    fragments: &IndexVec<CodeFragmentId, CodeFragment>,
    interner: &Interner,
    out: &mut W,
) -> Result<(), WriteError> {
    let mut buf = Vec::new();
    let mut strings = StringPool::new();

    write_u32(&mut buf, MAGIC);
    write_data_section(&mut buf, table, interner, &mut strings)?;
    write_code_section(&mut buf, table, fragments, interner, &mut strings)?;
    write_string_section(&mut buf, &strings);

    out.write_all(&buf)?;
    Ok(())
}

fn write_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn write_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

/// `name := length(byte) bytes{length}`, length ≤ 8. The lexer already
/// rejects over-long identifiers (`spec.md` §7's "name too long"), so a
/// violation here means a symbol was constructed outside normal parsing.
fn write_name(buf: &mut Vec<u8>, name: &str) -> Result<(), WriteError> {
    let bytes = name.as_bytes();
    if bytes.len() > 8 {
        return Err(WriteError::Internal(format!("name `{name}` exceeds the 8-byte identifier limit")));
    }
    buf.push(bytes.len() as u8);
    buf.extend_from_slice(bytes);
    Ok(())
}

/// `dataSection := nData(int) dataDef{nData}`. Walks the ordered global
/// scope, keeping only `Simple`/`Vector` objects — `Func` symbols go in the
/// code section, and a global never stays `Label`.
fn write_data_section(buf: &mut Vec<u8>, table: &SymbolTable, interner: &Interner, strings: &mut StringPool) -> Result<(), WriteError> {
    let data_ids: Vec<SymbolId> = table
        .global()
        .in_order()
        .iter()
        .copied()
        .filter(|id| matches!(table.entry(*id).object, ObjectType::Simple | ObjectType::Vector))
        .collect();

    write_i32(buf, data_ids.len() as i32);
    for id in data_ids {
        let entry = table.entry(id);
        write_name(buf, interner.resolve(entry.name))?;

        let mut flags = 0u8;
        if entry.object == ObjectType::Vector {
            flags |= FLAG_VEC;
        }
        buf.push(flags);
        if flags & FLAG_VEC != 0 {
            write_i32(buf, entry.vector_size.unwrap_or(0) as i32);
        }

        write_i32(buf, entry.inits.len() as i32);
        for ival in &entry.inits {
            match ival {
                Ival::Symbol(sym) => {
                    buf.push(INIT_INAM);
                    write_name(buf, interner.resolve(table.entry(*sym).name))?;
                }
                Ival::Int(v) => {
                    buf.push(INIT_IINT);
                    write_i32(buf, *v as i32);
                }
                Ival::Str(bytes) => {
                    buf.push(INIT_ISTR);
                    let offset = strings.strpadd(bytes);
                    write_i32(buf, offset as i32);
                }
            }
        }
    }
    Ok(())
}

/// `codeSection := nFunc(int) funcDef{nFunc}`.
fn write_code_section(
    buf: &mut Vec<u8>,
    table: &SymbolTable,
    fragments: &IndexVec<CodeFragmentId, CodeFragment>,
    interner: &Interner,
    strings: &mut StringPool,
) -> Result<(), WriteError> {
    let func_ids: Vec<SymbolId> =
        table.global().in_order().iter().copied().filter(|id| table.entry(*id).object == ObjectType::Func).collect();

    write_i32(buf, func_ids.len() as i32);
    for id in func_ids {
        write_function(buf, table, fragments, interner, strings, id)?;
    }
    Ok(())
}

/// `funcDef := name nExtern(int) externName{nExtern} nInstr(int) instr{nInstr}`.
/// The extern table numbers every non-`Auto` symbol the function's code
/// references (functions it calls, globals it touches) in first-reference
/// order; `PSHSYM`'s `externIndex` operand is that position.
fn write_function(
    buf: &mut Vec<u8>,
    table: &SymbolTable,
    fragments: &IndexVec<CodeFragmentId, CodeFragment>,
    interner: &Interner,
    strings: &mut StringPool,
    id: SymbolId,
) -> Result<(), WriteError> {
    let entry = table.entry(id);
    let func_data = entry.func.as_ref().ok_or_else(|| WriteError::Internal("Func symbol missing FuncData".into()))?;
    let frag = fragments.get(func_data.code).ok_or_else(|| WriteError::Internal("dangling code fragment id".into()))?;

    let mut extern_order: Vec<SymbolId> = Vec::new();
    let mut extern_index: FxHashMap<SymbolId, u32> = FxHashMap::default();
    for node in frag.as_slice() {
        if let CodeNode::PshSym(target) = node {
            if table.entry(*target).storage != StorageClass::Auto {
                extern_index.entry(*target).or_insert_with(|| {
                    let idx = extern_order.len() as u32;
                    extern_order.push(*target);
                    idx
                });
            }
        }
    }

    write_name(buf, interner.resolve(entry.name))?;
    write_i32(buf, extern_order.len() as i32);
    for ext_id in &extern_order {
        write_name(buf, interner.resolve(table.entry(*ext_id).name))?;
    }

    write_i32(buf, frag.len() as i32);
    for node in frag.as_slice() {
        write_instr(buf, table, strings, &extern_index, node)?;
    }
    Ok(())
}

fn labpc_of(table: &SymbolTable, label: SymbolId) -> Result<i32, WriteError> {
    table
        .entry(label)
        .label
        .as_ref()
        .and_then(|data| data.labpc)
        .map(|n| n as i32)
        .ok_or_else(|| WriteError::Internal("label missing labpc".into()))
}

/// `instr := opcode(byte) operand`, per the per-opcode layout in `spec.md` §6.
fn write_instr(
    buf: &mut Vec<u8>,
    table: &SymbolTable,
    strings: &mut StringPool,
    extern_index: &FxHashMap<SymbolId, u32>,
    node: &CodeNode,
) -> Result<(), WriteError> {
    match node {
        CodeNode::NamDef(label) => {
            buf.push(NAMDEF);
            write_i32(buf, labpc_of(table, *label)?);
        }
        CodeNode::Jmp(label) => {
            buf.push(JMP);
            write_i32(buf, labpc_of(table, *label)?);
        }
        CodeNode::Bz(label) => {
            buf.push(BZ);
            write_i32(buf, labpc_of(table, *label)?);
        }
        CodeNode::Case { disc, target } => {
            buf.push(CASE);
            write_i32(buf, *disc as i32);
            write_i32(buf, labpc_of(table, *target)?);
        }
        CodeNode::Pop => buf.push(POP),
        CodeNode::PopT => buf.push(POPT),
        CodeNode::PushT => buf.push(PUSHT),
        CodeNode::PopN(n) => {
            buf.push(POPN);
            write_i32(buf, *n);
        }
        CodeNode::Dup => buf.push(DUP),
        CodeNode::DupN(n) => {
            buf.push(DUPN);
            write_i32(buf, *n);
        }
        CodeNode::Rot => buf.push(ROT),
        CodeNode::PshCon(Const::Int(v)) => {
            buf.push(PSHCON);
            buf.push(0);
            write_i32(buf, *v as i32);
        }
        CodeNode::PshCon(Const::Str(bytes)) => {
            buf.push(PSHCON);
            buf.push(1);
            let offset = strings.strpadd(bytes);
            write_i32(buf, offset as i32);
        }
        CodeNode::PshSym(sym) => {
            buf.push(PSHSYM);
            let entry = table.entry(*sym);
            if entry.storage == StorageClass::Auto {
                buf.push(1);
                let offset = entry.auto_offset.ok_or_else(|| WriteError::Internal("auto symbol missing frame offset".into()))?;
                write_i32(buf, offset);
            } else {
                buf.push(0);
                let idx = *extern_index.get(sym).ok_or_else(|| WriteError::Internal("symbol missing from extern table".into()))?;
                write_i32(buf, idx as i32);
            }
        }
        CodeNode::Deref => buf.push(DEREF),
        CodeNode::Store => buf.push(STORE),
        CodeNode::Call => buf.push(CALL),
        CodeNode::Enter(n) => {
            buf.push(ENTER);
            write_i32(buf, *n);
        }
        CodeNode::Leave(n) => {
            buf.push(LEAVE);
            write_i32(buf, *n);
        }
        CodeNode::Ret => buf.push(RET),
        CodeNode::AvInit(n) => {
            buf.push(AVINIT);
            write_i32(buf, *n);
        }
        CodeNode::Add => buf.push(ADD),
        CodeNode::Sub => buf.push(SUB),
        CodeNode::Mul => buf.push(MUL),
        CodeNode::Div => buf.push(DIV),
        CodeNode::Mod => buf.push(MOD),
        CodeNode::Shl => buf.push(SHL),
        CodeNode::Shr => buf.push(SHR),
        CodeNode::Neg => buf.push(NEG),
        CodeNode::Not => buf.push(NOT),
        CodeNode::And => buf.push(AND),
        CodeNode::Or => buf.push(OR),
        CodeNode::Eq => buf.push(EQ),
        CodeNode::Ne => buf.push(NE),
        CodeNode::Lt => buf.push(LT),
        CodeNode::Le => buf.push(LE),
        CodeNode::Gt => buf.push(GT),
        CodeNode::Ge => buf.push(GE),
    }
    Ok(())
}

/// `stringSection := length(int) bytes{length}`.
fn write_string_section(buf: &mut Vec<u8>, strings: &StringPool) {
    write_i32(buf, strings.len() as i32);
    buf.extend_from_slice(strings.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use b_par::Parser;
    use b_util::{FileId, Handler};

    fn compile(source: &str) -> (SymbolTable, IndexVec<CodeFragmentId, CodeFragment>, Interner) {
        let mut interner = Interner::new();
        let handler = Handler::new();
        let parser = Parser::new(source, FileId::new(0), &mut interner, &handler);
        let program = parser.parse_program();
        assert!(!handler.has_errors(), "unexpected diagnostics: {:?}", handler.diagnostics());
        (program.table, program.fragments, interner)
    }

    #[test]
    fn simple_data_def_round_trips_header_and_one_init() {
        let (table, fragments, interner) = compile("x 5;\n");
        let mut out = Vec::new();
        write_program(&table, &fragments, &interner, &mut out).unwrap();

        assert_eq!(&out[0..4], &MAGIC.to_le_bytes());
        let n_data = i32::from_le_bytes(out[4..8].try_into().unwrap());
        assert_eq!(n_data, 1);
        assert_eq!(out[8], 1, "name length byte");
        assert_eq!(&out[9..10], b"x");
        assert_eq!(out[10], 0, "flags: not a vector");
        let n_init = i32::from_le_bytes(out[11..15].try_into().unwrap());
        assert_eq!(n_init, 1);
        assert_eq!(out[15], INIT_IINT);
        let value = i32::from_le_bytes(out[16..20].try_into().unwrap());
        assert_eq!(value, 5);
    }

    #[test]
    fn vector_data_def_writes_size_after_flags() {
        let (table, fragments, interner) = compile("v[3];\n");
        let mut out = Vec::new();
        write_program(&table, &fragments, &interner, &mut out).unwrap();
        assert_eq!(out[10], FLAG_VEC);
        let size = i32::from_le_bytes(out[11..15].try_into().unwrap());
        assert_eq!(size, 3);
    }

    #[test]
    fn function_extern_table_numbers_first_reference_order() {
        let (table, fragments, interner) = compile("f() { extrn g; return(g(1)); }\n");
        let mut out = Vec::new();
        write_program(&table, &fragments, &interner, &mut out).unwrap();

        let n_data = i32::from_le_bytes(out[4..8].try_into().unwrap());
        assert_eq!(n_data, 0);
        let mut pos = 8usize;
        let n_func = i32::from_le_bytes(out[pos..pos + 4].try_into().unwrap());
        assert_eq!(n_func, 1);
        pos += 4;
        let name_len = out[pos] as usize;
        pos += 1 + name_len;
        let n_extern = i32::from_le_bytes(out[pos..pos + 4].try_into().unwrap());
        assert_eq!(n_extern, 1, "only `g` is referenced, `f` calls itself via no PSHSYM");
    }

    #[test]
    fn string_section_follows_code_section() {
        let (table, fragments, interner) = compile("f() { return(\"hi\"); }\n");
        let mut out = Vec::new();
        write_program(&table, &fragments, &interner, &mut out).unwrap();
        // The pool holds "hi" plus its sentinel, word-aligned: non-empty.
        assert!(out.len() > 20);
    }
}
