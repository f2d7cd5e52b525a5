/// Opcode byte values for the instruction stream (`spec.md` §6's
/// `instr := opcode(byte) operand`). The spec fixes every opcode's name and
/// operand shape but not its numeric encoding; this assignment is the
/// writer's own, stable only within one build of this crate.
pub const NAMDEF: u8 = 0x00;
pub const JMP: u8 = 0x01;
pub const BZ: u8 = 0x02;
pub const CASE: u8 = 0x03;
pub const POP: u8 = 0x04;
pub const POPT: u8 = 0x05;
pub const PUSHT: u8 = 0x06;
pub const POPN: u8 = 0x07;
pub const DUP: u8 = 0x08;
pub const DUPN: u8 = 0x09;
pub const ROT: u8 = 0x0a;
pub const PSHCON: u8 = 0x0b;
pub const PSHSYM: u8 = 0x0c;
pub const DEREF: u8 = 0x0d;
pub const STORE: u8 = 0x0e;
pub const CALL: u8 = 0x0f;
pub const ENTER: u8 = 0x10;
pub const LEAVE: u8 = 0x11;
pub const RET: u8 = 0x12;
pub const AVINIT: u8 = 0x13;

pub const ADD: u8 = 0x20;
pub const SUB: u8 = 0x21;
pub const MUL: u8 = 0x22;
pub const DIV: u8 = 0x23;
pub const MOD: u8 = 0x24;
pub const SHL: u8 = 0x25;
pub const SHR: u8 = 0x26;
pub const NEG: u8 = 0x27;
pub const NOT: u8 = 0x28;
pub const AND: u8 = 0x29;
pub const OR: u8 = 0x2a;

pub const EQ: u8 = 0x30;
pub const NE: u8 = 0x31;
pub const LT: u8 = 0x32;
pub const LE: u8 = 0x33;
pub const GT: u8 = 0x34;
pub const GE: u8 = 0x35;

/// Init-list tag bytes (`spec.md` §6's `init := kind(byte) payload`).
pub const INIT_INAM: u8 = 0x00;
pub const INIT_IINT: u8 = 0x01;
pub const INIT_ISTR: u8 = 0x02;

/// Set in a `dataDef`'s flags byte when the definition is a vector
/// (`spec.md` §6's `flags & VEC`).
pub const FLAG_VEC: u8 = 0x01;

pub const MAGIC: u32 = 0x0000_4642;
