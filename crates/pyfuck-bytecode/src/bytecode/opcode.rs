//! CPython 3.10 opcodes used by the emitter.
//!
//! Only the opcodes the operator templates need are listed; numbering matches
//! `Include/opcode.h` of the 3.10 interpreter.

/// Instruction opcodes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Opcode {
    PopTop = 1,
    RotThree = 3,
    DupTopTwo = 5,
    /// Only met when decoding modules from other producers; templates
    /// are emitted back to back without separators.
    Nop = 9,
    BinaryMultiply = 20,
    BinarySubscr = 25,
    InplaceAdd = 55,
    InplaceSubtract = 56,
    InplaceModulo = 59,
    StoreSubscr = 60,
    ReturnValue = 83,
    StoreName = 90,
    LoadConst = 100,
    LoadName = 101,
    BuildTuple = 102,
    BuildList = 103,
    CompareOp = 107,
    ImportName = 108,
    ImportFrom = 109,
    PopJumpIfFalse = 114,
    CallFunction = 131,
    ExtendedArg = 144,
    LoadMethod = 160,
    CallMethod = 161,
}

/// What an opcode's operand refers to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArgKind {
    /// Operand is ignored (always 0).
    None,
    /// Index into the constant pool.
    Const,
    /// Index into the name pool.
    Name,
    /// A `CompareOp` discriminant.
    Compare,
    /// Absolute jump target in instruction words.
    Jump,
    /// Element or argument count.
    Count,
    /// High-order operand bits for the next instruction.
    Extended,
}

impl Opcode {
    pub fn from_u8(v: u8) -> Option<Self> {
        let op = match v {
            1 => Self::PopTop,
            3 => Self::RotThree,
            5 => Self::DupTopTwo,
            9 => Self::Nop,
            20 => Self::BinaryMultiply,
            25 => Self::BinarySubscr,
            55 => Self::InplaceAdd,
            56 => Self::InplaceSubtract,
            59 => Self::InplaceModulo,
            60 => Self::StoreSubscr,
            83 => Self::ReturnValue,
            90 => Self::StoreName,
            100 => Self::LoadConst,
            101 => Self::LoadName,
            102 => Self::BuildTuple,
            103 => Self::BuildList,
            107 => Self::CompareOp,
            108 => Self::ImportName,
            109 => Self::ImportFrom,
            114 => Self::PopJumpIfFalse,
            131 => Self::CallFunction,
            144 => Self::ExtendedArg,
            160 => Self::LoadMethod,
            161 => Self::CallMethod,
            _ => return None,
        };
        Some(op)
    }

    /// Interpreter mnemonic, as printed by `dis`.
    pub fn name(self) -> &'static str {
        match self {
            Self::PopTop => "POP_TOP",
            Self::RotThree => "ROT_THREE",
            Self::DupTopTwo => "DUP_TOP_TWO",
            Self::Nop => "NOP",
            Self::BinaryMultiply => "BINARY_MULTIPLY",
            Self::BinarySubscr => "BINARY_SUBSCR",
            Self::InplaceAdd => "INPLACE_ADD",
            Self::InplaceSubtract => "INPLACE_SUBTRACT",
            Self::InplaceModulo => "INPLACE_MODULO",
            Self::StoreSubscr => "STORE_SUBSCR",
            Self::ReturnValue => "RETURN_VALUE",
            Self::StoreName => "STORE_NAME",
            Self::LoadConst => "LOAD_CONST",
            Self::LoadName => "LOAD_NAME",
            Self::BuildTuple => "BUILD_TUPLE",
            Self::BuildList => "BUILD_LIST",
            Self::CompareOp => "COMPARE_OP",
            Self::ImportName => "IMPORT_NAME",
            Self::ImportFrom => "IMPORT_FROM",
            Self::PopJumpIfFalse => "POP_JUMP_IF_FALSE",
            Self::CallFunction => "CALL_FUNCTION",
            Self::ExtendedArg => "EXTENDED_ARG",
            Self::LoadMethod => "LOAD_METHOD",
            Self::CallMethod => "CALL_METHOD",
        }
    }

    /// Opcodes >= 90 (HAVE_ARGUMENT) take an operand.
    pub fn has_arg(self) -> bool {
        self as u8 >= 90
    }

    pub fn arg_kind(self) -> ArgKind {
        match self {
            Self::LoadConst => ArgKind::Const,
            Self::LoadName
            | Self::StoreName
            | Self::ImportName
            | Self::ImportFrom
            | Self::LoadMethod => ArgKind::Name,
            Self::CompareOp => ArgKind::Compare,
            Self::PopJumpIfFalse => ArgKind::Jump,
            Self::BuildTuple | Self::BuildList | Self::CallFunction | Self::CallMethod => {
                ArgKind::Count
            }
            Self::ExtendedArg => ArgKind::Extended,
            _ => ArgKind::None,
        }
    }

    /// Net change of the operand stack depth after executing this opcode.
    ///
    /// For the conditional jump this is the effect on both paths (it always pops).
    pub fn stack_effect(self, arg: u32) -> i64 {
        let arg = i64::from(arg);
        match self {
            Self::Nop | Self::RotThree | Self::ExtendedArg => 0,
            Self::PopTop => -1,
            Self::DupTopTwo => 2,
            Self::BinaryMultiply
            | Self::BinarySubscr
            | Self::InplaceAdd
            | Self::InplaceSubtract
            | Self::InplaceModulo => -1,
            Self::StoreSubscr => -3,
            Self::ReturnValue | Self::StoreName => -1,
            Self::LoadConst | Self::LoadName => 1,
            Self::BuildTuple | Self::BuildList => 1 - arg,
            Self::CompareOp => -1,
            // Pops level and fromlist, pushes the module.
            Self::ImportName => -1,
            Self::ImportFrom => 1,
            Self::PopJumpIfFalse => -1,
            Self::CallFunction => -arg,
            // Pushes the unbound method and `self`.
            Self::LoadMethod => 1,
            Self::CallMethod => -arg - 1,
        }
    }
}

/// Rich comparison operators (`COMPARE_OP` operand).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum CompareOp {
    Less = 0,
    LessEqual = 1,
    Equal = 2,
    NotEqual = 3,
    Greater = 4,
    GreaterEqual = 5,
}

impl CompareOp {
    pub fn from_u8(v: u8) -> Option<Self> {
        let op = match v {
            0 => Self::Less,
            1 => Self::LessEqual,
            2 => Self::Equal,
            3 => Self::NotEqual,
            4 => Self::Greater,
            5 => Self::GreaterEqual,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        }
    }
}
