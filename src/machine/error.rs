use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error("Unknown mnemonic `{mnemonic}` on line {line}")]
    UnknownMnemonic { line: usize, mnemonic: String },

    #[error("Malformed operand `{operand}` on line {line}")]
    MalformedOperand { line: usize, operand: String },

    #[error("`{mnemonic}` takes {expected} operands, found {found} on line {line}")]
    OperandCount {
        line: usize,
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("Undefined label: .{0}")]
    UndefinedLabel(String),

    #[error("Label defined twice: .{0}")]
    DuplicateLabel(String),

    #[error("Call stack overflow at pc {0}")]
    CallStackOverflow(usize),

    #[error("Return with empty call stack at pc {0}")]
    CallStackUnderflow(usize),

    #[error("Step limit of {0} exceeded")]
    StepLimitExceeded(usize),

    #[error("Program counter out of bounds: {0}")]
    PCOutOfBounds(usize),
}

pub type MachineResult<T> = Result<T, MachineError>;
