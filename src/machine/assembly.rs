//! Assembly text back to instructions.

use std::collections::HashMap;

use crate::compiler::isa::{BranchCondition, Instruction, Register, REGISTER_COUNT};

use super::error::{MachineError, MachineResult};

/// Instructions of a program with every label resolved to an index.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub instructions: Vec<Instruction>,
    pub labels: HashMap<String, usize>,
}

impl Assembly {
    pub fn label_address(&self, name: &str) -> MachineResult<usize> {
        self.labels
            .get(name)
            .copied()
            .ok_or_else(|| MachineError::UndefinedLabel(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Parses assembly text.
///
/// Blank lines and `;` or `//` comments are skipped. A label line may carry
/// an instruction after the label. Every referenced label must be defined.
pub fn assemble(text: &str) -> MachineResult<Assembly> {
    let mut assembly = Assembly::default();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let code = strip_comment(raw);
        let mut words: Vec<&str> = code.split_whitespace().collect();

        if let Some(name) = words.first().and_then(|word| word.strip_prefix('.')) {
            if assembly.labels.contains_key(name) {
                return Err(MachineError::DuplicateLabel(name.to_string()));
            }
            assembly.labels.insert(name.to_string(), assembly.instructions.len());
            words.remove(0);
        }

        if words.is_empty() {
            continue;
        }

        let instruction = parse_instruction(line, &words)?;
        assembly.instructions.push(instruction);
    }

    for instruction in &assembly.instructions {
        if let Instruction::Jmp(label) | Instruction::Brh(_, label) | Instruction::Cal(label) = instruction {
            assembly.label_address(label)?;
        }
    }

    Ok(assembly)
}

fn strip_comment(line: &str) -> &str {
    let end = [line.find(';'), line.find("//")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(line.len());
    &line[..end]
}

fn parse_instruction(line: usize, words: &[&str]) -> MachineResult<Instruction> {
    let mnemonic = words[0].to_ascii_lowercase();
    let operands = &words[1..];

    let expect = |expected: usize| -> MachineResult<()> {
        if operands.len() == expected {
            Ok(())
        } else {
            Err(MachineError::OperandCount {
                line,
                mnemonic: mnemonic.clone(),
                expected,
                found: operands.len(),
            })
        }
    };

    let instruction = match mnemonic.as_str() {
        "hlt" => {
            expect(0)?;
            Instruction::Hlt
        }
        "ret" => {
            expect(0)?;
            Instruction::Ret
        }
        "add" | "sub" => {
            expect(3)?;
            let a = register(line, operands[0])?;
            let b = register(line, operands[1])?;
            let c = register(line, operands[2])?;
            if mnemonic == "add" {
                Instruction::Add(a, b, c)
            } else {
                Instruction::Sub(a, b, c)
            }
        }
        "ldi" | "adi" => {
            expect(2)?;
            let a = register(line, operands[0])?;
            let value = immediate(line, operands[1])?;
            if mnemonic == "ldi" {
                Instruction::Ldi(a, value)
            } else {
                Instruction::Adi(a, value)
            }
        }
        "lod" | "str" => {
            // The offset may be left out
            if operands.len() != 2 {
                expect(3)?;
            }
            let a = register(line, operands[0])?;
            let b = register(line, operands[1])?;
            let offset = match operands.get(2) {
                Some(text) => offset(line, text)?,
                None => 0,
            };
            if mnemonic == "lod" {
                Instruction::Lod(a, b, offset)
            } else {
                Instruction::Str(a, b, offset)
            }
        }
        "cmp" => {
            expect(2)?;
            Instruction::Cmp(register(line, operands[0])?, register(line, operands[1])?)
        }
        "mov" => {
            expect(2)?;
            Instruction::Mov(register(line, operands[0])?, register(line, operands[1])?)
        }
        "jmp" => {
            expect(1)?;
            Instruction::Jmp(label(line, operands[0])?)
        }
        "cal" => {
            expect(1)?;
            Instruction::Cal(label(line, operands[0])?)
        }
        "brh" => {
            expect(2)?;
            let condition = BranchCondition::from_name(&operands[0].to_ascii_lowercase())
                .ok_or_else(|| malformed(line, operands[0]))?;
            Instruction::Brh(condition, label(line, operands[1])?)
        }
        _ => {
            return Err(MachineError::UnknownMnemonic {
                line,
                mnemonic: words[0].to_string(),
            })
        }
    };

    Ok(instruction)
}

fn malformed(line: usize, operand: &str) -> MachineError {
    MachineError::MalformedOperand {
        line,
        operand: operand.to_string(),
    }
}

fn register(line: usize, text: &str) -> MachineResult<Register> {
    text.strip_prefix(['r', 'R'])
        .and_then(|digits| digits.parse::<usize>().ok())
        .filter(|index| *index < REGISTER_COUNT)
        .map(|index| Register(index as u8))
        .ok_or_else(|| malformed(line, text))
}

/// Decimal, `0x`, `0b` or negative values; negatives wrap to a byte.
fn immediate(line: usize, text: &str) -> MachineResult<u8> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let lower = digits.to_ascii_lowercase();
    let value = if let Some(hex) = lower.strip_prefix("0x") {
        u16::from_str_radix(hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u16::from_str_radix(bin, 2)
    } else {
        lower.parse::<u16>()
    }
    .map_err(|_| malformed(line, text))?;

    match (negative, value) {
        (false, 0..=255) => Ok(value as u8),
        (true, 0..=128) => Ok((value as u8).wrapping_neg()),
        _ => Err(malformed(line, text)),
    }
}

/// Memory offsets are signed 4-bit values.
fn offset(line: usize, text: &str) -> MachineResult<i8> {
    text.parse::<i8>()
        .ok()
        .filter(|value| (-8..=7).contains(value))
        .ok_or_else(|| malformed(line, text))
}

fn label(line: usize, text: &str) -> MachineResult<String> {
    text.strip_prefix('.')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| malformed(line, text))
}
