//! Main compiler module.
//!
//! This module contains the Compiler structure that owns every piece of
//! per-compilation state (storage map, label counter, emitted lines) and
//! drives generation from the AST to BatPU-2 assembly text.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, instrument};

use crate::{
    ast::ast::{Class, Method, Program},
    config::{CompileOptions, Dialect},
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    isa::{render, Instruction, Line, Register, MAX_ARGUMENTS},
    stdlib::Subroutine,
    stmt::gen_statement,
    storage::Storage,
};

/// The state of one code generation run.
///
/// A `Compiler` is created by `generate` and consumed by it, so storage
/// addresses and label numbers never leak between compilations.
pub struct Compiler {
    /// Decides how method labels are spelled
    pub dialect: Dialect,
    /// Variable name to address map
    pub storage: Storage,
    /// Next suffix for control flow labels
    label_counter: usize,
    /// Every label defined so far and where it came from
    labels: HashMap<String, Position>,
    /// Arithmetic routines referenced by the generated code
    used_subroutines: BTreeSet<Subroutine>,
    /// Class of the method being generated, for unqualified calls
    pub current_class: String,
    lines: Vec<Line>,
}

impl Compiler {
    pub fn new(dialect: Dialect) -> Self {
        Compiler {
            dialect,
            storage: Storage::new(),
            label_counter: 0,
            labels: HashMap::new(),
            used_subroutines: BTreeSet::new(),
            current_class: String::new(),
            lines: vec![],
        }
    }

    pub fn emit(&mut self, instruction: Instruction) {
        self.lines.push(Line::Op(instruction));
    }

    /// Returns a fresh `<kind>_<n>` label name. Numbers are never reused.
    pub fn new_label(&mut self, kind: &str) -> String {
        let label = format!("{}_{}", kind, self.label_counter);
        self.label_counter += 1;
        label
    }

    /// Emits a label definition, rejecting names that are already taken.
    pub fn define_label(&mut self, name: &str, position: &Position) -> Result<(), Error> {
        if self.labels.contains_key(name) || Subroutine::is_reserved_label(name) {
            return Err(Error::new(
                ErrorImpl::FunctionAlreadyDeclared {
                    function: name.to_string(),
                },
                position.clone(),
            ));
        }

        debug!(label = name, "defined label");
        self.labels.insert(name.to_string(), position.clone());
        self.lines.push(Line::Label(name.to_string()));
        Ok(())
    }

    /// Marks an arithmetic routine for emission and returns its label.
    pub fn use_subroutine(&mut self, subroutine: Subroutine) -> String {
        self.used_subroutines.insert(subroutine);
        subroutine.label().to_string()
    }

    /// Label of a method, `Class_Method` in dialects that qualify labels.
    pub fn method_label(&self, class: &str, method: &str) -> String {
        if self.dialect.qualifies_labels() {
            format!("{}_{}", class, method)
        } else {
            method.to_string()
        }
    }

    pub fn resolve_variable(&self, name: &str, position: &Position) -> Result<u8, Error> {
        self.storage.resolve(name).ok_or_else(|| {
            Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: name.to_string(),
                },
                position.clone(),
            )
        })
    }

    pub fn gen_program(&mut self, program: &Program) -> Result<(), Error> {
        let (entry_class, entry_method) = program
            .methods()
            .find(|(_, method)| method.is_entry_point())
            .ok_or_else(|| {
                let position = program
                    .methods()
                    .last()
                    .map(|(_, method)| method.span.end.clone())
                    .unwrap_or_else(Position::null);
                Error::new(ErrorImpl::MissingEntryPoint, position)
            })?;

        let entry = self.method_label(&entry_class.name, &entry_method.name);
        self.emit(Instruction::Cal(entry));
        self.emit(Instruction::Hlt);

        for (class, method) in program.methods() {
            self.gen_method(class, method)?;
        }

        for subroutine in std::mem::take(&mut self.used_subroutines) {
            self.lines.extend(subroutine.body());
        }

        self.emit(Instruction::Hlt);
        Ok(())
    }

    fn gen_method(&mut self, class: &Class, method: &Method) -> Result<(), Error> {
        self.current_class = class.name.clone();

        let label = self.method_label(&class.name, &method.name);
        self.define_label(&label, &method.span.start)?;

        if method.parameters.len() > MAX_ARGUMENTS {
            return Err(Error::new(
                ErrorImpl::TooManyArguments {
                    limit: MAX_ARGUMENTS,
                    received: method.parameters.len(),
                },
                method.span.start.clone(),
            ));
        }

        // Parameters arrive in r1..r8 and live in memory like any variable
        for (index, parameter) in method.parameters.iter().enumerate() {
            let address = self
                .storage
                .resolve_or_allocate(&parameter.name, &parameter.span.start)?;
            self.emit(Instruction::Ldi(Register::SCRATCH, address));
            self.emit(Instruction::Str(Register::SCRATCH, Register::argument(index), 0));
        }

        for statement in &method.body {
            gen_statement(self, statement)?;
        }

        self.emit(Instruction::Ret);
        Ok(())
    }

    /// Renders everything emitted so far.
    pub fn finish(self) -> String {
        render(&self.lines)
    }
}

/// Generates assembly text for a parsed program.
///
/// Layout: a preamble calling the entry method and halting, one block per
/// method in source order, the arithmetic routines that were referenced,
/// and a final `hlt`.
#[instrument(skip_all, fields(dialect = ?options.dialect))]
pub fn generate(program: &Program, options: &CompileOptions) -> Result<String, Error> {
    let mut compiler = Compiler::new(options.dialect);
    compiler.gen_program(program)?;

    debug!(
        variables = compiler.storage.len(),
        labels = compiler.labels.len(),
        "generated program"
    );
    Ok(compiler.finish())
}
