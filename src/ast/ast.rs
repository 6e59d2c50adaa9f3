use crate::Span;

use super::statements::Statement;

/// Name of the synthetic namespace and class that hold bare top-level methods.
pub const GLOBAL_SCOPE: &str = "Global";

/// Root of the tree: namespaces in source order.
#[derive(Debug, Clone, Default)]
pub struct Program {
    /// `using` directives (C#) or `import` paths (VortexScript), in source order.
    /// They are recorded for diagnostics only; no other file is read.
    pub imports: Vec<String>,
    pub namespaces: Vec<Namespace>,
}

impl Program {
    /// Iterates over every method together with the class that owns it.
    pub fn methods(&self) -> impl Iterator<Item = (&Class, &Method)> {
        self.namespaces
            .iter()
            .flat_map(|namespace| namespace.classes.iter())
            .flat_map(|class| class.methods.iter().map(move |method| (class, method)))
    }
}

#[derive(Debug, Clone)]
pub struct Namespace {
    pub name: String,
    pub classes: Vec<Class>,
}

impl Namespace {
    pub fn new(name: &str) -> Self {
        Namespace {
            name: name.to_string(),
            classes: vec![],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Class {
    pub name: String,
    pub methods: Vec<Method>,
}

impl Class {
    pub fn new(name: &str) -> Self {
        Class {
            name: name.to_string(),
            methods: vec![],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Statement>,
    pub span: Span,
}

impl Method {
    pub fn is_entry_point(&self) -> bool {
        self.name == "Main" || self.name == "main"
    }
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub param_type: String,
    pub name: String,
    pub span: Span,
}
