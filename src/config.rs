//! Compilation options.
//!
//! The two source dialects share one token model, one AST and one code
//! generator. The dialect decides which words are reserved, how top-level
//! declarations look, and how method labels are spelled.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// The C#-like subset (`.cs`): `namespace`/`class` nesting or bare global methods.
    #[default]
    CSharp,
    /// VortexScript (`.vsc`): `import` lines, `public class` blocks and `byte` types.
    VortexScript,
}

impl Dialect {
    /// Picks the dialect from a source file extension, falling back to C#.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("vsc") => Dialect::VortexScript,
            _ => Dialect::CSharp,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "cs" | "csharp" | "c#" => Some(Dialect::CSharp),
            "vsc" | "vortex" | "vortexscript" => Some(Dialect::VortexScript),
            _ => None,
        }
    }

    /// Whether method labels are qualified with their class name (`.Class_Method`).
    pub fn qualifies_labels(&self) -> bool {
        matches!(self, Dialect::VortexScript)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub dialect: Dialect,
}

impl CompileOptions {
    pub fn new(dialect: Dialect) -> Self {
        CompileOptions { dialect }
    }
}
