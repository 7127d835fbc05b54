use crate::vm::Instruction;
use std::fmt::Write;

/// Artifacts of one successfully compiled class.
#[derive(Clone, Debug, PartialEq)]
pub struct CompilationUnit {
    pub class_name: String,
    pub trace: Vec<String>,
    pub code: Vec<Instruction>,
}

impl CompilationUnit {
    pub fn new(class_name: String, trace: Vec<String>, code: Vec<Instruction>) -> Self {
        CompilationUnit {
            class_name,
            trace,
            code,
        }
    }

    /// The parse-tree trace, one line per entry.
    pub fn trace_text(&self) -> String {
        let mut text = String::new();
        for line in &self.trace {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// The VM program, one instruction per line.
    pub fn code_text(&self) -> String {
        let mut text = String::new();
        for instruction in &self.code {
            // writing into a String never fails
            let _ = writeln!(text, "{}", instruction);
        }
        text
    }
}
