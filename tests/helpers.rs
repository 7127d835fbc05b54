#![allow(dead_code)]

use jackc::compiler::source::StringSource;
use jackc::compiler::CompilationUnit;
use jackc::compiler::Compiler;
pub use jackc::compiler::Error;
pub use jackc::compiler::Result;
use jackc::vm::Instruction;
pub use matches::assert_matches;

pub fn compile_code(code: &str) -> Result<CompilationUnit> {
    let mut source = StringSource::new(code);
    let mut compiler = Compiler::new();
    compiler.compile(&mut source)
}

/// The VM program as text lines.
pub fn vm_lines(code: &str) -> Vec<String> {
    compile_code(code)
        .unwrap()
        .code
        .iter()
        .map(Instruction::to_string)
        .collect()
}

/// The code of one subroutine, from its `function` line up to the next one.
pub fn subroutine_lines(code: &str, name: &str) -> Vec<String> {
    let header = format!("function {} ", name);

    vm_lines(code)
        .into_iter()
        .skip_while(|line| !line.starts_with(&header))
        .enumerate()
        .take_while(|(i, line)| *i == 0 || !line.starts_with("function "))
        .map(|(_, line)| line)
        .collect()
}

pub fn assert_contains_sequence(lines: &[String], sequence: &[&str]) {
    let found = lines
        .windows(sequence.len())
        .any(|window| window.iter().zip(sequence).all(|(a, b)| a == b));

    assert!(found, "{:?} not found in {:#?}", sequence, lines)
}

/// Checks that every open tag is closed in order and that indentation follows nesting.
pub fn assert_well_formed_trace(lines: &[String]) {
    let mut open: Vec<String> = vec![];

    for line in lines {
        let indent = line.len() - line.trim_start().len();
        let content = line.trim_start();
        assert_eq!(indent % 2, 0, "odd indentation: {:?}", line);

        if let Some(tag) = content.strip_prefix("</") {
            let tag = tag.trim_end_matches('>');
            assert_eq!(open.pop().as_deref(), Some(tag), "unbalanced close: {:?}", line);
            assert_eq!(indent / 2, open.len(), "misindented: {:?}", line);
        } else if content.ends_with(&format!("</{}>", terminal_tag(content))) {
            assert_eq!(indent / 2, open.len(), "misindented: {:?}", line);
        } else {
            assert_eq!(indent / 2, open.len(), "misindented: {:?}", line);
            open.push(content.trim_start_matches('<').trim_end_matches('>').to_string());
        }
    }

    assert!(open.is_empty(), "unclosed tags: {:?}", open);
}

fn terminal_tag(content: &str) -> &str {
    content
        .trim_start_matches('<')
        .split('>')
        .next()
        .unwrap_or_default()
}
