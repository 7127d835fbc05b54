use super::instruction::{Command, Index, Instruction, Segment};

/// Append-only sink for generated VM code.
///
/// Instructions are kept in emission order. The compiler may truncate the
/// tail back to an earlier length when it abandons an optional production,
/// which is the only way anything is ever removed.
#[derive(Debug, Default, Clone)]
pub struct VmWriter {
    code: Vec<Instruction>,
}

impl VmWriter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn write(&mut self, instruction: Instruction) {
        self.code.push(instruction)
    }

    pub fn write_push(&mut self, segment: Segment, index: Index) {
        self.write(Instruction::Push(segment, index))
    }

    pub fn write_pop(&mut self, segment: Segment, index: Index) {
        self.write(Instruction::Pop(segment, index))
    }

    pub fn write_arithmetic(&mut self, command: Command) {
        self.write(Instruction::Arithmetic(command))
    }

    pub fn write_label<L: Into<String>>(&mut self, label: L) {
        self.write(Instruction::Label(label.into()))
    }

    pub fn write_goto<L: Into<String>>(&mut self, label: L) {
        self.write(Instruction::Goto(label.into()))
    }

    pub fn write_if_goto<L: Into<String>>(&mut self, label: L) {
        self.write(Instruction::IfGoto(label.into()))
    }

    pub fn write_call<N: Into<String>>(&mut self, name: N, args: Index) {
        self.write(Instruction::Call(name.into(), args))
    }

    pub fn write_function<N: Into<String>>(&mut self, name: N, locals: Index) {
        self.write(Instruction::Function(name.into(), locals))
    }

    pub fn write_return(&mut self) {
        self.write(Instruction::Return)
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn truncate(&mut self, len: usize) {
        self.code.truncate(len)
    }

    pub fn code(&self) -> &[Instruction] {
        &self.code
    }

    pub fn into_code(self) -> Vec<Instruction> {
        self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_in_emission_order() {
        let mut writer = VmWriter::new();

        writer.write_function("Main.main", 0);
        writer.write_push(Segment::Constant, 0);
        writer.write_return();

        let lines: Vec<String> = writer.code().iter().map(|i| i.to_string()).collect();
        assert_eq!(
            lines,
            vec!["function Main.main 0", "push constant 0", "return"]
        );
    }

    #[test]
    fn truncate_drops_the_tail() {
        let mut writer = VmWriter::new();
        writer.write_push(Segment::Local, 0);
        let mark = writer.len();
        writer.write_push(Segment::Local, 1);
        writer.write_arithmetic(Command::Add);

        writer.truncate(mark);

        assert_eq!(writer.into_code(), vec![Instruction::Push(Segment::Local, 0)]);
    }
}
