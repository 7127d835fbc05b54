use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type Index = u16;

/// Addressable operand classes of the stack machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Constant,
    Argument,
    Local,
    Static,
    This,
    That,
    Pointer,
    Temp,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Argument => "argument",
            Segment::Local => "local",
            Segment::Static => "static",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Segment {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constant" => Ok(Segment::Constant),
            "argument" => Ok(Segment::Argument),
            "local" => Ok(Segment::Local),
            "static" => Ok(Segment::Static),
            "this" => Ok(Segment::This),
            "that" => Ok(Segment::That),
            "pointer" => Ok(Segment::Pointer),
            "temp" => Ok(Segment::Temp),
            other => Err(ParseError::UnknownSegment(other.to_string())),
        }
    }
}

/// Stack arithmetic and logic commands. Each pops its operands and pushes one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::Sub => "sub",
            Command::Neg => "neg",
            Command::Eq => "eq",
            Command::Gt => "gt",
            Command::Lt => "lt",
            Command::And => "and",
            Command::Or => "or",
            Command::Not => "not",
        }
    }

    fn from_mnemonic(s: &str) -> Option<Self> {
        match s {
            "add" => Some(Command::Add),
            "sub" => Some(Command::Sub),
            "neg" => Some(Command::Neg),
            "eq" => Some(Command::Eq),
            "gt" => Some(Command::Gt),
            "lt" => Some(Command::Lt),
            "and" => Some(Command::And),
            "or" => Some(Command::Or),
            "not" => Some(Command::Not),
            _ => None,
        }
    }
}

/// One line of VM code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Push(Segment, Index),
    Pop(Segment, Index),
    Arithmetic(Command),
    Label(String),
    Goto(String),
    IfGoto(String),
    Call(String, Index),
    Function(String, Index),
    Return,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push(segment, index) => write!(f, "push {} {}", segment, index),
            Instruction::Pop(segment, index) => write!(f, "pop {} {}", segment, index),
            Instruction::Arithmetic(command) => f.write_str(command.as_str()),
            Instruction::Label(label) => write!(f, "label {}", label),
            Instruction::Goto(label) => write!(f, "goto {}", label),
            Instruction::IfGoto(label) => write!(f, "if-goto {}", label),
            Instruction::Call(name, args) => write!(f, "call {} {}", name, args),
            Instruction::Function(name, locals) => write!(f, "function {} {}", name, locals),
            Instruction::Return => f.write_str("return"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty instruction")]
    Empty,
    #[error("unknown instruction '{0}'")]
    UnknownInstruction(String),
    #[error("unknown segment '{0}'")]
    UnknownSegment(String),
    #[error("cannot pop into the constant segment")]
    PopConstant,
    #[error("'{0}' expects {1} operand(s)")]
    Arity(String, usize),
    #[error("invalid numeric operand '{0}'")]
    Number(String),
    #[error("invalid name '{0}'")]
    Name(String),
}

impl FromStr for Instruction {
    type Err = ParseError;

    /// Parse one line of VM code in the exact form produced by `Display`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split(' ').collect();

        match parts.as_slice() {
            [""] => Err(ParseError::Empty),
            ["push", segment, index] => Ok(Instruction::Push(segment.parse()?, number(index)?)),
            ["pop", segment, index] => match segment.parse()? {
                Segment::Constant => Err(ParseError::PopConstant),
                segment => Ok(Instruction::Pop(segment, number(index)?)),
            },
            ["label", label] => Ok(Instruction::Label(name(label)?)),
            ["goto", label] => Ok(Instruction::Goto(name(label)?)),
            ["if-goto", label] => Ok(Instruction::IfGoto(name(label)?)),
            ["call", function, args] => Ok(Instruction::Call(name(function)?, number(args)?)),
            ["function", function, locals] => {
                Ok(Instruction::Function(name(function)?, number(locals)?))
            }
            ["return"] => Ok(Instruction::Return),
            [single] => Command::from_mnemonic(single)
                .map(Instruction::Arithmetic)
                .ok_or_else(|| ParseError::UnknownInstruction(single.to_string())),
            [op, ..] => match *op {
                "push" | "pop" | "call" | "function" => Err(ParseError::Arity(op.to_string(), 2)),
                "label" | "goto" | "if-goto" => Err(ParseError::Arity(op.to_string(), 1)),
                "return" => Err(ParseError::Arity(op.to_string(), 0)),
                other => Err(ParseError::UnknownInstruction(other.to_string())),
            },
            [] => Err(ParseError::Empty),
        }
    }
}

fn number(s: &str) -> Result<Index, ParseError> {
    s.parse().map_err(|_| ParseError::Number(s.to_string()))
}

fn name(s: &str) -> Result<String, ParseError> {
    let valid = !s.is_empty()
        && !s.starts_with(|c: char| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':'));

    if valid {
        Ok(s.to_string())
    } else {
        Err(ParseError::Name(s.to_string()))
    }
}
