//! The stack machine targeted by the compiler.
//!
//! Only the instruction set lives here: the textual form of every instruction,
//! a parser for it, and the sink the code generator appends to.
pub mod instruction;
pub mod writer;

pub use instruction::{Command, Index, Instruction, Segment};
pub use writer::VmWriter;
