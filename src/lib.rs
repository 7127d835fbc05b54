extern crate thiserror;

pub mod cmd;
pub mod compiler;
pub mod vm;

#[cfg(test)]
extern crate quickcheck;

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
