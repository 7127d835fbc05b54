pub mod lexer;
pub mod token;
pub mod token_stream;

pub use lexer::Lexer;
pub use token::{Keyword, Token, TokenKind};
pub use token_stream::TokenStream;
