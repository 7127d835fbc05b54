use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    Synthetic,
    Buffer(String),
    File(PathBuf),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Synthetic => f.write_str("<synthetic>"),
            Origin::Buffer(name) => write!(f, "<{}>", name),
            Origin::File(path) => write!(f, "{}", path.display()),
        }
    }
}
