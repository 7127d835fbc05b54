use super::{Origin, Source};

#[derive(Debug, Clone)]
pub struct StringSource {
    content: String,
    name: Option<String>,
}

impl StringSource {
    pub fn new<C: Into<String>>(content: C) -> Self {
        Self {
            content: content.into(),
            name: None,
        }
    }

    pub fn named<C: Into<String>, L: Into<String>>(content: C, label: L) -> Self {
        Self {
            content: content.into(),
            name: Some(label.into()),
        }
    }
}

impl Source for StringSource {
    fn origin(&self) -> Origin {
        match &self.name {
            Some(name) => Origin::Buffer(name.clone()),
            None => Origin::Synthetic,
        }
    }

    fn read_to_string(&mut self, buf: &mut String) -> std::io::Result<()> {
        buf.push_str(&self.content);
        Ok(())
    }
}
