//! Field paths inside a configuration document.

use std::fmt;

/// One step from a container to a child.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value inside a document, e.g. `servers[0].password`.
///
/// The root path displays as the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns a new path extended by an object key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push(PathSegment::Key(key.into()));
        path
    }

    /// Returns a new path extended by an array index.
    pub fn index(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.push(PathSegment::Index(index));
        path
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromIterator<PathSegment> for FieldPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_displays_empty() {
        assert_eq!(FieldPath::root().to_string(), "");
        assert!(FieldPath::root().is_root());
    }

    #[test]
    fn keys_are_dotted() {
        let path = FieldPath::root().key("b").key("c");
        assert_eq!(path.to_string(), "b.c");
    }

    #[test]
    fn indices_are_bracketed() {
        let path = FieldPath::root().key("servers").index(0).key("password");
        assert_eq!(path.to_string(), "servers[0].password");

        let path = FieldPath::root().key("arrayWithSomeEncryptedValues").index(3);
        assert_eq!(path.to_string(), "arrayWithSomeEncryptedValues[3]");
    }

    #[test]
    fn top_level_array() {
        let path = FieldPath::root().index(2).index(1);
        assert_eq!(path.to_string(), "[2][1]");
    }

    #[test]
    fn push_and_pop() {
        let mut path = FieldPath::root();
        path.push(PathSegment::Key("a".into()));
        path.push(PathSegment::Index(1));
        assert_eq!(path.to_string(), "a[1]");
        path.pop();
        assert_eq!(path, FieldPath::root().key("a"));
    }
}
