//! An execution error path, represented as an `Arc`-linked cons-list so that
//! descending into a selection set is O(1) and never copies the prefix
//! (design note: "use a persistent path built by structural sharing").

use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

#[derive(Clone, Debug, Default)]
pub struct Path(Option<Arc<PathNode>>);

#[derive(Debug)]
struct PathNode {
    segment: PathSegment,
    parent: Path,
}

impl Path {
    pub fn root() -> Self {
        Path(None)
    }

    pub fn field(&self, name: impl Into<String>) -> Self {
        Path(Some(Arc::new(PathNode { segment: PathSegment::Field(name.into()), parent: self.clone() })))
    }

    pub fn index(&self, i: usize) -> Self {
        Path(Some(Arc::new(PathNode { segment: PathSegment::Index(i), parent: self.clone() })))
    }

    pub fn segments(&self) -> Vec<PathSegment> {
        let mut out = Vec::new();
        let mut node = self.0.clone();
        while let Some(n) = node {
            out.push(n.segment.clone());
            node = n.parent.0.clone();
        }
        out.reverse();
        out
    }

    pub fn is_root(&self) -> bool {
        self.0.is_none()
    }

    /// Whether `self` is `other` or a descendant of it (used to check
    /// whether a non-null propagation has already produced an error at a
    /// prefix of this path).
    pub fn starts_with(&self, other: &Path) -> bool {
        let self_segments = self.segments();
        let other_segments = other.segments();
        other_segments.len() <= self_segments.len() && self_segments[..other_segments.len()] == other_segments[..]
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = self.segments();
        for (i, seg) in segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match seg {
                PathSegment::Field(name) => write!(f, "{name}")?,
                PathSegment::Index(idx) => write!(f, "{idx}")?,
            }
        }
        Ok(())
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.segments() == other.segments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_path() {
        let root = Path::root();
        let a = root.field("a");
        let b = a.index(2).field("b");
        assert_eq!(b.segments(), vec![PathSegment::Field("a".into()), PathSegment::Index(2), PathSegment::Field("b".into())]);
        assert_eq!(b.to_string(), "a.2.b");
    }

    #[test]
    fn starts_with_checks_prefix() {
        let a = Path::root().field("a");
        let ab = a.field("b");
        assert!(ab.starts_with(&a));
        assert!(!a.starts_with(&ab));
    }
}
