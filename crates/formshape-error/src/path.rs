use core::fmt::Display;

use thisisplural::Plural;

/// Address of a (possibly nested) form field.
///
/// Displays as the dotted join of its segments: `contacts.0.email`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, new)]
pub struct FieldPath(pub Vec<PathSegment>);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object field name
    Key(String),
    /// Array element index
    Index(usize),
}

/// Errors produced when a submitted field name cannot be read as a path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldNameError {
    #[error("empty segment in field name '{name}'")]
    EmptySegment { name: String },

    #[error("unclosed bracket in field name '{name}'")]
    UnclosedBracket { name: String },

    #[error("unexpected '{found}' at byte {position} in field name '{name}'")]
    UnexpectedCharacter {
        name: String,
        position: usize,
        found: char,
    },
}

impl FieldPath {
    /// The empty path, used for form-level errors.
    pub fn root() -> Self {
        FieldPath(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn key(key: impl Into<String>) -> Self {
        FieldPath(vec![PathSegment::Key(key.into())])
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.0.push(PathSegment::Key(key.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.0.push(PathSegment::Index(index));
    }

    /// Segments as strings, for schema lookups.
    pub fn segment_strings(&self) -> Vec<String> {
        self.0.iter().map(|segment| segment.to_string()).collect()
    }

    /// Read a submitted field name.
    ///
    /// Accepts dotted (`contacts.0.email`), bracketed (`contacts[0][email]`)
    /// and mixed (`contacts[0].email`) notation. All-digit segments become
    /// [`PathSegment::Index`]. A trailing `[]` (multi-value marker) is ignored.
    pub fn parse_name(name: &str) -> Result<Self, FieldNameError> {
        let empty = || FieldNameError::EmptySegment {
            name: name.to_string(),
        };
        let mut path = FieldPath::root();
        let bytes = name.as_bytes();

        let head_end = name.find(['.', '[']).unwrap_or(name.len());
        if head_end == 0 {
            return Err(empty());
        }
        path.0.push(PathSegment::parse(&name[..head_end]));
        let mut pos = head_end;

        while pos < bytes.len() {
            match bytes[pos] {
                b'.' => {
                    let start = pos + 1;
                    let end = name[start..]
                        .find(['.', '['])
                        .map_or(name.len(), |offset| start + offset);
                    if end == start {
                        return Err(empty());
                    }
                    path.0.push(PathSegment::parse(&name[start..end]));
                    pos = end;
                }
                b'[' => {
                    let start = pos + 1;
                    let Some(offset) = name[start..].find(']') else {
                        return Err(FieldNameError::UnclosedBracket {
                            name: name.to_string(),
                        });
                    };
                    let end = start + offset;
                    if end == start {
                        if end + 1 == name.len() {
                            break;
                        }
                        return Err(empty());
                    }
                    path.0.push(PathSegment::parse(&name[start..end]));
                    pos = end + 1;
                }
                _ => {
                    let found = name[pos..].chars().next().unwrap_or_default();
                    return Err(FieldNameError::UnexpectedCharacter {
                        name: name.to_string(),
                        position: pos,
                        found,
                    });
                }
            }
        }
        Ok(path)
    }
}

impl PathSegment {
    fn parse(segment: &str) -> Self {
        let canonical = segment == "0" || !segment.starts_with('0');
        if canonical && segment.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = segment.parse() {
                return PathSegment::Index(index);
            }
        }
        PathSegment::Key(segment.to_string())
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}
