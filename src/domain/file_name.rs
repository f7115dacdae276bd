use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref};

/// Flat name of a file in the shared collection.
///
/// Names never contain a path separator, so joining one onto a storage
/// directory can't escape it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileName(String);

impl FileName {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidFileName> {
        let name = name.into();

        if name.is_empty() || name == "." || name == ".." {
            return Err(InvalidFileName(name));
        }

        if name.contains(['/', '\\', '\0']) {
            return Err(InvalidFileName(name));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for FileName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FileName {
    type Error = InvalidFileName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for FileName {
    type Error = InvalidFileName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FileName> for String {
    fn from(value: FileName) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFileName(pub String);

impl fmt::Display for InvalidFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid file name: {:?}", self.0)
    }
}

impl std::error::Error for InvalidFileName {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_names() {
        for name in ["dust.jpg", "a.txt", ".hidden", "no extension", "..dots"] {
            assert_eq!(FileName::new(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_rejects_paths_and_specials() {
        for name in ["", ".", "..", "a/b", "../etc/passwd", "c:\\x", "nul\0byte"] {
            assert_eq!(FileName::new(name), Err(InvalidFileName(name.to_string())));
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: FileName = serde_json::from_str("\"photo.png\"").unwrap();
        assert_eq!(&*ok, "photo.png");

        assert!(serde_json::from_str::<FileName>("\"../photo.png\"").is_err());
    }
}
