use std::fmt;

use uuid::Uuid;

/// Opaque revision token of the seat table. Only ever compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// A fresh token guaranteed to differ from `self`.
    pub fn next(&self) -> Self {
        loop {
            let candidate = Self::generate();
            if candidate != *self {
                return candidate;
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, expected: &str) -> bool {
        self.0 == expected
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
