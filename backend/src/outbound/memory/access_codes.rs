//! Access codes held in memory.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::ports::{AccessCodeLookupError, AccessCodeRegistry};
use crate::domain::{AccessCode, Role};

/// Fixed code table supplied at start-up.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccessCodeRegistry {
    codes: HashMap<String, Role>,
}

impl InMemoryAccessCodeRegistry {
    /// Build a registry from `(code, role)` pairs; surrounding whitespace in
    /// codes is ignored.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = (S, Role)>,
        S: AsRef<str>,
    {
        let codes = codes
            .into_iter()
            .map(|(code, role)| (code.as_ref().trim().to_owned(), role))
            .collect();
        Self { codes }
    }
}

#[async_trait]
impl AccessCodeRegistry for InMemoryAccessCodeRegistry {
    async fn resolve(&self, code: &AccessCode) -> Result<Option<Role>, AccessCodeLookupError> {
        Ok(self.codes.get(code.as_str()).copied())
    }
}
