use crate::tree::IPC2581_NAMESPACE;

/// What to do when a dictionary id appears twice in the same table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateIdPolicy {
    /// Later entry replaces the earlier one, reported as a diagnostic
    #[default]
    Overwrite,
    /// Fail the whole build with [`crate::Ipc2581Error::DuplicateId`]
    Reject,
}

/// Knobs for building a [`crate::Document`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Namespace every element lookup is made in. Empty matches elements
    /// without a namespace.
    pub namespace: String,
    pub duplicate_ids: DuplicateIdPolicy,
    /// Check the trailing MD5 checksum when parsing from text
    pub verify_checksum: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            namespace: IPC2581_NAMESPACE.to_string(),
            duplicate_ids: DuplicateIdPolicy::default(),
            verify_checksum: true,
        }
    }
}

impl ParseOptions {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_duplicate_ids(mut self, policy: DuplicateIdPolicy) -> Self {
        self.duplicate_ids = policy;
        self
    }

    pub fn with_checksum_verification(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }
}
