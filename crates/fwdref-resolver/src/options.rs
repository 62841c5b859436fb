//! Resolution options.
//!
//! Options deserialize from camelCase JSON with every field optional:
//!
//! ```json
//! { "maxDepth": 32, "registerSubject": false }
//! ```

use fwdref_common::limits::MAX_HINT_DEPTH;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolveOptions {
    /// Maximum composite nesting followed while resolving one hint.
    pub max_depth: u32,
    /// Bind the subject under its own name before walking, so it can refer
    /// to itself. Turning this off resolves strictly against the table given.
    pub register_subject: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_HINT_DEPTH,
            register_subject: true,
        }
    }
}

impl ResolveOptions {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_register_subject(mut self, register_subject: bool) -> Self {
        self.register_subject = register_subject;
        self
    }
}
