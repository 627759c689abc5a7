//! Newtype identifiers for board entities.
//!
//! Each ID is a transparent string. Freshly minted IDs are ULIDs; IDs coming
//! from the data-fetch layer are taken verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mint a new unique ID
            pub fn new() -> Self {
                Self(Ulid::new().to_string())
            }

            /// Wrap an existing ID string
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the inner string value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifies a column (project) on the board
    ColumnId
);
define_id!(
    /// Identifies a task
    TaskId
);
define_id!(
    /// Identifies a user that can be assigned to tasks
    UserId
);
define_id!(
    /// Identifies a label
    LabelId
);
