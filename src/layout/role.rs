//! Role codes tagging each position of a stripe
//!
//! A role code is a small signed integer. For a code with `L` local groups:
//!
//! - `1..=L` is a data block of local group `code`
//! - `L+1..=2L` is the local parity of group `code - L`
//! - [`RoleCode::GLOBAL_PARITY`] is a global parity block
//! - [`RoleCode::EMPTY`] is the unassigned slot every stripe carries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of one stripe position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCode(i32);

/// Decoded form of a [`RoleCode`] for a given number of local groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Data block of a 1-based local group
    Data { group: usize },
    /// Local parity of a 1-based local group
    LocalParity { group: usize },
    GlobalParity,
    Empty,
    /// A code outside the range this layout produces
    Unknown,
}

impl RoleCode {
    pub const GLOBAL_PARITY: RoleCode = RoleCode(-1);
    pub const EMPTY: RoleCode = RoleCode(-2);

    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Data block code of a 1-based local group
    pub fn data(group: usize) -> Self {
        Self(group as i32)
    }

    /// Local parity code of a 1-based local group
    pub fn local_parity(group: usize, local_groups: usize) -> Self {
        Self((group + local_groups) as i32)
    }

    /// True for data and local-parity codes
    #[inline]
    pub fn is_member(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub fn is_global_parity(self) -> bool {
        self == Self::GLOBAL_PARITY
    }

    pub fn role(self, local_groups: usize) -> Role {
        let l = local_groups as i32;
        match self.0 {
            c if c >= 1 && c <= l => Role::Data { group: c as usize },
            c if c > l && c <= 2 * l => Role::LocalParity {
                group: (c - l) as usize,
            },
            -1 => Role::GlobalParity,
            -2 => Role::Empty,
            _ => Role::Unknown,
        }
    }

    /// Short label for renderers: `D<g>`, `L<g>`, `G`, `E`
    pub fn label(self, local_groups: usize) -> String {
        match self.role(local_groups) {
            Role::Data { group } => format!("D{}", group),
            Role::LocalParity { group } => format!("L{}", group),
            Role::GlobalParity => "G".to_string(),
            Role::Empty => "E".to_string(),
            Role::Unknown => format!("?{}", self.0),
        }
    }
}

impl fmt::Display for RoleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::GLOBAL_PARITY => write!(f, "G"),
            Self::EMPTY => write!(f, "E"),
            Self(c) => write!(f, "{}", c),
        }
    }
}
