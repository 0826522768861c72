//! The permission bitmask.
//!
//! Each of the five operations a resource path may support owns exactly one
//! bit. The bit layout is fixed: it appears in configuration files and in the
//! binary serde form, so it must never be reordered.
//!
//! | Flag | Bit | Operation |
//! |------|-----|-----------|
//! | [`LIST`](Permission::LIST) | `1 << 0` | list a collection |
//! | [`POST`](Permission::POST) | `1 << 1` | create an element |
//! | [`GET`](Permission::GET)   | `1 << 2` | retrieve an element |
//! | [`PUT`](Permission::PUT)   | `1 << 3` | replace an element |
//! | [`DEL`](Permission::DEL)   | `1 << 4` | delete an element |

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PermsError, Result};

bitflags! {
    /// A set of operations a caller may perform on a resource.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
    pub struct Permission: u8 {
        /// List all elements of a collection.
        const LIST = 1 << 0;
        /// Create a new element.
        const POST = 1 << 1;
        /// Retrieve an element by id.
        const GET  = 1 << 2;
        /// Replace an element at a given id.
        const PUT  = 1 << 3;
        /// Delete an element at a given id.
        const DEL  = 1 << 4;
    }
}

/// Canonical lowercase names of the base flags, in bit order.
const BASE_NAMES: [(&str, Permission); 5] = [
    ("list", Permission::LIST),
    ("post", Permission::POST),
    ("get", Permission::GET),
    ("put", Permission::PUT),
    ("del", Permission::DEL),
];

impl Permission {
    /// Read-only access: `LIST | GET`.
    pub const READ: Self = Self::LIST.union(Self::GET);

    /// Mutating access: `POST | PUT | DEL`.
    pub const WRITE: Self = Self::POST.union(Self::PUT).union(Self::DEL);

    /// Every operation: `READ | WRITE`.
    pub const ALL: Self = Self::READ.union(Self::WRITE);

    /// The empty set.
    pub const NONE: Self = Self::empty();

    /// Check whether this granted set covers `required`.
    ///
    /// Access is allowed exactly when `required & self == required`, so the
    /// empty requirement is always satisfied.
    pub const fn allows(self, required: Permission) -> bool {
        required.bits() & self.bits() == required.bits()
    }

    /// Build from raw bits, rejecting bits outside the five flags.
    pub fn try_from_bits(bits: u64) -> Result<Self> {
        u8::try_from(bits)
            .ok()
            .and_then(Self::from_bits)
            .ok_or(PermsError::UnknownBits(bits))
    }

    /// Look up a single name (base flag, composite, or alias).
    fn from_text_name(name: &str) -> Option<Self> {
        let perm = match name.to_ascii_lowercase().as_str() {
            "list" => Self::LIST,
            "post" | "create" => Self::POST,
            "get" => Self::GET,
            "put" | "replace" => Self::PUT,
            "del" | "delete" => Self::DEL,
            "read" => Self::READ,
            "write" => Self::WRITE,
            "all" => Self::ALL,
            "none" => Self::NONE,
            _ => return None,
        };
        Some(perm)
    }
}

impl fmt::Display for Permission {
    /// Prints the base flags in bit order separated by `|`, or `none`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for (name, flag) in BASE_NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl FromStr for Permission {
    type Err = PermsError;

    /// Parses `|` or `,` separated names, e.g. `"read | delete"`.
    fn from_str(s: &str) -> Result<Self> {
        let mut perm = Self::NONE;
        for part in s.split(['|', ',']) {
            let name = part.trim();
            if name.is_empty() {
                return Err(PermsError::EmptyName(s.to_string()));
            }
            perm |= Self::from_text_name(name)
                .ok_or_else(|| PermsError::UnknownName(name.to_string()))?;
        }
        Ok(perm)
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_u8(self.bits())
        }
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(PermissionVisitor)
        } else {
            deserializer.deserialize_u8(PermissionVisitor)
        }
    }
}

struct PermissionVisitor;

impl<'de> Visitor<'de> for PermissionVisitor {
    type Value = Permission;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a permission name list such as \"read|put\" or its bit value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Permission, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Permission, E> {
        Permission::try_from_bits(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Permission, E> {
        let bits =
            u64::try_from(v).map_err(|_| E::custom(format!("negative permission bits: {v}")))?;
        self.visit_u64(bits)
    }
}
