//! HTTP methods that scope a trie.
//!
//! Each method owns an isolated trie: a segment registered for `GET` is never
//! suggested while the user is typing a `POST` request.

use std::fmt;
use std::str::FromStr;

/// One of the five HTTP methods the matcher keeps a trie for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    /// `HEAD`
    Head,
    /// `GET`
    Get,
    /// `PUT`
    Put,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
}

impl Method {
    /// All supported methods, in registry order.
    pub const ALL: [Method; 5] = [
        Method::Head,
        Method::Get,
        Method::Put,
        Method::Post,
        Method::Delete,
    ];

    /// The upper-case wire name (`"GET"`, `"POST"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Head => "HEAD",
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }

    /// Position of this method in [`Method::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a method name outside [`Method::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedMethod(pub String);

impl fmt::Display for UnsupportedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported method \"{}\", expected one of HEAD, GET, PUT, POST, DELETE",
            self.0
        )
    }
}

impl std::error::Error for UnsupportedMethod {}

impl FromStr for Method {
    type Err = UnsupportedMethod;

    /// Method names are matched exactly; `"get"` is not `GET`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HEAD" => Ok(Self::Head),
            "GET" => Ok(Self::Get),
            "PUT" => Ok(Self::Put),
            "POST" => Ok(Self::Post),
            "DELETE" => Ok(Self::Delete),
            other => Err(UnsupportedMethod(other.to_owned())),
        }
    }
}
