//! Common types used throughout the crate.

use crate::error::{Result, TreeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

/// Depth-first traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Order {
    /// Keys in ascending order
    #[default]
    InOrder,
    /// A node's first key before its subtrees
    PreOrder,
    /// A node's subtrees before its keys
    PostOrder,
}

impl Order {
    /// All orders, in display order
    pub const ALL: [Order; 3] = [Order::InOrder, Order::PreOrder, Order::PostOrder];

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Self::InOrder => "in-order",
            Self::PreOrder => "pre-order",
            Self::PostOrder => "post-order",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Order {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "in" | "inorder" | "in-order" => Ok(Self::InOrder),
            "pre" | "preorder" | "pre-order" => Ok(Self::PreOrder),
            "post" | "postorder" | "post-order" => Ok(Self::PostOrder),
            _ => Err(TreeError::UnknownOrder(s.to_string())),
        }
    }
}

/// Configuration for the HTTP server binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind the listener to
    pub listen_addr: SocketAddr,
}

impl ServerConfig {
    /// Environment variable holding the listen address
    pub const LISTEN_ADDR_VAR: &'static str = "TREE23_LISTEN_ADDR";

    /// Listen address used when the variable is unset
    pub const DEFAULT_LISTEN_ADDR: &'static str = "0.0.0.0:3001";

    /// Load configuration from environment variables.
    ///
    /// Falls back to defaults for unset variables; a set but unparsable
    /// value is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_listen_addr(std::env::var(Self::LISTEN_ADDR_VAR).ok().as_deref())
    }

    fn from_listen_addr(value: Option<&str>) -> Result<Self> {
        let raw = value.unwrap_or(Self::DEFAULT_LISTEN_ADDR);
        let listen_addr = raw.parse::<SocketAddr>().map_err(|e| {
            TreeError::config(Self::LISTEN_ADDR_VAR, format!("'{raw}' is not a socket address: {e}"))
        })?;
        Ok(Self { listen_addr })
    }

    /// Override the listen address
    pub fn listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = addr;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
        }
    }
}
