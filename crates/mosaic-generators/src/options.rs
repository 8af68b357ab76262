//! Option enums shared across generators.
//!
//! Each generator defines its own schema struct with exactly the options
//! it recognizes; there is no free-form options bag, so an unknown option
//! cannot be silently ignored — it simply does not typecheck (or, at the
//! CLI boundary, clap rejects the flag).

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use mosaic_core::domain::error::DomainError;

/// Which linter a generated project gets wired up with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Linter {
    #[default]
    Eslint,
    None,
}

impl Linter {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eslint => "eslint",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Linter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Linter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eslint" => Ok(Self::Eslint),
            "none" => Ok(Self::None),
            other => Err(DomainError::InvalidOption {
                option: "linter",
                reason: format!("unknown linter '{other}' (expected eslint or none)"),
            }),
        }
    }
}

/// Which unit test runner a generated project gets wired up with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnitTestRunner {
    #[default]
    Jest,
    None,
}

impl UnitTestRunner {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jest => "jest",
            Self::None => "none",
        }
    }
}

impl fmt::Display for UnitTestRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitTestRunner {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jest" => Ok(Self::Jest),
            "none" => Ok(Self::None),
            other => Err(DomainError::InvalidOption {
                option: "unitTestRunner",
                reason: format!("unknown test runner '{other}' (expected jest or none)"),
            }),
        }
    }
}

/// Bundler for Node applications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Bundler {
    #[default]
    Esbuild,
    Webpack,
}

impl Bundler {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Esbuild => "esbuild",
            Self::Webpack => "webpack",
        }
    }
}

impl fmt::Display for Bundler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bundler {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "esbuild" => Ok(Self::Esbuild),
            "webpack" => Ok(Self::Webpack),
            other => Err(DomainError::InvalidOption {
                option: "bundler",
                reason: format!("unknown bundler '{other}' (expected esbuild or webpack)"),
            }),
        }
    }
}

/// HTTP framework for Node applications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeFramework {
    #[default]
    Express,
    Fastify,
    Koa,
    None,
}

impl NodeFramework {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Express => "express",
            Self::Fastify => "fastify",
            Self::Koa => "koa",
            Self::None => "none",
        }
    }
}

impl fmt::Display for NodeFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "express" => Ok(Self::Express),
            "fastify" => Ok(Self::Fastify),
            "koa" => Ok(Self::Koa),
            "none" => Ok(Self::None),
            other => Err(DomainError::InvalidOption {
                option: "framework",
                reason: format!(
                    "unknown framework '{other}' (expected express, fastify, koa or none)"
                ),
            }),
        }
    }
}

/// Parse a comma-separated tag list into a set.
pub fn parse_tags(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
