//! Pinned versions for generated dependency entries.
//!
//! Single source of truth: generators never inline a version string.

pub const REACT_VERSION: &str = "18.2.0";
pub const REACT_DOM_VERSION: &str = "18.2.0";
pub const REACT_ROUTER_DOM_VERSION: &str = "6.11.2";
pub const TYPES_REACT_VERSION: &str = "18.0.28";
pub const TYPES_REACT_DOM_VERSION: &str = "18.0.11";

pub const EXPRESS_VERSION: &str = "4.18.2";
pub const TYPES_EXPRESS_VERSION: &str = "4.17.17";
pub const FASTIFY_VERSION: &str = "4.15.0";
pub const KOA_VERSION: &str = "2.14.1";
pub const TYPES_KOA_VERSION: &str = "2.13.6";

pub const ESBUILD_VERSION: &str = "0.17.17";
pub const WEBPACK_VERSION: &str = "5.80.0";

pub const JEST_VERSION: &str = "29.4.3";
pub const TYPES_JEST_VERSION: &str = "29.4.0";
pub const ESLINT_VERSION: &str = "8.38.0";

pub const TYPESCRIPT_VERSION: &str = "5.0.4";
pub const TSLIB_VERSION: &str = "2.5.0";
