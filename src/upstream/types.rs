//! Payload types for the upstream user resource.
//!
//! The upstream schema is not owned by the relay, so records stay generic
//! JSON objects. Key order and record order are both preserved.

use serde_json::{Map, Value};

/// One opaque JSON object from the upstream payload.
pub type UserRecord = Map<String, Value>;

/// Upstream records in upstream order.
pub type UserCollection = Vec<UserRecord>;
