use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use opendal::Operator;

use crate::error::Result;

static MEMORY_OPERATORS: OnceLock<Mutex<HashMap<String, Operator>>> = OnceLock::new();

/// Builds an operator for a storage URI.
///
/// `memory://` operators are cached per URI: an in-memory backend keeps its
/// state inside the operator instance, so reconnecting by URI has to hand
/// back the same instance or every reconnect would see an empty store.
pub fn operator_from_uri(uri: &str) -> Result<Operator> {
    if !uri.starts_with("memory://") {
        return Ok(Operator::from_uri(uri)?);
    }

    let cache = MEMORY_OPERATORS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache = match cache.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(op) = cache.get(uri) {
        return Ok(op.clone());
    }
    let op = Operator::from_uri(uri)?;
    cache.insert(uri.to_string(), op.clone());
    Ok(op)
}
