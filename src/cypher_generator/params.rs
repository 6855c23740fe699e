//! Parameter binding
//!
//! Every literal that ends up in a compiled statement goes through a
//! [`ParamBinder`]: the text only ever contains `$name` placeholders.
//! A binder lives for exactly one compile call and is shared by every
//! clause of that statement, so names never clash across clauses.

use serde_json::Value;

use super::common::sanitize_param_name;

/// Parameter map of a compiled statement, in binding order.
pub type Parameters = serde_json::Map<String, Value>;

/// Allocates collision-free parameter names and records their values.
#[derive(Debug, Default)]
pub struct ParamBinder {
    params: Parameters,
}

impl ParamBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` under `base`, or `base_1`, `base_2`, ... when taken.
    /// Returns the name actually used.
    pub fn bind(&mut self, base: &str, value: Value) -> String {
        let base = sanitize_param_name(base);
        let name = if self.params.contains_key(&base) {
            (1..)
                .map(|i| format!("{}_{}", base, i))
                .find(|candidate| !self.params.contains_key(candidate))
                .unwrap_or_default()
        } else {
            base
        };
        self.params.insert(name.clone(), value);
        name
    }

    /// Bind under an exact name, overwriting any previous value.
    ///
    /// Only for names a statement can contain at most once (`skip`, `limit`, `id`, ...).
    pub fn bind_fixed(&mut self, name: &str, value: Value) -> String {
        self.params.insert(name.to_string(), value);
        name.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn into_params(self) -> Parameters {
        self.params
    }
}
