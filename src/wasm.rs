//! WebAssembly bindings.
//!
//! Enable with the `wasm` feature:
//!
//! ```toml
//! [dependencies]
//! lww-element-dict = { version = "0.1", features = ["wasm"] }
//! ```
//!
//! The dictionary is exposed to JavaScript as `LWWDict` with string keys,
//! string values and integer timestamps supplied by the caller.

use alloc::string::{String, ToString};

use wasm_bindgen::prelude::*;

use crate::Crdt;

type Inner = crate::LWWDict<String, String, u64>;

/// A last-write-wins dictionary of strings, for use from JavaScript.
#[wasm_bindgen(js_name = LWWDict)]
pub struct WasmLWWDict {
    inner: Inner,
}

#[wasm_bindgen(js_class = LWWDict)]
impl WasmLWWDict {
    /// Create an empty dictionary.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Inner::new(),
        }
    }

    /// Assign `value` to `key` as of `timestamp`.
    pub fn add(&mut self, key: &str, value: &str, timestamp: u64) {
        self.inner
            .add(key.to_string(), value.to_string(), timestamp);
    }

    /// Remove `key` as of `timestamp`.
    pub fn remove(&mut self, key: &str, timestamp: u64) {
        self.inner.remove(key.to_string(), timestamp);
    }

    /// Assign `value` to an existing `key` as of `timestamp`.
    pub fn update(&mut self, key: &str, value: &str, timestamp: u64) {
        self.inner
            .update(key.to_string(), value.to_string(), timestamp);
    }

    /// Get the value of a live key.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.inner.lookup(&key.to_string()).cloned()
    }

    /// Number of live keys.
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.len()
    }

    /// Live keys, in order.
    pub fn keys(&self) -> js_sys::Array {
        self.inner
            .keys()
            .map(|key| JsValue::from_str(key))
            .collect()
    }

    /// Merge another dictionary's state into this one.
    pub fn merge(&mut self, other: &WasmLWWDict) {
        self.inner.merge(&other.inner);
    }

    /// Serialize the full state, tombstones included, as JSON.
    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Restore a dictionary from [`to_json`](Self::to_json) output.
    #[wasm_bindgen(js_name = fromJSON)]
    pub fn from_json(json: &str) -> Result<WasmLWWDict, JsValue> {
        serde_json::from_str(json)
            .map(|inner| Self { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for WasmLWWDict {
    fn default() -> Self {
        Self::new()
    }
}
