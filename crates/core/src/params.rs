//! Typed, forgiving access to a JSON params object.
//!
//! Effects accept their tuning constants (band counts, stagger, connection
//! radius, ...) as a `serde_json::Value`. [`ParamReader`] pulls typed values
//! out of it, falling back to the caller's default whenever a key is missing
//! or has the wrong type. Lookups never fail.

use serde_json::Value;

/// Read-only view over a params object.
#[derive(Debug, Clone, Copy)]
pub struct ParamReader<'a> {
    params: &'a Value,
}

impl<'a> ParamReader<'a> {
    pub fn new(params: &'a Value) -> Self {
        Self { params }
    }

    /// Number at `name` (integers accepted), or `default`.
    ///
    /// Non-finite values are treated as missing.
    pub fn f64(&self, name: &str, default: f64) -> f64 {
        self.params
            .get(name)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }

    /// Number at `name` clamped into `[min, max]`, or `default`.
    pub fn f64_in(&self, name: &str, default: f64, min: f64, max: f64) -> f64 {
        self.f64(name, default).clamp(min, max)
    }

    /// Non-negative integer at `name`, or `default`.
    pub fn usize(&self, name: &str, default: usize) -> usize {
        self.params
            .get(name)
            .and_then(Value::as_u64)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(default)
    }

    /// Non-negative integer at `name` clamped to `max`, or `default`.
    ///
    /// Used for counts that drive per-frame work so a params typo cannot
    /// request millions of particles.
    pub fn count(&self, name: &str, default: usize, max: usize) -> usize {
        self.usize(name, default).min(max)
    }

    /// Boolean at `name`, or `default`.
    pub fn bool(&self, name: &str, default: bool) -> bool {
        self.params
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// String at `name`, or `default`.
    pub fn string(&self, name: &str, default: &str) -> String {
        self.params
            .get(name)
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| default.to_owned())
    }
}

/// Short JSON type name, used in type-mismatch errors.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn f64_reads_floats_and_integers() {
        let params = json!({"speed": 2.5, "count": 10});
        let p = ParamReader::new(&params);
        assert_eq!(p.f64("speed", 1.0), 2.5);
        assert_eq!(p.f64("count", 0.0), 10.0);
    }

    #[test]
    fn f64_falls_back_on_missing_wrong_type_and_null() {
        let params = json!({"speed": "fast", "gone": null});
        let p = ParamReader::new(&params);
        assert_eq!(p.f64("speed", 1.0), 1.0);
        assert_eq!(p.f64("gone", 5.0), 5.0);
        assert_eq!(p.f64("absent", 3.0), 3.0);
    }

    #[test]
    fn f64_in_clamps_to_range() {
        let params = json!({"stagger": 4.0});
        let p = ParamReader::new(&params);
        assert_eq!(p.f64_in("stagger", 0.012, 0.0, 0.2), 0.2);
        assert_eq!(p.f64_in("missing", 0.012, 0.0, 0.2), 0.012);
    }

    #[test]
    fn usize_rejects_floats_and_negatives() {
        let params = json!({"a": 2.5, "b": -1, "c": 7});
        let p = ParamReader::new(&params);
        assert_eq!(p.usize("a", 99), 99);
        assert_eq!(p.usize("b", 5), 5);
        assert_eq!(p.usize("c", 0), 7);
    }

    #[test]
    fn count_caps_large_requests() {
        let params = json!({"points": 1_000_000});
        assert_eq!(ParamReader::new(&params).count("points", 42, 512), 512);
    }

    #[test]
    fn bool_and_string_fall_back_on_wrong_type() {
        let params = json!({"enabled": 1, "name": 42, "label": "ok"});
        let p = ParamReader::new(&params);
        assert!(!p.bool("enabled", false));
        assert_eq!(p.string("name", "fallback"), "fallback");
        assert_eq!(p.string("label", "x"), "ok");
    }

    #[test]
    fn non_object_params_yield_defaults() {
        let params = json!("not an object");
        let p = ParamReader::new(&params);
        assert_eq!(p.f64("speed", 7.0), 7.0);
        assert_eq!(p.usize("points", 3), 3);
    }

    #[test]
    fn json_type_names_cover_all_kinds() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!([1])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
        assert_eq!(json_type_name(&json!("s")), "string");
    }
}
