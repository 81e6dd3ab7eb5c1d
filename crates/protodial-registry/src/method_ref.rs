//! Parsing of `Service.Method` references.

use std::fmt;

/// A `Service.Method` reference split into its lookup keys.
///
/// Parsing never fails. A reference without a `.` names a service with an
/// empty method, which simply fails to resolve later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRef {
    raw: String,
    service_name: String,
    method_name: String,
}

impl MethodRef {
    /// Splits `raw` on its first `.` and normalises the method part.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (service, method) = raw.split_once('.').unwrap_or((raw, ""));
        Self {
            raw: raw.to_owned(),
            service_name: service.to_owned(),
            method_name: lower_first_char(method),
        }
    }

    /// The reference exactly as supplied.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Service name, matched case-sensitively.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Method identifier with its first character lowercased.
    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.method_name
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Lowercases the first character and leaves the rest untouched.
#[must_use]
pub fn lower_first_char(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
