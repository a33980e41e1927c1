//! JSON decoding for arbitrarily deep documents.

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Decode `json` without serde_json's nesting limit.
///
/// Every DOM level costs two levels of JSON nesting (the node and its
/// `children` array), so real pages routinely exceed the default limit of
/// 128. Recursion grows the stack on demand instead.
pub fn from_str_unbounded<T: DeserializeOwned>(json: &str) -> Result<T, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn nested_arrays(depth: usize) -> String {
        format!("{}{}", "[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn test_decodes_past_default_limit() {
        let json = nested_arrays(1000);
        assert!(serde_json::from_str::<Value>(&json).is_err());
        assert!(from_str_unbounded::<Value>(&json).is_ok());
    }

    #[test]
    fn test_rejects_trailing_data() {
        assert!(from_str_unbounded::<Value>("[] []").is_err());
        assert!(from_str_unbounded::<Value>(" [1] \n").is_ok());
    }

    #[test]
    fn test_reports_syntax_errors() {
        let err = from_str_unbounded::<Value>("{\"a\": }").unwrap_err();
        assert!(err.is_syntax());
    }
}
