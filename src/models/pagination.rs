//! List response shapes.
//!
//! Collection endpoints answer either with a bare JSON array or with the
//! paginated envelope `{count, next, previous, results}`. Both are decoded
//! into one [`ListResponse`] and normalized by [`ListResponse::into_items`].

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// The paginated envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListResponse<T> {
    Plain(Vec<T>),
    Paginated(Page<T>),
    /// Anything else: an object without `results`, a scalar, `null`.
    Unrecognized,
}

impl<T: DeserializeOwned> ListResponse<T> {
    /// Classify a decoded JSON body.
    ///
    /// A body that is neither a list nor an envelope becomes
    /// `Unrecognized`. A list or envelope whose items do not decode as `T`
    /// is an error.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let is_page = value.get("results").is_some_and(|r| r.is_array());
        match value {
            serde_json::Value::Array(_) => Ok(ListResponse::Plain(serde_json::from_value(value)?)),
            serde_json::Value::Object(_) if is_page => {
                Ok(ListResponse::Paginated(serde_json::from_value(value)?))
            }
            _ => Ok(ListResponse::Unrecognized),
        }
    }
}

impl<T> ListResponse<T> {
    /// The items of the response: the array itself, the envelope's
    /// `results`, or nothing.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Plain(items) => items,
            ListResponse::Paginated(page) => page.results,
            ListResponse::Unrecognized => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        id: i64,
    }

    #[test]
    fn bare_array_is_returned_unchanged() {
        let resp = ListResponse::<Item>::from_value(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert!(matches!(resp, ListResponse::Plain(_)));
        assert_eq!(resp.into_items(), vec![Item { id: 1 }, Item { id: 2 }]);
    }

    #[test]
    fn envelope_yields_results() {
        let resp = ListResponse::<Item>::from_value(json!({
            "count": 40,
            "next": "http://localhost:8000/api/repositorios/?page=2",
            "previous": null,
            "results": [{"id": 7}]
        }))
        .unwrap();
        assert!(matches!(resp, ListResponse::Paginated(ref p) if p.count == 40));
        assert_eq!(resp.into_items(), vec![Item { id: 7 }]);
    }

    #[test]
    fn anything_else_is_empty() {
        for body in [
            json!({"detail": "nope"}),
            json!({"results": "not a list"}),
            json!(null),
            json!(42),
            json!("text"),
        ] {
            let resp = ListResponse::<Item>::from_value(body).unwrap();
            assert_eq!(resp, ListResponse::Unrecognized);
            assert!(resp.into_items().is_empty());
        }
    }

    #[test]
    fn normalizing_twice_is_stable() {
        let body = json!({"results": [{"id": 3}]});
        let first = ListResponse::<Item>::from_value(body.clone()).unwrap().into_items();
        let second = ListResponse::<Item>::from_value(body).unwrap().into_items();
        assert_eq!(first, second);
    }

    #[test]
    fn undecodable_items_are_an_error() {
        assert!(ListResponse::<Item>::from_value(json!([{"id": 1}, {"id": "x"}])).is_err());
        assert!(ListResponse::<Item>::from_value(json!({"results": [{"name": "drift"}]})).is_err());
    }
}
