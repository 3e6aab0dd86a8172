use astra::Request;
use serde_json::{Map, Value};

use crate::db::connection::Database;
use crate::errors::ServerError;
use crate::responses::{html_response, ResultResp};
use crate::templates::pages;

pub fn handle(req: Request, db: &Database) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") => html_response(pages::home_page(db)),
        ("GET", "/properties") => {
            let raw = attribute_map(&req);
            html_response(pages::properties_page(db, &raw))
        }
        _ => Err(ServerError::NotFound),
    }
}

/// Query-string parameters become the raw attribute map the normalizer
/// consumes. Values arrive as strings and bare parameters as `true`;
/// coercion is the normalizer's job, not the router's.
fn attribute_map(req: &Request) -> Map<String, Value> {
    let mut map = Map::new();

    if let Some(q) = req.uri().query() {
        for pair in q.split('&') {
            let mut parts = pair.splitn(2, '=');
            let Some(k) = parts.next().filter(|k| !k.is_empty()) else {
                continue;
            };
            let key = percent_decode(k);
            // A bare `?featuredOnly` counts as switching the flag on.
            match parts.next() {
                Some(v) => map.insert(key, Value::String(percent_decode(v))),
                None => map.insert(key, Value::Bool(true)),
            };
        }
    }

    map
}

/// Minimal %XX + '+' decoding for query keys and values; invalid
/// sequences pass through untouched.
fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hex = (
                    bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16)),
                    bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16)),
                );
                if let (Some(h), Some(l)) = hex {
                    out.push((h * 16 + l) as u8);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_decoding_handles_spaces_and_escapes() {
        assert_eq!(percent_decode("sq+ft"), "sq ft");
        assert_eq!(percent_decode("sq%20ft"), "sq ft");
        assert_eq!(percent_decode("for-sale"), "for-sale");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%GG"), "%GG");
    }

    #[test]
    fn attribute_map_decodes_keys_and_keeps_bare_flags() {
        let req = http::Request::builder()
            .uri("/properties?%70ricePrefix=%24&featuredOnly&=orphan&&columns=2")
            .body(astra::Body::empty())
            .unwrap();

        let map = attribute_map(&req);
        assert_eq!(map.get("pricePrefix"), Some(&Value::String("$".into())));
        assert_eq!(map.get("featuredOnly"), Some(&Value::Bool(true)));
        assert_eq!(map.get("columns"), Some(&Value::String("2".into())));
        assert!(!map.contains_key(""));
    }
}
