//! Placeholder substitution
//!
//! A single left-to-right pass: replacement values are copied to the output
//! and never scanned again, so a value that itself looks like a placeholder
//! stays as written.
//!
//! Substituting a second time leaves the output unchanged only when no value
//! contains a placeholder for a bound key. [`check_params`] enforces that and
//! [`render`](super::render) calls it before touching the document.

use super::model::{Document, ParameterMap, PlaceholderSyntax};
use crate::errors::{Result, StackError};

/// Reject maps where a value contains a placeholder for a bound key
///
/// # Errors
/// * `RecursiveParameter` - naming the first such key in key order
pub fn check_params(params: &ParameterMap, syntax: PlaceholderSyntax) -> Result<()> {
    for key in params.keys() {
        let value = params.get(key).unwrap_or_default();
        let (_, replacements) = match syntax {
            PlaceholderSyntax::Braces => substitute_braces(value, params),
            PlaceholderSyntax::Dollar => substitute_dollar(value, params),
        };
        if replacements > 0 {
            return Err(StackError::RecursiveParameter {
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

/// Replace placeholders bound to keys of `params`
///
/// Unbound placeholders are copied unchanged. Values are inserted as-is even
/// when they contain placeholders; see [`check_params`].
pub fn substitute(document: &Document, params: &ParameterMap, syntax: PlaceholderSyntax) -> Document {
    if params.is_empty() {
        return document.clone();
    }

    let (output, replacements) = match syntax {
        PlaceholderSyntax::Braces => substitute_braces(document.as_str(), params),
        PlaceholderSyntax::Dollar => substitute_dollar(document.as_str(), params),
    };

    tracing::debug!(replacements, ?syntax, "substituted placeholders");

    Document::new(output)
}

fn substitute_braces(text: &str, params: &ParameterMap) -> (String, usize) {
    let mut output = String::with_capacity(text.len());
    let mut replacements = 0;
    let mut rest = text;

    while let Some(open) = rest.find("{{") {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        let bound = after_open
            .find("}}")
            .and_then(|close| params.get(after_open[..close].trim()).map(|v| (close, v)));

        match bound {
            Some((close, value)) => {
                output.push_str(value);
                replacements += 1;
                rest = &after_open[close + 2..];
            }
            None => {
                output.push_str("{{");
                rest = after_open;
            }
        }
    }
    output.push_str(rest);

    (output, replacements)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn substitute_dollar(text: &str, params: &ParameterMap) -> (String, usize) {
    let mut output = String::with_capacity(text.len());
    let mut replacements = 0;
    let mut rest = text;

    while let Some(dollar) = rest.find('$') {
        output.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];

        // ${key}
        if let Some(braced) = after.strip_prefix('{') {
            if let Some(close) = braced.find('}') {
                if let Some(value) = params.get(&braced[..close]) {
                    output.push_str(value);
                    replacements += 1;
                    rest = &braced[close + 1..];
                    continue;
                }
            }
            output.push('$');
            rest = after;
            continue;
        }

        // $key
        let ident_len = match after.chars().next() {
            Some(c) if is_ident_start(c) => after
                .find(|c: char| !is_ident_continue(c))
                .unwrap_or(after.len()),
            _ => 0,
        };
        match params.get(&after[..ident_len]).filter(|_| ident_len > 0) {
            Some(value) => {
                output.push_str(value);
                replacements += 1;
            }
            None => {
                output.push('$');
                output.push_str(&after[..ident_len]);
            }
        }
        rest = &after[ident_len..];
    }
    output.push_str(rest);

    (output, replacements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braces_with_and_without_whitespace() {
        let params = ParameterMap::new().with("region", "us-west-2");
        let doc = Document::from("a={{region}} b={{ region }}");
        let out = substitute(&doc, &params, PlaceholderSyntax::Braces);
        assert_eq!(out.as_str(), "a=us-west-2 b=us-west-2");
    }

    #[test]
    fn test_braces_unbound_left_verbatim() {
        let params = ParameterMap::new().with("region", "x");
        let doc = Document::from("{{ other }} and {{unterminated");
        let out = substitute(&doc, &params, PlaceholderSyntax::Braces);
        assert_eq!(out, doc);
    }

    #[test]
    fn test_dollar_bare_and_braced() {
        let params = ParameterMap::new().with("FOO", "1").with("BAR", "2");
        let doc = Document::from("$FOO-${BAR}-$FOOD-$");
        let out = substitute(&doc, &params, PlaceholderSyntax::Dollar);
        assert_eq!(out.as_str(), "1-2-$FOOD-$");
    }

    #[test]
    fn test_dollar_unresolved_is_inert() {
        let params = ParameterMap::new().with("BAR", "2");
        let doc = Document::from("X=$FOO");
        let out = substitute(&doc, &params, PlaceholderSyntax::Dollar);
        assert_eq!(out.as_str(), "X=$FOO");
    }

    #[test]
    fn test_no_recursive_expansion() {
        let params = ParameterMap::new().with("a", "{{a}}");
        let doc = Document::from("x{{a}}y");
        let out = substitute(&doc, &params, PlaceholderSyntax::Braces);
        assert_eq!(out.as_str(), "x{{a}}y");
    }

    #[test]
    fn test_check_params_rejects_value_naming_bound_key() {
        let params = ParameterMap::new().with("a", "{{b}}").with("b", "B");
        assert_eq!(
            check_params(&params, PlaceholderSyntax::Braces),
            Err(StackError::RecursiveParameter {
                key: "a".to_string()
            })
        );
        // Same map is harmless when placeholders use the other syntax
        assert!(check_params(&params, PlaceholderSyntax::Dollar).is_ok());
    }

    #[test]
    fn test_check_params_allows_unbound_runtime_variables() {
        let params = ParameterMap::new()
            .with("logStreamName", "$NODE_NAME")
            .with("awsRegion", "us-west-2");
        assert!(check_params(&params, PlaceholderSyntax::Dollar).is_ok());
        assert!(check_params(&params, PlaceholderSyntax::Braces).is_ok());
    }

    #[test]
    fn test_value_containing_downstream_placeholder_survives() {
        let params = ParameterMap::new().with("logStreamName", "$NODE_NAME");
        let doc = Document::from("stream: ${logStreamName}");
        let out = substitute(&doc, &params, PlaceholderSyntax::Dollar);
        assert_eq!(out.as_str(), "stream: $NODE_NAME");
    }
}
