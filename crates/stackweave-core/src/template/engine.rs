//! Marker-pair toggling
//!
//! Every directive's regions are located against the input document, the
//! byte ranges to delete are collected into one set, and the output is the
//! input minus that set. The result therefore never depends on the order of
//! directives. Overlapping regions of different markers are not validated:
//! their ranges are simply merged.

use super::model::{Document, MarkerPair, ParameterMap, PlaceholderSyntax, Region, ToggleDirective};
use super::substitute::{check_params, substitute};
use crate::errors::{Result, StackError};

/// Locate every occurrence of `marker` in `document`
///
/// Occurrences are matched left to right: each start token pairs with the
/// first end token after it, and the search resumes after that end token.
/// An end token with no start token before it is ignored.
///
/// # Errors
/// * `MalformedTemplate` - a start token has no end token after it, or the
///   marker has an empty token
pub fn find_regions(document: &Document, marker: &MarkerPair) -> Result<Vec<Region>> {
    if marker.start.is_empty() || marker.end.is_empty() {
        return Err(StackError::MalformedTemplate {
            marker: marker.name.clone(),
            token: String::new(),
        });
    }

    let text = document.as_str();
    let mut regions = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find(&marker.start) {
        let start = cursor + offset;
        let interior_start = start + marker.start.len();
        let interior_end = text[interior_start..]
            .find(&marker.end)
            .map(|offset| interior_start + offset)
            .ok_or_else(|| StackError::MalformedTemplate {
                marker: marker.name.clone(),
                token: marker.start.clone(),
            })?;
        let end = interior_end + marker.end.len();

        regions.push(Region {
            start,
            interior_start,
            interior_end,
            end,
        });
        cursor = end;
    }

    Ok(regions)
}

/// Byte ranges a directive deletes from the input
fn deletions(document: &Document, directive: &ToggleDirective) -> Result<Vec<(usize, usize)>> {
    let regions = find_regions(document, &directive.marker)?;

    tracing::debug!(
        marker = %directive.marker.name,
        region_count = regions.len(),
        keep_interior = directive.keep_interior,
        "resolved toggle directive"
    );

    let mut ranges = Vec::with_capacity(regions.len() * 2);
    for region in regions {
        if directive.keep_interior {
            ranges.push((region.start, region.interior_start));
            ranges.push((region.interior_end, region.end));
        } else {
            ranges.push((region.start, region.end));
        }
    }
    Ok(ranges)
}

/// Copy `text` skipping the given byte ranges (unsorted, possibly overlapping)
fn excise(text: &str, mut ranges: Vec<(usize, usize)>) -> String {
    ranges.sort_unstable();

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end) in ranges {
        if start > cursor {
            output.push_str(&text[cursor..start]);
        }
        cursor = cursor.max(end);
    }
    output.push_str(&text[cursor..]);
    output
}

/// Apply toggle directives without substituting parameters
///
/// # Errors
/// * `MalformedTemplate` - see [`find_regions`]
pub fn apply_toggles(document: &Document, directives: &[ToggleDirective]) -> Result<Document> {
    let mut ranges = Vec::new();
    for directive in directives {
        ranges.extend(deletions(document, directive)?);
    }

    if ranges.is_empty() {
        return Ok(document.clone());
    }
    Ok(Document::new(excise(document.as_str(), ranges)))
}

/// Apply a single toggle directive
///
/// # Errors
/// * `MalformedTemplate` - see [`find_regions`]
pub fn toggle(document: &Document, directive: &ToggleDirective) -> Result<Document> {
    apply_toggles(document, std::slice::from_ref(directive))
}

/// Render a template: apply all directives, then substitute parameters
///
/// Placeholders with no entry in `params` are left verbatim. Either the whole
/// render succeeds or nothing is produced.
///
/// # Errors
/// * `RecursiveParameter` - a value contains a placeholder for a bound key
/// * `MalformedTemplate` - a directive's start token is unmatched
pub fn render(
    document: &Document,
    directives: &[ToggleDirective],
    params: &ParameterMap,
    syntax: PlaceholderSyntax,
) -> Result<Document> {
    check_params(params, syntax)?;
    let toggled = apply_toggles(document, directives)?;
    Ok(substitute(&toggled, params, syntax))
}

/// [`render`] with `{{key}}` placeholders
///
/// # Errors
/// * `MalformedTemplate` - a directive's start token is unmatched
pub fn render_default(
    document: &Document,
    directives: &[ToggleDirective],
    params: &ParameterMap,
) -> Result<Document> {
    render(document, directives, params, PlaceholderSyntax::Braces)
}
