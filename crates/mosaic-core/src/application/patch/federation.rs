//! Module-federation source mutations.
//!
//! These operate on a host's `module-federation.config.js`, its ambient
//! remote type declarations, and its application shell. Semantics follow
//! the anchor-missing policy of the engine: no anchor, no changes, one
//! warning.

use tracing::warn;

use crate::application::patch::imports::add_import;
use crate::application::patch::jsx::find_elements;
use crate::application::patch::scanner::{
    Span, mask_source, matching_bracket, next_code_byte, prev_code_byte, words,
};
use crate::domain::change::StringChange;
use crate::domain::names::Names;

/// Register `app` in the host's `remotes` array.
///
/// Produces a trailing comma for the previous last element plus the new
/// entry. When the config has no `remotes` property, falls back to adding
/// one to the `module.exports` object literal; when that is missing too,
/// returns an empty change set.
pub fn add_remote_to_config(source: &str, app: &str) -> Vec<StringChange> {
    let masked = mask_source(source);

    if let Some(array) = find_property_array(&masked, "remotes") {
        let mut changes = Vec::new();
        if let Some(last) = last_array_element(&masked, array) {
            // Guard against an existing trailing comma (every entry this
            // function inserts carries one).
            let has_comma = next_code_byte(&masked, last.end)
                .is_some_and(|(_, b)| b == b',');
            if !has_comma {
                changes.push(StringChange::insert(last.end, ","));
            }
        }
        changes.push(StringChange::insert(array.end, format!("'{app}',\n")));
        return changes;
    }

    if let Some(object) = module_exports_object(&masked) {
        return vec![StringChange::insert(
            object.end,
            format!("remotes: ['{app}']\n"),
        )];
    }

    warn!(app, "no remotes array or module.exports object found; skipping");
    Vec::new()
}

/// Append the ambient module declaration for `app` at the end of a
/// `remotes.d.ts` file.
pub fn add_remote_definition(source: &str, app: &str) -> Vec<StringChange> {
    vec![StringChange::insert(
        source.len(),
        format!("\ndeclare module '{app}/Module';"),
    )]
}

/// Wire a lazy route (and a nav link, when the shell has one) for a newly
/// generated remote into the host's application shell.
pub fn add_remote_route(source: &str, names: &Names) -> Vec<StringChange> {
    let masked = mask_source(source);
    let routes = find_elements(&masked, "Route");
    if routes.is_empty() {
        warn!(remote = %names.file_name, "no <Route> elements found; skipping route insertion");
        return Vec::new();
    }

    let mut changes = add_import(
        source,
        &format!(
            "const {} = React.lazy(() => import('{}/Module'));",
            names.class_name, names.file_name
        ),
    );
    changes.push(StringChange::insert(
        routes[0].end,
        format!(
            "\n<Route path=\"/{}\" element={{<{} />}} />",
            names.file_name, names.class_name
        ),
    ));

    if let Some(link) = find_elements(&masked, "Link").first() {
        let list_items = find_elements(&masked, "li");
        let enclosing = list_items
            .iter()
            .filter(|li| li.contains(*link))
            .min_by_key(|li| li.end - li.start);
        match enclosing {
            Some(li) => changes.push(StringChange::insert(
                li.end,
                format!(
                    "\n<li><Link to=\"/{}\">{}</Link></li>",
                    names.file_name, names.class_name
                ),
            )),
            None => changes.push(StringChange::insert(
                link.end,
                format!(
                    "\n<Link to=\"/{}\">{}</Link>",
                    names.file_name, names.class_name
                ),
            )),
        }
    }

    changes
}

/// Interior span of the array literal assigned to `property`
/// (`property: [ ... ]`), i.e. between the brackets exclusive.
fn find_property_array(masked: &str, property: &str) -> Option<Span> {
    for word in words(masked).filter(|w| w.text == property) {
        let Some((colon, b':')) = next_code_byte(masked, word.span.end) else {
            continue;
        };
        let Some((open, b'[')) = next_code_byte(masked, colon + 1) else {
            continue;
        };
        if let Some(close) = matching_bracket(masked, open) {
            return Some(Span::new(open + 1, close));
        }
    }
    None
}

/// End-trimmed span of the last element inside an array interior, or
/// `None` for an empty array. Elements are split on top-level commas; a
/// trailing comma yields no extra element.
fn last_array_element(masked: &str, interior: Span) -> Option<Span> {
    let bytes = masked.as_bytes();
    let mut depth = 0usize;
    let mut start = interior.start;
    let mut last: Option<Span> = None;
    let push = |from: usize, to: usize, last: &mut Option<Span>| {
        if let Some((end, _)) = prev_code_byte(masked, to) {
            if end >= from {
                *last = Some(Span::new(from, end + 1));
            }
        }
    };
    for i in interior.start..interior.end {
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                push(start, i, &mut last);
                start = i + 1;
            }
            _ => {}
        }
    }
    push(start, interior.end, &mut last);
    last
}

/// Interior end of the object literal assigned to `module.exports`.
fn module_exports_object(masked: &str) -> Option<Span> {
    let tokens: Vec<_> = words(masked).collect();
    for pair in tokens.windows(2) {
        if pair[0].text != "module" || pair[1].text != "exports" {
            continue;
        }
        let Some((dot, b'.')) = next_code_byte(masked, pair[0].span.end) else {
            continue;
        };
        if dot != pair[1].span.start - 1 {
            continue;
        }
        let Some((eq, b'=')) = next_code_byte(masked, pair[1].span.end) else {
            continue;
        };
        let Some((open, b'{')) = next_code_byte(masked, eq + 1) else {
            continue;
        };
        if let Some(close) = matching_bracket(masked, open) {
            return Some(Span::new(open + 1, close));
        }
    }
    None
}
