//! Read-only views of a tree: nested maps and indented text

use crate::token::{Token, NEGATED};
use crate::tree::Tree;
use serde_json::{Map, Value};
use std::borrow::Cow;

impl Token {
    /// `{identity: {...children}}` for blocks, `{name: scalar}` for leaves.
    ///
    /// A leaf with params becomes `[value, params...]`; a leaf without a
    /// value becomes `""`.
    pub fn to_nested_map(&self) -> Value {
        let mut map = Map::new();
        self.project_into(&mut map);
        Value::Object(map)
    }

    fn project_into(&self, map: &mut Map<String, Value>) {
        if self.is_block() {
            let mut inner = Map::new();
            for child in &self.children {
                child.project_into(&mut inner);
            }
            map.insert(self.identity(), Value::Object(inner));
        } else if !self.params.is_empty() {
            let items = self
                .value
                .iter()
                .chain(self.params.iter())
                .map(|s| Value::String(s.clone()))
                .collect();
            map.insert(self.name.clone(), Value::Array(items));
        } else {
            let value = self.value.clone().unwrap_or_default();
            map.insert(self.name.clone(), Value::String(value));
        }
    }

    /// One line per node, children indented by `step` spaces per level.
    ///
    /// Read back by the indent-based reconstructor this gives the same
    /// nested map, as long as no token carries params, no block is empty and
    /// sibling leaves have distinct names.
    pub fn to_text(&self, step: usize) -> String {
        let mut lines = Vec::new();
        self.render_into(0, step, &mut lines);
        lines.join("\n")
    }

    fn render_into(&self, depth: usize, step: usize, lines: &mut Vec<String>) {
        lines.push(format!("{}{}", " ".repeat(depth * step), self.render_line()));
        for child in &self.children {
            child.render_into(depth + 1, step, lines);
        }
    }

    /// Negated switches read `no X`, blocks their identity as one word, and
    /// other leaves `name value`. Params follow either way.
    fn render_line(&self) -> String {
        if self.switch && self.value.as_deref() == Some(NEGATED) {
            return format!("no {}", quote(&self.name));
        }

        let mut line = if self.is_block() {
            quote(&self.identity()).into_owned()
        } else {
            let mut line = quote(&self.name).into_owned();
            if let Some(value) = self.value.as_deref().filter(|v| !v.is_empty()) {
                line.push(' ');
                line.push_str(&quote(value));
            }
            line
        };
        for param in &self.params {
            line.push(' ');
            line.push_str(&quote(param));
        }
        line
    }
}

fn quote(text: &str) -> Cow<'_, str> {
    if text.contains(' ') {
        Cow::Owned(format!("\"{}\"", text))
    } else {
        Cow::Borrowed(text)
    }
}

impl Tree {
    /// Union of every root's projection. Roots with the same key overwrite
    /// each other in order.
    pub fn to_nested_map(&self) -> Value {
        let mut map = Map::new();
        for root in self.roots() {
            root.project_into(&mut map);
        }
        Value::Object(map)
    }

    /// Indented text of every root, using the tree's indent step
    pub fn to_text(&self) -> String {
        let step = self.indent_step();
        self.roots()
            .iter()
            .map(|root| root.to_text(step))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
