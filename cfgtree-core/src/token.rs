//! Configuration tree node
//!
//! A [`Token`] is one recognized command. Leaves carry their information in
//! `value`/`params`; containers carry it in their children. Siblings are
//! keyed by [`Token::identity`], so two children with the same identity are
//! always folded into one by the merge engine instead of being duplicated.

/// Value carried by a negated switch (`no shutdown`)
pub const NEGATED: &str = "no";

/// Value carried by an asserted switch (`shutdown`)
pub const ASSERTED: &str = "yes";

/// A node of the configuration tree
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Token {
    pub(crate) name: String,
    pub(crate) value: Option<String>,
    pub(crate) indent: usize,
    pub(crate) params: Vec<String>,
    pub(crate) children: Vec<Token>,
    pub(crate) container: bool,
    pub(crate) switch: bool,
}

impl Token {
    pub fn new(name: impl Into<String>, value: Option<String>, indent: usize) -> Self {
        Self {
            name: name.into(),
            value,
            indent,
            ..Default::default()
        }
    }

    /// Leaf with a scalar value
    pub fn leaf(name: impl Into<String>, value: impl Into<String>, indent: usize) -> Self {
        Self::new(name, Some(value.into()), indent)
    }

    /// Block that stays a block even while it has no children
    pub fn container(name: impl Into<String>, value: Option<String>, indent: usize) -> Self {
        Self {
            container: true,
            ..Self::new(name, value, indent)
        }
    }

    /// On/off leaf keyed by its bare name.
    ///
    /// `shutdown` and `no shutdown` share the identity `shutdown`, so the
    /// later directive replaces the earlier one.
    pub fn switch(name: impl Into<String>, on: bool, indent: usize) -> Self {
        let value = if on { ASSERTED } else { NEGATED };
        Self {
            switch: true,
            ..Self::leaf(name, value, indent)
        }
    }

    pub fn with_params(mut self, params: Vec<String>) -> Self {
        self.params = params;
        self
    }

    /// Add a child, turning this token into a container
    pub fn with_child(mut self, child: Token) -> Self {
        self.container = true;
        self.put_child(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn children(&self) -> &[Token] {
        &self.children
    }

    pub fn is_container(&self) -> bool {
        self.container
    }

    pub fn is_switch(&self) -> bool {
        self.switch
    }

    /// True for containers and for any token that has grown children
    pub fn is_block(&self) -> bool {
        self.container || !self.children.is_empty()
    }

    /// Merge and lookup key: `"{name} {value}"`, or the bare name
    pub fn identity(&self) -> String {
        match (&self.value, self.switch) {
            (Some(value), false) => format!("{} {}", self.name, value),
            _ => self.name.clone(),
        }
    }

    /// Value part of the identity: none for switches
    fn identity_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|_| !self.switch)
    }

    /// Whether [`Token::identity`] equals `identity`, without building it
    pub fn has_identity(&self, identity: &str) -> bool {
        match self.identity_value() {
            Some(value) => {
                identity
                    .strip_prefix(self.name.as_str())
                    .and_then(|rest| rest.strip_prefix(' '))
                    == Some(value)
            }
            None => self.name == identity,
        }
    }

    /// Same name and identity value, so the two are one sibling
    pub fn same_identity(&self, other: &Token) -> bool {
        self.name == other.name && self.identity_value() == other.identity_value()
    }

    /// Same name, indent and value: the precondition for merging
    pub fn same_declaration(&self, other: &Token) -> bool {
        self.name == other.name && self.indent == other.indent && self.value == other.value
    }

    pub fn child(&self, identity: &str) -> Option<&Token> {
        self.children.iter().find(|c| c.has_identity(identity))
    }

    pub fn child_mut(&mut self, identity: &str) -> Option<&mut Token> {
        self.children.iter_mut().find(|c| c.has_identity(identity))
    }

    pub fn child_named(&self, name: &str) -> Option<&Token> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_named_mut(&mut self, name: &str) -> Option<&mut Token> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    pub fn take_value(&mut self) -> Option<String> {
        self.value.take()
    }

    pub fn mark_container(&mut self) {
        self.container = true;
    }

    /// Append without checking for an existing sibling
    pub fn push_child(&mut self, child: Token) {
        self.children.push(child);
    }

    /// Insert, replacing a sibling with the same identity
    pub fn put_child(&mut self, child: Token) {
        match self.children.iter().position(|c| c.same_identity(&child)) {
            Some(idx) => self.children[idx] = child,
            None => self.children.push(child),
        }
    }

    /// Insert, replacing a sibling with the same name
    pub fn put_child_named(&mut self, child: Token) {
        match self.children.iter().position(|c| c.name == child.name) {
            Some(idx) => self.children[idx] = child,
            None => self.children.push(child),
        }
    }

    /// Child with the given name, created as an empty token if missing
    pub fn entry_named(&mut self, name: &str, indent: usize) -> &mut Token {
        let idx = match self.children.iter().position(|c| c.name == name) {
            Some(idx) => idx,
            None => {
                self.children.push(Token::new(name, None, indent));
                self.children.len() - 1
            }
        };
        &mut self.children[idx]
    }
}
