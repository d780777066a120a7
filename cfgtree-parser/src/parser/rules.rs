//! Rule engine
//!
//! Recognizes multi-word command idioms and builds them as pre-shaped
//! sub-trees. Rules are tried in order and the first one that recognizes
//! the words wins, so the greedy ones ([`Rule::Description`],
//! [`Rule::Default`]) go last.

use cfgtree_core::Token;
use std::net::IpAddr;

/// One command idiom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `shutdown` / `no shutdown`
    Shutdown,
    /// `bfd TX receive RX multiplier N type T`
    Bfd,
    /// `sdp ID TYPE create`
    Sdp,
    /// `customer ID name NAME create`
    Customer,
    /// `vpls ID name NAME customer CUST create`
    Vpls,
    /// `epipe ID name NAME customer CUST create`
    Epipe,
    /// `banner login|motd TEXT...`
    Banner,
    /// `privilege LEVEL secret TYPE VALUE`
    Privilege,
    /// `password TYPE VALUE` with a numeric type
    Password,
    /// `address IP MASK`
    InterfaceAddress,
    /// `description TEXT...`
    Description,
    /// Name, optional value, trailing params. Recognizes any non-empty line.
    Default,
}

impl Rule {
    pub fn recognizes(&self, words: &[&str]) -> bool {
        match self {
            Rule::Shutdown => matches!(words, ["shutdown"] | ["no", "shutdown"]),
            Rule::Bfd => matches!(words, ["bfd", _, "receive", _, "multiplier", _, "type", _]),
            Rule::Sdp => matches!(words, ["sdp", _, _, "create"]),
            Rule::Customer => matches!(words, ["customer", _, "name", _, "create"]),
            Rule::Vpls => matches!(words, ["vpls", _, "name", _, "customer", _, "create"]),
            Rule::Epipe => matches!(words, ["epipe", _, "name", _, "customer", _, "create"]),
            Rule::Banner => matches!(words, ["banner", "login" | "motd", ..]),
            Rule::Privilege => matches!(words, ["privilege", _, "secret", _, _]),
            Rule::Password => match words {
                ["password", kind, _] => !kind.is_empty() && kind.bytes().all(|b| b.is_ascii_digit()),
                _ => false,
            },
            Rule::InterfaceAddress => match words {
                ["address", ip, mask] => ip.parse::<IpAddr>().is_ok() && mask.parse::<IpAddr>().is_ok(),
                _ => false,
            },
            Rule::Description => matches!(words, ["description", _, ..]),
            Rule::Default => !words.is_empty(),
        }
    }

    /// Build the sub-tree of a recognized line.
    ///
    /// The token sits at `indent`; rule-built children sit one `step`
    /// deeper per level. Call only after [`Rule::recognizes`] returned true.
    pub fn build(&self, words: &[&str], indent: usize, step: usize) -> Token {
        let child = indent + step;
        match (self, words) {
            (Rule::Shutdown, _) => Token::switch("shutdown", words.len() == 1, indent),
            (Rule::Bfd, [_, tx, _, rx, _, multiplier, _, kind]) => Token::container("bfd", None, indent)
                .with_child(Token::leaf("transmit", *tx, child))
                .with_child(Token::leaf("receive", *rx, child))
                .with_child(Token::leaf("multiplier", *multiplier, child))
                .with_child(Token::leaf("type", *kind, child)),
            (Rule::Sdp, [_, id, kind, _]) => Token::container("sdp", Some(id.to_string()), indent)
                .with_child(Token::leaf("delivery-type", *kind, child)),
            (Rule::Customer, [_, id, _, name, _]) => {
                Token::container("customer", Some(id.to_string()), indent)
                    .with_child(Token::leaf("name", *name, child))
            }
            (Rule::Vpls | Rule::Epipe, [service, id, _, name, _, customer, _]) => {
                Token::container(*service, Some(id.to_string()), indent)
                    .with_child(Token::leaf("name", *name, child))
                    .with_child(Token::leaf("customer", *customer, child))
            }
            (Rule::Banner, [_, kind, text @ ..]) => {
                let text = (!text.is_empty()).then(|| text.join(" "));
                Token::container("banner", None, indent).with_child(Token::new(*kind, text, child))
            }
            (Rule::Privilege, [_, level, _, kind, value]) => Token::container("privilege", None, indent)
                .with_child(Token::leaf("type", *level, child))
                .with_child(
                    Token::container("secret", None, child)
                        .with_child(Token::leaf("type", *kind, child + step))
                        .with_child(Token::leaf("value", *value, child + step)),
                ),
            (Rule::Password, [_, kind, value]) => Token::container("password", None, indent)
                .with_child(Token::leaf("type", *kind, child))
                .with_child(Token::leaf("value", *value, child)),
            (Rule::InterfaceAddress, [_, ip, mask]) => Token::container("address", None, indent)
                .with_child(Token::leaf("ipaddress", *ip, child))
                .with_child(Token::leaf("netmask", *mask, child)),
            (Rule::Description, [_, text @ ..]) => Token::leaf("description", text.join(" "), indent),
            _ => build_default(words, indent),
        }
    }
}

/// `NAME [VALUE [PARAMS...]]`.
///
/// A leading `no` negates: `no X` is the switch `X` turned off, and a longer
/// `no X ARGS...` becomes `X` with value `no`.
fn build_default(words: &[&str], indent: usize) -> Token {
    match words {
        [] => Token::default(),
        ["no", name] => Token::switch(*name, false, indent),
        ["no", name, params @ ..] => Token::leaf(*name, "no", indent).with_params(owned(params)),
        [name] => Token::new(*name, None, indent),
        [name, value, params @ ..] => Token::leaf(*name, *value, indent).with_params(owned(params)),
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Ordered list of rules, first match wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Rules of the terminator-based dialect, ending with the catch-all
    pub fn terminated() -> Self {
        Self::new(vec![
            Rule::Shutdown,
            Rule::Bfd,
            Rule::Sdp,
            Rule::Customer,
            Rule::Vpls,
            Rule::Epipe,
            Rule::Default,
        ])
    }

    /// Rules of the indent-based dialect. There is no catch-all: lines no
    /// rule recognizes are placed word by word.
    pub fn indented() -> Self {
        Self::new(vec![
            Rule::Banner,
            Rule::Privilege,
            Rule::Password,
            Rule::InterfaceAddress,
            Rule::Description,
        ])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn find(&self, words: &[&str]) -> Option<Rule> {
        self.rules.iter().copied().find(|rule| rule.recognizes(words))
    }

    /// Build `words` with the first rule recognizing them
    pub fn apply(&self, words: &[String], indent: usize, step: usize) -> Option<Token> {
        let words: Vec<&str> = words.iter().map(String::as_str).collect();
        let rule = self.find(&words)?;
        Some(rule.build(&words, indent, step))
    }
}
