//! Indent-based reconstruction
//!
//! Nesting is implied by indentation alone. Every line is expanded into
//! the full word path from the root (the words of its parent lines followed
//! by its own) and that path is walked into the tree, creating nodes on
//! the way. A scalar sitting where a child is needed is promoted to a
//! child, so the last word of a line becomes a value only while the node
//! has nothing else.
//!
//! Multi-line literals (`banner motd ^C ... ^C`) are buffered verbatim until
//! their delimiter is balanced and then handled as one logical line.
//!
//! Lines before the start marker (the `show running-config` header) are
//! held back and dropped once the marker shows up. Input without a marker
//! has no header, so the held lines are parsed after all.

use super::lexer::{indent_of, split_words};
use super::rules::RuleSet;
use cfgtree_core::config::IndentedConfig;
use cfgtree_core::merge::merge;
use cfgtree_core::token::NEGATED;
use cfgtree_core::{Anomaly, Token, Tree};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Preamble,
    Active,
    Done,
}

/// Multi-line literal being captured
#[derive(Debug)]
struct Literal {
    text: String,
    markers: usize,
    line: usize,
}

struct Reconstructor<'c> {
    config: &'c IndentedConfig,
    rules: &'c RuleSet,
    state: State,
    tree: Tree,
    /// Words of the enclosing lines, outermost first
    parents: Vec<Vec<String>>,
    prev_words: Vec<String>,
    prev_indent: usize,
    literal: Option<Literal>,
    /// Lines seen before the start marker
    held: Vec<(usize, String)>,
}

/// Rebuild the tree of an indent-based dump
pub fn reconstruct<'a, I>(lines: I, config: &IndentedConfig, rules: &RuleSet) -> Tree
where
    I: IntoIterator<Item = &'a str>,
{
    let state = if config.start_marker.is_some() {
        State::Preamble
    } else {
        State::Active
    };
    let mut reconstructor = Reconstructor {
        config,
        rules,
        state,
        tree: Tree::new(config.default_indent_step),
        parents: Vec::new(),
        prev_words: Vec::new(),
        prev_indent: 0,
        literal: None,
        held: Vec::new(),
    };

    for (idx, line) in lines.into_iter().enumerate() {
        reconstructor.feed(idx + 1, line);
        if reconstructor.state == State::Done {
            break;
        }
    }

    reconstructor.finish()
}

impl Reconstructor<'_> {
    fn feed(&mut self, line_no: usize, raw: &str) {
        if let Some(mut literal) = self.literal.take() {
            literal.markers += self.count_markers(raw);
            if literal.markers % 2 == 0 {
                literal.text.push_str(raw.trim());
                trace!(line = literal.line, "literal closed");
                self.process(literal.line, &literal.text);
            } else {
                literal.text.push_str(raw);
                literal.text.push('\n');
                self.literal = Some(literal);
            }
            return;
        }

        let trimmed = raw.trim();

        if self.state == State::Preamble {
            if self.config.start_marker.as_deref() == Some(trimmed) {
                debug!(line = line_no, skipped = self.held.len(), "start marker reached");
                self.held.clear();
                self.state = State::Active;
            } else {
                self.held.push((line_no, raw.to_string()));
            }
            return;
        }

        if self.config.stop_marker.as_deref() == Some(trimmed) {
            debug!(line = line_no, "stop marker reached");
            self.state = State::Done;
            return;
        }

        if trimmed.is_empty()
            || (!self.config.comment_prefix.is_empty() && trimmed.starts_with(&self.config.comment_prefix))
        {
            return;
        }

        if self.opens_literal(trimmed) {
            trace!(line = line_no, "literal opened");
            self.literal = Some(Literal {
                text: format!("{}\n", raw),
                markers: self.count_markers(raw),
                line: line_no,
            });
            return;
        }

        self.process(line_no, raw);
    }

    fn count_markers(&self, text: &str) -> usize {
        if self.config.literal_marker.is_empty() {
            return 0;
        }
        text.matches(self.config.literal_marker.as_str()).count()
    }

    fn opens_literal(&self, trimmed: &str) -> bool {
        let keyword = &self.config.literal_keyword;
        !keyword.is_empty()
            && trimmed.split_whitespace().next() == Some(keyword.as_str())
            && self.count_markers(trimmed) % 2 == 1
    }

    /// Handle one logical line
    fn process(&mut self, line_no: usize, line: &str) {
        let indent = indent_of(line);

        if self.prev_indent == 0 && indent > 0 {
            self.tree.discover_indent_step(indent);
        }

        if indent == 0 {
            self.parents.clear();
        } else if indent > self.prev_indent {
            self.parents.push(std::mem::take(&mut self.prev_words));
        } else if indent < self.prev_indent {
            let step = self.tree.indent_step();
            let delta = self.prev_indent - indent;
            if delta % step != 0 {
                self.tree.record(Anomaly::IrregularIndent {
                    line: line_no,
                    delta,
                    step,
                });
            }
            let keep = self.parents.len().saturating_sub(delta / step);
            self.parents.truncate(keep);
        }

        let split = split_words(line);
        if split.unbalanced {
            self.tree.record(Anomaly::MalformedLine { line: line_no });
        }
        let mut own = split.words;
        // `no X Y` is stored as `X Y no`
        if own.len() > 1 && own[0] == NEGATED {
            own.rotate_left(1);
        }

        let words: Vec<String> = self.parents.iter().flatten().chain(own.iter()).cloned().collect();
        self.insert(&words);

        self.prev_indent = indent;
        self.prev_words = own;
    }

    /// Walk `words` from the roots, building what is missing
    fn insert(&mut self, words: &[String]) {
        let Some((first, rest)) = words.split_first() else {
            return;
        };
        let step = self.tree.indent_step();

        if let Some(token) = self.rules.apply(words, 0, step) {
            insert_root(self.tree.roots_mut(), token);
            return;
        }

        let roots = self.tree.roots_mut();
        let idx = match roots.iter().position(|root| root.name() == first.as_str()) {
            Some(idx) => idx,
            None => {
                roots.push(Token::new(first.as_str(), None, 0));
                roots.len() - 1
            }
        };

        let mut current = &mut roots[idx];
        let mut rest = rest;
        let mut depth = 1;

        while let Some((word, tail)) = rest.split_first() {
            let indent = depth * step;

            if let Some(token) = self.rules.apply(rest, indent, step) {
                make_room(current, word, indent);
                current.put_child_named(token);
                return;
            }

            if tail.is_empty() {
                place_last(current, word, indent);
                return;
            }

            if current.child_named(word).is_none() {
                make_room(current, word, indent);
            }
            current = current.entry_named(word, indent);
            rest = tail;
            depth += 1;
        }
    }

    fn finish(mut self) -> Tree {
        if self.state == State::Preamble {
            debug!(lines = self.held.len(), "no start marker, parsing held lines");
            self.state = State::Active;
            for (line_no, raw) in std::mem::take(&mut self.held) {
                self.feed(line_no, &raw);
                if self.state == State::Done {
                    break;
                }
            }
        }

        if let Some(literal) = self.literal.take() {
            self.tree.record(Anomaly::UnterminatedLiteral { line: literal.line });
            self.tree.set_complete(false);
            self.process(literal.line, literal.text.trim_end());
        }
        self.tree
    }
}

/// A rule-built root replaces the root of the same name, or is merged into
/// it when both declare the same block
fn insert_root(roots: &mut Vec<Token>, token: Token) {
    match roots.iter().position(|root| root.name() == token.name()) {
        Some(idx) => {
            let root = &mut roots[idx];
            if root.same_declaration(&token) && (root.is_block() || token.is_block()) {
                merge(root, token);
            } else {
                *root = token;
            }
        }
        None => roots.push(token),
    }
}

/// Clear the way for a child named `word`: the current value either is that
/// word (and is consumed) or is moved down to a child of its own
fn make_room(token: &mut Token, word: &str, indent: usize) {
    match token.value() {
        Some(value) if value == word => {
            token.take_value();
        }
        Some(_) => {
            if let Some(value) = token.take_value() {
                token.entry_named(&value, indent);
            }
        }
        None => {}
    }
}

/// Place the last word of a line under `token`
fn place_last(token: &mut Token, word: &str, indent: usize) {
    match token.value() {
        Some(value) if value == word => return,
        None if token.children().is_empty() => {
            token.set_value(word);
            return;
        }
        _ => {}
    }

    make_room(token, word, indent);
    match token.child_named_mut(word) {
        // re-asserted after a negation
        Some(child) if child.value() == Some(NEGATED) && !child.is_block() => {
            child.take_value();
        }
        Some(_) => {}
        None => token.push_child(Token::new(word, None, indent)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(text: &str) -> Tree {
        reconstruct(text.lines(), &IndentedConfig::default(), &RuleSet::indented())
    }

    #[test]
    fn test_nested_sections() {
        let tree = run("\
!
redundancy
 mode sso
 main-cpu
  auto-sync standard
!
bridge-domain 100
 member GigabitEthernet0/0/1 service-instance 100
end
");
        assert_eq!(
            tree.to_nested_map(),
            json!({
                "redundancy": {
                    "mode": "sso",
                    "main-cpu": {"auto-sync": "standard"}
                },
                "bridge-domain": {
                    "100": {
                        "member": {"GigabitEthernet0/0/1": {"service-instance": "100"}}
                    }
                }
            })
        );
        assert_eq!(tree.indent_step(), 1);
        assert!(tree.is_complete());
    }

    #[test]
    fn test_repeated_sections_share_a_root() {
        let tree = run("\
!
interface GigabitEthernet0/0/0
 description uplink to core
 ip address 10.0.0.1 255.255.255.0
 no shutdown
!
interface GigabitEthernet0/0/1
 shutdown
!
");
        assert_eq!(
            tree.to_nested_map(),
            json!({
                "interface": {
                    "GigabitEthernet0/0/0": {
                        "description": "uplink to core",
                        "ip": {"address": {"ipaddress": "10.0.0.1", "netmask": "255.255.255.0"}},
                        "shutdown": "no"
                    },
                    "GigabitEthernet0/0/1": "shutdown"
                }
            })
        );
    }

    #[test]
    fn test_negation_then_reassertion() {
        let tree = run("\
interface Loopback0
 no shutdown
 shutdown
");
        assert_eq!(
            tree.to_nested_map(),
            json!({"interface": {"Loopback0": {"shutdown": ""}}})
        );
    }

    #[test]
    fn test_value_promoted_to_child() {
        let tree = run("\
line vty 0 4
 transport input ssh
line con 0
");
        assert_eq!(
            tree.to_nested_map(),
            json!({
                "line": {
                    "vty": {"0": {"4": {"transport": {"input": "ssh"}}}},
                    "con": "0"
                }
            })
        );
    }

    #[test]
    fn test_banners() {
        let tree = run("\
banner login ^C
Authorized access only
^C
banner motd ^C Welcome ^C
line con 0
 exec-timeout 5 0
ntp server 10.0.0.1
");
        assert_eq!(
            tree.to_nested_map(),
            json!({
                "banner": {
                    "login": "^C\nAuthorized access only\n^C",
                    "motd": "^C Welcome ^C"
                },
                "line": {"con": {"0": {"exec-timeout": {"5": "0"}}}},
                "ntp": {"server": "10.0.0.1"}
            })
        );
        assert!(tree.anomalies().is_empty());
    }

    #[test]
    fn test_username_rules() {
        let tree = run("\
username admin privilege 15 secret 5 $1$mERr$hx5rVt7rPNoS4wqbXKX7m0
username ops password 7 0822455D0A16
");
        assert_eq!(
            tree.to_nested_map(),
            json!({
                "username": {
                    "admin": {
                        "privilege": {
                            "type": "15",
                            "secret": {"type": "5", "value": "$1$mERr$hx5rVt7rPNoS4wqbXKX7m0"}
                        }
                    },
                    "ops": {"password": {"type": "7", "value": "0822455D0A16"}}
                }
            })
        );
    }

    #[test]
    fn test_indent_step_discovered_once() {
        let tree = run("\
router ospf 1
  network 10.0.0.0 0.0.0.255 area 0
  passive-interface default
");
        assert_eq!(tree.indent_step(), 2);
        assert_eq!(
            tree.to_nested_map(),
            json!({
                "router": {
                    "ospf": {
                        "1": {
                            "network": {"10.0.0.0": {"0.0.0.255": {"area": "0"}}},
                            "passive-interface": "default"
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_irregular_dedent_is_recorded() {
        let tree = run("\
policy-map WAN
  class voice
    priority 100
 set dscp ef
");
        assert!(tree
            .anomalies()
            .iter()
            .any(|a| matches!(a, Anomaly::IrregularIndent { line: 4, delta: 3, step: 2 })));
    }

    #[test]
    fn test_unterminated_literal() {
        let tree = run("\
hostname R1
banner exec ^C
never closed
");
        assert!(!tree.is_complete());
        assert!(matches!(tree.anomalies(), [Anomaly::UnterminatedLiteral { line: 2 }]));
        assert_eq!(
            tree.to_nested_map(),
            json!({
                "hostname": "R1",
                "banner": {"exec": {"^C\nnever": "closed"}}
            })
        );
    }

    #[test]
    fn test_stop_marker_and_comments() {
        let tree = run("\
!
! Last configuration change
hostname R1
!
end
hostname R2
");
        assert_eq!(tree.to_nested_map(), json!({"hostname": "R1"}));
    }

    #[test]
    fn test_header_before_start_marker_is_dropped() {
        let tree = run("\
Building configuration...

Current configuration : 1024 bytes
!
hostname R1
!
");
        assert_eq!(tree.to_nested_map(), json!({"hostname": "R1"}));
        assert!(tree.anomalies().is_empty());
    }

    #[test]
    fn test_without_start_marker_nothing_is_skipped() {
        let tree = run("\
hostname R1
ntp server 10.0.0.1
end
hostname R2
");
        assert_eq!(
            tree.to_nested_map(),
            json!({"hostname": "R1", "ntp": {"server": "10.0.0.1"}})
        );
    }
}
