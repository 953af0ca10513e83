//! # Rule Table
//!
//! The scripted half of the assistant: every keyword-triggered answer lives in a
//! single ordered table. Intents come first in their table order, followed by the
//! contact rules (founder, general manager, generic contact). The first rule with a
//! keyword contained in the lowercased message produces the answer.

use crate::{
    contacts::ContactParty,
    intents::{Intent, INTENTS},
};
use serde::Serialize;

/// What a rule answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// A canned intent response.
    Intent(&'static Intent),
    /// Contact details rendered for one party.
    Contact(ContactParty),
}

/// One `{keywords, reply}` pair of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub reply: Reply,
}

impl Rule {
    fn matches(&self, lowercased: &str) -> bool {
        self.keywords.iter().any(|keyword| lowercased.contains(keyword))
    }

    fn render(&self) -> String {
        match self.reply {
            Reply::Intent(intent) => intent.response.to_string(),
            Reply::Contact(party) => party.reply(),
        }
    }
}

/// The kind of rule that answered, for logging and debug output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    Intent { name: &'static str },
    Contact { party: ContactParty },
}

/// The outcome of evaluating the table against a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule: &'static str,
    pub kind: RuleKind,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        let intents = INTENTS.iter().map(|intent| Rule {
            name: intent.name,
            keywords: intent.keywords,
            reply: Reply::Intent(intent),
        });
        let contacts = ContactParty::PRIORITY.into_iter().map(|party| Rule {
            name: party.name(),
            keywords: party.keywords(),
            reply: Reply::Contact(party),
        });
        Self::new(intents.chain(contacts).collect())
    }
}

impl RuleTable {
    /// Builds a table from rules already in priority order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Evaluates the rules in order and returns the first match.
    pub fn resolve(&self, message: &str) -> Option<RuleMatch> {
        let lowercased = message.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowercased))
            .map(|rule| RuleMatch {
                rule: rule.name,
                kind: match rule.reply {
                    Reply::Intent(intent) => RuleKind::Intent { name: intent.name },
                    Reply::Contact(party) => RuleKind::Contact { party },
                },
                text: rule.render(),
            })
    }
}
