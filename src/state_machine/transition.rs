//! Transition representation

use crate::state_machine::{Attributes, StateName};
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_COLOUR: &str = "#000000";

/// A declared move from one or more source states to a destination state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Informational only, never part of the graph topology
    pub name: String,

    /// Source states, each producing its own edge
    #[serde(deserialize_with = "one_or_many")]
    pub from: Vec<StateName>,

    pub to: StateName,

    #[serde(default = "default_colour")]
    pub colour: String,

    /// Cluster the destination state is drawn in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submachine: Option<String>,

    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

/// The question/answer pair of a conditional transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch<'a> {
    pub question: &'a str,
    pub answer: &'a str,
}

fn default_colour() -> String {
    DEFAULT_COLOUR.to_string()
}

/// Accepts either `from = "a"` or `from = ["a", "b"]`
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<StateName>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(StateName),
        Many(Vec<StateName>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(state) => vec![state],
        OneOrMany::Many(states) => states,
    })
}

impl Transition {
    pub fn new<I, S>(name: impl Into<String>, from: I, to: impl Into<StateName>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateName>,
    {
        Self {
            name: name.into(),
            from: from.into_iter().map(Into::into).collect(),
            to: to.into(),
            colour: default_colour(),
            submachine: None,
            attributes: Attributes::new(),
            question: None,
            answer: None,
        }
    }

    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = colour.into();
        self
    }

    pub fn with_submachine(mut self, submachine: impl Into<String>) -> Self {
        self.submachine = Some(submachine.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes = self.attributes.with(key, value);
        self
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }

    /// Shorthand for setting both halves of a conditional branch
    pub fn with_branch(self, question: impl Into<String>, answer: impl Into<String>) -> Self {
        self.with_question(question).with_answer(answer)
    }

    /// The branch this transition routes through, if both halves are declared.
    ///
    /// A transition carrying only a question or only an answer is drawn as a
    /// plain edge.
    pub fn branch(&self) -> Option<Branch<'_>> {
        match (&self.question, &self.answer) {
            (Some(question), Some(answer)) => Some(Branch { question, answer }),
            _ => None,
        }
    }

    pub fn is_conditional(&self) -> bool {
        self.branch().is_some()
    }

    /// True when exactly one of question/answer is set
    pub fn is_half_branched(&self) -> bool {
        self.question.is_some() != self.answer.is_some()
    }

    /// Check the fields a collector must guarantee
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidTransition(format!(
                "transition to {:?} has no name",
                self.to
            )));
        }
        if self.to.trim().is_empty() {
            return Err(Error::InvalidTransition(format!(
                "transition {:?} has no destination state",
                self.name
            )));
        }
        Ok(())
    }
}
