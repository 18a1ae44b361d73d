use serde::{Deserialize, Serialize};

use super::{Likert, QuestionId};

/// One nullable answer slot per question, indexed by question position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    slots: Vec<Option<Likert>>,
}

impl AnswerSet {
    /// Creates an answer set with `len` empty slots.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Builds a fully answered set; handy for fixtures and replays.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = Likert>) -> Self {
        Self {
            slots: values.into_iter().map(Some).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Writes an answer. Returns `false` when `index` is out of range.
    pub fn set(&mut self, index: usize, value: Likert) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Likert> {
        self.slots.get(index).copied().flatten()
    }

    /// Looks up the answer for a 1-based question id.
    #[must_use]
    pub fn answer_for(&self, question: QuestionId) -> Option<Likert> {
        self.get(question.index())
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Questions still waiting for an answer, in order.
    #[must_use]
    pub fn missing(&self) -> Vec<QuestionId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(index, _)| QuestionId::from_index(index))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Likert>> + '_ {
        self.slots.iter().copied()
    }
}
