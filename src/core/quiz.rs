use crate::db::Question;
use rand::seq::SliceRandom;
use rand::Rng;

/// Which questions a quiz draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySelector {
    /// Every category
    Any,
    /// A single category id
    Category(i32),
}

impl CategorySelector {
    /// Category id 0 is the "All" choice of the quiz screen
    pub fn from_id(id: i32) -> Self {
        if id == 0 {
            CategorySelector::Any
        } else {
            CategorySelector::Category(id)
        }
    }

    pub fn admits(&self, question: &Question) -> bool {
        match self {
            CategorySelector::Any => true,
            CategorySelector::Category(id) => question.category == *id,
        }
    }
}

/// Picks the next quiz question uniformly at random.
///
/// Candidates listed in `previous` or outside `selector` are never returned.
/// `None` means the quiz is exhausted.
pub fn choose_next_question<'a, R: Rng + ?Sized>(
    candidates: &'a [Question],
    selector: CategorySelector,
    previous: &[i32],
    rng: &mut R,
) -> Option<&'a Question> {
    let eligible: Vec<&Question> = candidates
        .iter()
        .filter(|q| selector.admits(q) && !previous.contains(&q.id))
        .collect();
    eligible.choose(rng).copied()
}
