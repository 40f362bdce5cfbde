//! Name matching against occupants.
//!
//! An entity matches if its lower-cased name occurs anywhere in the
//! (already lower-cased) text. The first match in iteration order wins;
//! there is no further disambiguation.

use delve_storage::{CharacterInstanceView, MonsterInstanceView, ObjectInstanceView};

/// Something that can be referred to by name.
pub trait Named {
    /// Returns the display name.
    fn name(&self) -> &str;
}

impl Named for CharacterInstanceView {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for MonsterInstanceView {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for ObjectInstanceView {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Returns the first candidate whose name occurs in `text`.
///
/// `text` must already be lower-case. Candidates with blank names never
/// match.
pub fn find_named<'a, T, I>(text: &str, candidates: I) -> Option<&'a T>
where
    T: Named + 'a,
    I: IntoIterator<Item = &'a T>,
{
    candidates.into_iter().find(|candidate| {
        let name = candidate.name().trim().to_lowercase();
        !name.is_empty() && text.contains(&name)
    })
}
