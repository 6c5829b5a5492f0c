use crate::entities::IngredientKind;

/// Every ingredient caught during the current attempt, in catch order.
///
/// Append-only while an attempt runs; `reset` is the only way to shrink it.
/// Kinds are not validated here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatchLedger {
    catches: Vec<IngredientKind>,
}

impl CatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.catches.clear();
    }

    pub fn record(&mut self, kind: IngredientKind) {
        self.catches.push(kind);
    }

    pub fn count_of(&self, kind: IngredientKind) -> u32 {
        self.catches.iter().filter(|&&k| k == kind).count() as u32
    }

    pub fn len(&self) -> usize {
        self.catches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catches.is_empty()
    }

    pub fn as_slice(&self) -> &[IngredientKind] {
        &self.catches
    }
}
