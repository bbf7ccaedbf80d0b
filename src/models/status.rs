// src/models/status.rs

use std::fmt::Debug;

/// Ciclo de vida de um status: o conjunto é fechado e cada valor
/// conhece os estados para os quais pode avançar.
pub trait Lifecycle: Copy + PartialEq + Debug + 'static {
    const ALL: &'static [Self];

    /// Rótulo exatamente como trafega no JSON.
    fn label(self) -> &'static str;

    fn successors(self) -> &'static [Self];

    /// Reafirmar o status atual é sempre permitido.
    fn can_become(self, next: Self) -> bool {
        self == next || self.successors().contains(&next)
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.label() == label)
    }
}
