use crate::prelude::*;

/// Whether a modal transition is required or merely allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModalType {
    /// The transition may be present in an implementation.
    May,
    /// The transition must be present in every implementation.
    Must,
}

/// Transition properties that carry a [`ModalType`].
pub trait ModalEdgeProperty {
    /// Returns the modal type of the transition.
    fn modal_type(&self) -> ModalType;

    /// Returns `true` for must transitions.
    fn is_must(&self) -> bool {
        self.modal_type() == ModalType::Must
    }

    /// Returns `true` for transitions that are may but not must.
    fn is_may_only(&self) -> bool {
        self.modal_type() == ModalType::May
    }
}

/// The plain transition property of a modal transition system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalEdge {
    modal_type: ModalType,
}

impl ModalEdge {
    /// Creates an edge property of the given type.
    pub fn new(modal_type: ModalType) -> Self {
        Self { modal_type }
    }

    /// Shorthand for a must edge.
    pub fn must() -> Self {
        Self::new(ModalType::Must)
    }

    /// Shorthand for a may edge.
    pub fn may() -> Self {
        Self::new(ModalType::May)
    }

    /// Changes the modal type.
    pub fn set_modal_type(&mut self, modal_type: ModalType) {
        self.modal_type = modal_type;
    }
}

impl From<ModalType> for ModalEdge {
    fn from(value: ModalType) -> Self {
        Self::new(value)
    }
}

impl ModalEdgeProperty for ModalEdge {
    fn modal_type(&self) -> ModalType {
        self.modal_type
    }
}

/// A modal transition system distinguishes transitions that must be present from those that
/// may be present. Every must transition is also a may transition, and transitions without a
/// property are treated as may transitions.
///
/// # Example
/// ```
/// use automata_model::prelude::*;
///
/// let mut mts = MTS::for_alphabet(CharAlphabet::of_size(1));
/// let q0 = mts.add_initial_state(None).unwrap();
/// let q1 = mts.add_state(None).unwrap();
/// mts.add_modal_transition(q0, 'a', q0, ModalType::Must).unwrap();
/// mts.add_modal_transition(q0, 'a', q1, ModalType::May).unwrap();
/// assert_eq!(mts.must_successors(q0, 'a').collect::<Vec<_>>(), vec![q0]);
/// assert_eq!(mts.may_successors(q0, 'a').collect::<Vec<_>>(), vec![q0, q1]);
/// ```
pub trait ModalTransitionSystem: MutableAutomaton<TransitionProperty = ModalEdge> {
    /// Adds a transition of the given modal type from `source` to `target` on `symbol`.
    fn add_modal_transition(
        &mut self,
        source: Self::State,
        symbol: SymbolOf<Self>,
        target: Self::State,
        modal_type: ModalType,
    ) -> Result<Self::Transition, AutomatonError> {
        self.add_new_transition(source, symbol, target, Some(ModalEdge::new(modal_type)))
    }

    /// Returns the modal type of `transition`. Transitions without property are may transitions.
    fn modal_type_of(&self, transition: Self::Transition) -> ModalType {
        self.transition_property(transition)
            .map(|p| p.modal_type())
            .unwrap_or(ModalType::May)
    }

    /// Iterates over the targets of must transitions leaving `state` on `symbol`.
    fn must_successors(
        &self,
        state: Self::State,
        symbol: SymbolOf<Self>,
    ) -> impl Iterator<Item = Self::State> + '_ {
        self.transitions(state, symbol)
            .filter(move |t| self.modal_type_of(*t) == ModalType::Must)
            .filter_map(move |t| self.target(t))
    }

    /// Iterates over the targets of all transitions leaving `state` on `symbol`.
    fn may_successors(
        &self,
        state: Self::State,
        symbol: SymbolOf<Self>,
    ) -> impl Iterator<Item = Self::State> + '_ {
        self.successors(state, symbol)
    }
}

impl<M: MutableAutomaton<TransitionProperty = ModalEdge>> ModalTransitionSystem for M {}
