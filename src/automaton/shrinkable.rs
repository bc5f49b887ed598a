use crate::prelude::*;

/// Encapsulates the ability to remove single states from an automaton.
pub trait Shrinkable: MutableAutomaton {
    /// Removes `state` together with all transitions leaving it and all attached transitions
    /// that lead into it. Transitions that are not attached to any state but target `state`
    /// are kept and become dangling. The initial marking of `state` is dropped as well.
    ///
    /// Returns `None` if the state does not exist, and otherwise the property it carried.
    ///
    /// # Example
    /// ```
    /// use automata_model::prelude::*;
    ///
    /// let mut dfa = DFA::for_alphabet(CharAlphabet::of_size(2));
    /// let q0 = dfa.add_initial_state(Some(false)).unwrap();
    /// let q1 = dfa.add_state(Some(true)).unwrap();
    /// dfa.add_new_transition(q0, 'a', q1, None).unwrap();
    /// assert_eq!(dfa.successor(q0, 'a'), Some(q1));
    /// assert_eq!(dfa.remove_state(q1), Some(Some(true)));
    /// assert_eq!(dfa.successor(q0, 'a'), None);
    /// assert_eq!(dfa.remove_state(q1), None);
    /// ```
    fn remove_state(&mut self, state: Self::State) -> Option<Option<Self::StateProperty>>;
}
