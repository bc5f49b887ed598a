use crate::{math::Set, prelude::*};

/// Acceptance of finite words for automata whose states carry a boolean acceptance flag.
/// States without property are rejecting.
pub trait Acceptor: Automaton<StateProperty = bool> {
    /// Returns `true` if some run on `word` that starts in an initial state ends in an
    /// accepting state. Missing transitions simply end a run.
    ///
    /// # Example
    /// ```
    /// use automata_model::prelude::*;
    ///
    /// let mut nfa = NFA::for_alphabet(CharAlphabet::of_size(2));
    /// let q0 = nfa.add_initial_state(Some(false)).unwrap();
    /// let q1 = nfa.add_state(Some(true)).unwrap();
    /// nfa.add_new_transition(q0, 'a', q0, None).unwrap();
    /// nfa.add_new_transition(q0, 'b', q0, None).unwrap();
    /// nfa.add_new_transition(q0, 'a', q1, None).unwrap();
    /// assert!(nfa.accepts("ba".chars()));
    /// assert!(!nfa.accepts("ab".chars()));
    /// assert!(!nfa.accepts("".chars()));
    /// ```
    fn accepts<W: IntoIterator<Item = SymbolOf<Self>>>(&self, word: W) -> bool {
        let mut current: Set<Self::State> = self.initial_states().collect();
        for symbol in word {
            if current.is_empty() {
                return false;
            }
            current = current
                .iter()
                .flat_map(|q| self.successors(*q, symbol))
                .collect();
        }
        current
            .into_iter()
            .any(|q| self.state_property(q).copied().unwrap_or(false))
    }
}

impl<M: Automaton<StateProperty = bool> + ?Sized> Acceptor for M {}

/// Transduction semantics of deterministic automata whose transitions carry outputs.
pub trait MealyOutput: DeterministicAutomaton {
    /// Reads `word` from the initial state and collects the property of every transition that
    /// is taken. Returns `None` if a transition or its property is missing.
    ///
    /// # Example
    /// ```
    /// use automata_model::prelude::*;
    ///
    /// let mut mm: MealyMachine<CharAlphabet, usize> = MealyMachine::for_alphabet(CharAlphabet::of_size(2));
    /// let q0 = mm.add_initial_state(None).unwrap();
    /// let q1 = mm.add_state(None).unwrap();
    /// mm.add_new_transition(q0, 'a', q1, Some(0)).unwrap();
    /// mm.add_new_transition(q1, 'a', q0, Some(1)).unwrap();
    /// assert_eq!(mm.compute_output("aaa".chars()), Some(vec![0, 1, 0]));
    /// assert_eq!(mm.compute_output("ab".chars()), None);
    /// ```
    fn compute_output<W: IntoIterator<Item = SymbolOf<Self>>>(
        &self,
        word: W,
    ) -> Option<Vec<Self::TransitionProperty>> {
        let mut state = self.initial_state()?;
        let mut output = vec![];
        for symbol in word {
            let transition = self.transition(state, symbol)?;
            output.push(self.transition_property(transition)?.clone());
            state = self.target(transition)?;
        }
        Some(output)
    }
}

impl<M: DeterministicAutomaton + ?Sized> MealyOutput for M {}

/// Output semantics of deterministic automata whose states carry outputs.
pub trait MooreOutput: DeterministicAutomaton {
    /// Reads `word` from the initial state and collects the property of every visited state,
    /// starting with the initial one. Returns `None` if a transition or property is missing.
    fn compute_state_outputs<W: IntoIterator<Item = SymbolOf<Self>>>(
        &self,
        word: W,
    ) -> Option<Vec<Self::StateProperty>> {
        let mut state = self.initial_state()?;
        let mut output = vec![self.state_property(state)?.clone()];
        for symbol in word {
            state = self.successor(state, symbol)?;
            output.push(self.state_property(state)?.clone());
        }
        Some(output)
    }
}

impl<M: DeterministicAutomaton + ?Sized> MooreOutput for M {}
