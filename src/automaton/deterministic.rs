use crate::prelude::*;

/// Convenience queries for automata that hold at most one transition per state and symbol
/// and at most one initial state. Absent transitions are reported as `None`.
pub trait DeterministicAutomaton: Automaton {
    /// Returns the unique transition leaving `state` on `symbol`, if there is one.
    fn transition(&self, state: Self::State, symbol: SymbolOf<Self>) -> Option<Self::Transition> {
        let mut transitions = self.transitions(state, symbol);
        let first = transitions.next()?;
        debug_assert!(
            transitions.next().is_none(),
            "deterministic automaton holds multiple transitions for {state:?} on {symbol:?}"
        );
        Some(first)
    }

    /// Returns the unique successor of `state` on `symbol`, if there is one.
    ///
    /// # Example
    /// ```
    /// use automata_model::prelude::*;
    ///
    /// let mut dfa = DFA::for_alphabet(CharAlphabet::of_size(2));
    /// let q0 = dfa.add_initial_state(Some(true)).unwrap();
    /// dfa.add_new_transition(q0, 'a', q0, None).unwrap();
    /// assert_eq!(dfa.successor(q0, 'a'), Some(q0));
    /// assert_eq!(dfa.successor(q0, 'b'), None);
    /// ```
    fn successor(&self, state: Self::State, symbol: SymbolOf<Self>) -> Option<Self::State> {
        self.target(self.transition(state, symbol)?)
    }

    /// Returns the property of the unique transition leaving `state` on `symbol`.
    fn transition_property_on(
        &self,
        state: Self::State,
        symbol: SymbolOf<Self>,
    ) -> Option<&Self::TransitionProperty> {
        self.transition_property(self.transition(state, symbol)?)
    }

    /// Returns the unique initial state, if there is one.
    fn initial_state(&self) -> Option<Self::State> {
        self.initial_states().next()
    }

    /// Follows `word` from `origin` and returns the state that is reached, or `None` as soon as
    /// a transition is missing.
    fn reached_state_from<W: IntoIterator<Item = SymbolOf<Self>>>(
        &self,
        origin: Self::State,
        word: W,
    ) -> Option<Self::State> {
        word.into_iter()
            .try_fold(origin, |state, symbol| self.successor(state, symbol))
    }
}

/// Mutations that only make sense for deterministic automata.
pub trait MutableDeterministic: MutableAutomaton + DeterministicAutomaton {
    /// Sets the unique transition leaving `state` on `symbol`, or removes it if `transition` is
    /// `None`.
    fn set_transition(
        &mut self,
        state: Self::State,
        symbol: SymbolOf<Self>,
        transition: Option<Self::Transition>,
    ) -> Result<(), AutomatonError> {
        match transition {
            Some(t) => self.set_transitions(state, symbol, [t]),
            None => {
                self.remove_transitions(state, symbol);
                Ok(())
            }
        }
    }

    /// Creates a transition to `target` and makes it the unique transition leaving `state` on
    /// `symbol`, replacing whatever was there before.
    fn set_successor(
        &mut self,
        state: Self::State,
        symbol: SymbolOf<Self>,
        target: Self::State,
        property: Option<Self::TransitionProperty>,
    ) -> Result<Self::Transition, AutomatonError> {
        let transition = self.create_transition(Some(target), property);
        self.set_transition(state, symbol, Some(transition))?;
        Ok(transition)
    }

    /// Makes `state` the unique initial state, or unmarks the current one if `state` is `None`.
    fn set_initial_state(&mut self, state: Option<Self::State>) -> Result<(), AutomatonError> {
        if let Some(q) = state {
            assert!(
                self.contains_state(q),
                "state {q:?} does not belong to this automaton"
            );
        }
        if let Some(current) = self.initial_state() {
            self.set_initial(current, false)?;
        }
        match state {
            Some(q) => self.set_initial(q, true),
            None => Ok(()),
        }
    }
}

impl<M: MutableAutomaton + DeterministicAutomaton> MutableDeterministic for M {}
