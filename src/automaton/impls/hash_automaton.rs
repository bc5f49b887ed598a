use std::{collections::BTreeMap, fmt::Debug};

use bit_set::BitSet;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::{math::Map, prelude::*};

/// The default automaton implementation. States are kept in a [`BTreeMap`] so that they are
/// enumerated in the order in which they were created, and each state holds one list of
/// transitions per symbol of the alphabet. Transitions live in a separate arena and are
/// referenced by their [`TransitionId`], which allows creating them before they are attached
/// to a state.
///
/// The const parameter `DET` selects between the deterministic (`true`) and the
/// nondeterministic (`false`) variant of the contract. Optionally the number of states can be
/// bounded, see [`HashAutomaton::bounded`].
#[derive(Clone)]
pub struct HashAutomaton<A: Alphabet = CharAlphabet, SP = Void, TP = Void, const DET: bool = true>
{
    alphabet: A,
    states: BTreeMap<StateId, HashState<SP>>,
    transitions: Map<TransitionId, TransitionSlot<TP>>,
    initial: BitSet,
    next_state: usize,
    next_transition: usize,
    generation: u64,
    max_states: Option<usize>,
}

#[derive(Clone, Debug)]
struct HashState<SP> {
    property: Option<SP>,
    table: Vec<Vec<TransitionId>>,
}

impl<SP> HashState<SP> {
    fn new(property: Option<SP>, alphabet_size: usize) -> Self {
        Self {
            property,
            table: vec![vec![]; alphabet_size],
        }
    }
}

#[derive(Clone, Debug)]
struct TransitionSlot<TP> {
    target: Option<StateId>,
    property: Option<TP>,
    // state and symbol index the transition is attached to
    source: Option<(StateId, usize)>,
}

impl<A: Alphabet, SP: Property, TP: Property, const DET: bool> HashAutomaton<A, SP, TP, DET> {
    /// Creates an empty automaton over `alphabet` without a bound on the number of states.
    pub fn new(alphabet: A) -> Self {
        Self {
            alphabet,
            states: BTreeMap::new(),
            transitions: Map::default(),
            initial: BitSet::new(),
            next_state: 0,
            next_transition: 0,
            generation: 0,
            max_states: None,
        }
    }

    /// Creates an empty automaton that refuses to hold more than `max_states` states. Adding
    /// further states fails with [`AutomatonError::CapacityExceeded`].
    ///
    /// # Example
    /// ```
    /// use automata_model::prelude::*;
    ///
    /// let mut dfa: DFA = HashAutomaton::bounded(CharAlphabet::of_size(1), 1);
    /// assert!(dfa.add_state(None).is_ok());
    /// assert_eq!(
    ///     dfa.add_state(None),
    ///     Err(AutomatonError::CapacityExceeded { capacity: 1 })
    /// );
    /// ```
    pub fn bounded(alphabet: A, max_states: usize) -> Self {
        Self {
            max_states: Some(max_states),
            ..Self::new(alphabet)
        }
    }

    /// Returns the bound on the number of states, if there is one.
    pub fn max_states(&self) -> Option<usize> {
        self.max_states
    }

    /// Returns the number of transitions that currently exist, attached or not.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    fn assert_state(&self, state: StateId) {
        assert!(
            self.states.contains_key(&state),
            "state {state:?} does not belong to this automaton"
        );
    }

    fn state_mut(&mut self, state: StateId) -> &mut HashState<SP> {
        match self.states.get_mut(&state) {
            Some(s) => s,
            None => panic!("state {state:?} does not belong to this automaton"),
        }
    }

    fn slot(&self, transition: TransitionId) -> &TransitionSlot<TP> {
        match self.transitions.get(&transition) {
            Some(slot) => slot,
            None => panic!("transition {transition:?} does not belong to this automaton"),
        }
    }

    fn slot_mut(&mut self, transition: TransitionId) -> &mut TransitionSlot<TP> {
        match self.transitions.get_mut(&transition) {
            Some(slot) => slot,
            None => panic!("transition {transition:?} does not belong to this automaton"),
        }
    }

    fn symbol_index(&self, symbol: A::Symbol) -> usize {
        match self.alphabet.index_of(symbol) {
            Some(i) => i,
            None => panic!("symbol {symbol:?} is not part of the alphabet"),
        }
    }

    fn release<I: IntoIterator<Item = TransitionId>>(&mut self, transitions: I) {
        for t in transitions {
            self.transitions.remove(&t);
        }
    }
}

impl<A: Alphabet, SP: Property, TP: Property, const DET: bool> Automaton
    for HashAutomaton<A, SP, TP, DET>
{
    type Alphabet = A;
    type State = StateId;
    type Transition = TransitionId;
    type StateProperty = SP;
    type TransitionProperty = TP;

    fn alphabet(&self) -> &A {
        &self.alphabet
    }

    fn determinism(&self) -> Determinism {
        if DET {
            Determinism::Deterministic
        } else {
            Determinism::Nondeterministic
        }
    }

    fn size(&self) -> usize {
        self.states.len()
    }

    fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.keys().copied()
    }

    fn contains_state(&self, state: StateId) -> bool {
        self.states.contains_key(&state)
    }

    fn initial_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.initial.iter().map(StateId::from)
    }

    fn is_initial(&self, state: StateId) -> bool {
        self.initial.contains(state.index())
    }

    fn state_property(&self, state: StateId) -> Option<&SP> {
        self.states.get(&state)?.property.as_ref()
    }

    fn transitions(
        &self,
        state: StateId,
        symbol: A::Symbol,
    ) -> impl Iterator<Item = TransitionId> + '_ {
        self.states
            .get(&state)
            .zip(self.alphabet.index_of(symbol))
            .and_then(|(s, i)| s.table.get(i))
            .into_iter()
            .flatten()
            .copied()
    }

    fn target(&self, transition: TransitionId) -> Option<StateId> {
        self.transitions.get(&transition)?.target
    }

    fn transition_property(&self, transition: TransitionId) -> Option<&TP> {
        self.transitions.get(&transition)?.property.as_ref()
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

impl<A: Alphabet, SP: Property, TP: Property, const DET: bool> MutableAutomaton
    for HashAutomaton<A, SP, TP, DET>
{
    fn add_state(&mut self, property: Option<SP>) -> Result<StateId, AutomatonError> {
        if let Some(capacity) = self.max_states {
            if self.states.len() >= capacity {
                return Err(AutomatonError::CapacityExceeded { capacity });
            }
        }
        let id = StateId::from(self.next_state);
        self.next_state += 1;
        self.states
            .insert(id, HashState::new(property, self.alphabet.size()));
        self.generation += 1;
        trace!("added state {id:?}");
        Ok(id)
    }

    fn set_initial(&mut self, state: StateId, initial: bool) -> Result<(), AutomatonError> {
        self.assert_state(state);
        if !initial {
            self.initial.remove(state.index());
            return Ok(());
        }
        if DET && !self.initial.is_empty() && !self.initial.contains(state.index()) {
            return Err(AutomatonError::MultipleInitialStates);
        }
        self.initial.insert(state.index());
        Ok(())
    }

    fn set_state_property(&mut self, state: StateId, property: Option<SP>) {
        self.state_mut(state).property = property;
    }

    fn create_transition(&mut self, target: Option<StateId>, property: Option<TP>) -> TransitionId {
        if let Some(q) = target {
            self.assert_state(q);
        }
        let id = TransitionId::from(self.next_transition);
        self.next_transition += 1;
        self.transitions.insert(
            id,
            TransitionSlot {
                target,
                property,
                source: None,
            },
        );
        id
    }

    fn set_transition_property(&mut self, transition: TransitionId, property: Option<TP>) {
        self.slot_mut(transition).property = property;
    }

    fn set_transition_target(&mut self, transition: TransitionId, target: Option<StateId>) {
        if let Some(q) = target {
            self.assert_state(q);
        }
        self.slot_mut(transition).target = target;
    }

    fn set_transitions<I>(
        &mut self,
        state: StateId,
        symbol: A::Symbol,
        transitions: I,
    ) -> Result<(), AutomatonError>
    where
        I: IntoIterator<Item = TransitionId>,
    {
        let index = self.symbol_index(symbol);
        self.assert_state(state);
        let replacement = transitions.into_iter().unique().collect_vec();
        if DET && replacement.len() > 1 {
            return Err(AutomatonError::NondeterministicTransitions {
                count: replacement.len(),
            });
        }
        for t in &replacement {
            match self.slot(*t).source {
                Some(origin) if origin != (state, index) => {
                    panic!(
                        "transition {t:?} is already attached to {:?} at input index {}",
                        origin.0, origin.1
                    )
                }
                _ => {}
            }
        }

        for t in &replacement {
            self.slot_mut(*t).source = Some((state, index));
        }
        let previous = std::mem::replace(&mut self.state_mut(state).table[index], replacement);
        let current = &self.states[&state].table[index];
        let dropped = previous
            .into_iter()
            .filter(|t| !current.contains(t))
            .collect_vec();
        trace!(
            "{state:?} on {symbol:?} now has {} transitions, dropped {}",
            current.len(),
            dropped.len()
        );
        self.release(dropped);
        Ok(())
    }

    fn remove_transitions(&mut self, state: StateId, symbol: A::Symbol) {
        let index = self.symbol_index(symbol);
        let removed = std::mem::take(&mut self.state_mut(state).table[index]);
        trace!("removing {} transitions of {state:?} on {symbol:?}", removed.len());
        self.release(removed);
    }

    fn remove_all_transitions(&mut self, state: StateId) {
        let removed = self
            .state_mut(state)
            .table
            .iter_mut()
            .flat_map(|row| std::mem::take(row))
            .collect_vec();
        trace!("removing all {} transitions of {state:?}", removed.len());
        self.release(removed);
    }

    fn clear(&mut self) {
        debug!(
            "clearing automaton with {} states and {} transitions",
            self.states.len(),
            self.transitions.len()
        );
        self.states.clear();
        self.transitions.clear();
        self.initial.clear();
        self.next_state = 0;
        self.next_transition = 0;
        self.generation += 1;
    }
}

impl<A: Alphabet, SP: Property, TP: Property, const DET: bool> Shrinkable
    for HashAutomaton<A, SP, TP, DET>
{
    fn remove_state(&mut self, state: StateId) -> Option<Option<SP>> {
        let removed = self.states.remove(&state)?;
        self.release(removed.table.into_iter().flatten());

        let incoming = self
            .transitions
            .iter()
            .filter(|(_, slot)| slot.target == Some(state))
            .map(|(id, slot)| (*id, slot.source))
            .collect_vec();
        for (id, source) in incoming {
            match source {
                Some((q, i)) => {
                    if let Some(s) = self.states.get_mut(&q) {
                        s.table[i].retain(|t| *t != id);
                    }
                    self.transitions.remove(&id);
                }
                None => self.slot_mut(id).target = None,
            }
        }

        self.initial.remove(state.index());
        self.generation += 1;
        trace!("removed state {state:?}");
        Some(removed.property)
    }
}

impl<A: Alphabet, SP: Property, TP: Property> DeterministicAutomaton
    for HashAutomaton<A, SP, TP, true>
{
}

impl<A: Alphabet, SP: Property, TP: Property, const DET: bool> ForAlphabet<A>
    for HashAutomaton<A, SP, TP, DET>
{
    fn for_alphabet(from: A) -> Self {
        Self::new(from)
    }

    fn for_alphabet_size_hint(from: A, size_hint: usize) -> Self {
        let mut automaton = Self::new(from);
        automaton
            .transitions
            .reserve(size_hint * automaton.alphabet.size());
        automaton
    }
}

impl<A: Alphabet, SP: Property, TP: Property, const DET: bool> Debug
    for HashAutomaton<A, SP, TP, DET>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.transition_table())
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use fastrand::Rng;
    use itertools::Itertools;

    use crate::prelude::*;

    const SIZE: usize = 10;

    fn alphabet() -> IntAlphabet {
        IntAlphabet::new(1, 6)
    }

    fn choose<X: Clone>(rng: &mut Rng, items: &[X]) -> Option<X> {
        if items.is_empty() {
            None
        } else {
            Some(items[rng.usize(..items.len())].clone())
        }
    }

    /// For every state (in dense index order) and every symbol, the properties of the
    /// transitions of that pair, or `None` if there are no transitions.
    type Signature<TP> = Vec<Option<Vec<Option<TP>>>>;

    fn signature<M: Automaton<Alphabet = IntAlphabet>>(
        automaton: &M,
    ) -> Signature<M::TransitionProperty> {
        let alphabet = *automaton.alphabet();
        let ids = automaton.state_ids();
        let mut signature = vec![];
        for (_, q) in ids.iter() {
            for a in alphabet.universe() {
                let properties = automaton
                    .transitions(q, a)
                    .map(|t| automaton.transition_property(t).cloned())
                    .collect_vec();
                signature.push((!properties.is_empty()).then_some(properties));
            }
        }
        signature
    }

    fn check_locality<TP: PartialEq + Debug>(
        before: &Signature<TP>,
        after: &Signature<TP>,
        start: usize,
        len: usize,
    ) {
        assert_eq!(before.len(), after.len());
        for (i, (old, new)) in before.iter().zip(after).enumerate() {
            if (start..start + len).contains(&i) {
                assert_eq!(new, &None, "entry {i} should have been removed");
            } else {
                assert_eq!(old, new, "entry {i} should be untouched");
            }
        }
    }

    fn check_empty<M: Automaton<Alphabet = IntAlphabet>>(automaton: &M) {
        assert_eq!(automaton.size(), SIZE);
        let alphabet = *automaton.alphabet();
        for q in automaton.states() {
            assert_eq!(automaton.state_property(q), None);
            for a in alphabet.universe() {
                assert_eq!(automaton.transitions(q, a).count(), 0);
                assert_eq!(automaton.successors(q, a).count(), 0);
            }
        }
        assert_eq!(automaton.initial_states().count(), 0);
        assert!(signature(automaton).iter().all(Option::is_none));
    }

    fn fill_randomly<M: MutableAutomaton<Alphabet = IntAlphabet>>(
        automaton: &mut M,
        rng: &mut Rng,
        state_properties: &[M::StateProperty],
        transition_properties: &[M::TransitionProperty],
    ) {
        let alphabet = *automaton.alphabet();
        let ids = automaton.state_ids();
        for (_, q) in ids.iter() {
            for a in alphabet.universe() {
                let target = ids.state(rng.usize(..ids.len())).unwrap();
                let t = automaton.create_transition(Some(target), None);
                automaton.set_transition_property(t, choose(rng, transition_properties));
                automaton.set_transitions(q, a, [t]).unwrap();
                assert_eq!(automaton.successors(q, a).collect_vec(), vec![target]);
            }
            automaton.set_state_property(q, choose(rng, state_properties));
        }
        assert!(ids.is_current(automaton));
    }

    fn add_initial_and_check<M: MutableAutomaton<Alphabet = IntAlphabet>>(
        automaton: &mut M,
        rng: &mut Rng,
        state_properties: &[M::StateProperty],
    ) {
        let states = automaton.states().collect_vec();
        let existing = states[rng.usize(..states.len())];
        let existing_property = automaton.state_property(existing).cloned();

        let property = choose(rng, state_properties);
        let init = automaton.add_initial_state(property.clone()).unwrap();
        assert_eq!(automaton.initial_states().collect_vec(), vec![init]);
        assert_eq!(automaton.state_property(init).cloned(), property);

        let size = automaton.size();
        match automaton.add_initial_state(None) {
            Ok(second) => {
                assert!(!automaton.determinism().is_deterministic());
                assert_eq!(automaton.initial_states().count(), 2);
                automaton.set_initial(second, false).unwrap();
            }
            Err(e) => {
                assert!(automaton.determinism().is_deterministic());
                assert_eq!(e, AutomatonError::MultipleInitialStates);
                assert_eq!(automaton.size(), size);
                assert_eq!(
                    automaton.set_initial(existing, true),
                    Err(AutomatonError::MultipleInitialStates)
                );
            }
        }
        assert_eq!(automaton.initial_states().collect_vec(), vec![init]);

        automaton.set_initial(init, false).unwrap();
        automaton.set_initial(existing, true).unwrap();
        assert_eq!(automaton.initial_states().collect_vec(), vec![existing]);
        assert_eq!(automaton.state_property(existing).cloned(), existing_property);
    }

    fn remove_single_and_check<M: MutableAutomaton<Alphabet = IntAlphabet>>(
        automaton: &mut M,
        rng: &mut Rng,
    ) {
        let alphabet = *automaton.alphabet();
        let ids = automaton.state_ids();
        let state_index = rng.usize(..ids.len());
        let symbol_index = rng.usize(..alphabet.size());
        let q = ids.state(state_index).unwrap();
        let a = alphabet.symbol(symbol_index).unwrap();

        let before = signature(automaton);
        automaton.remove_transitions(q, a);
        assert_eq!(automaton.transitions(q, a).count(), 0);
        assert_eq!(automaton.successors(q, a).count(), 0);
        let after = signature(automaton);

        check_locality(&before, &after, state_index * alphabet.size() + symbol_index, 1);
    }

    fn remove_all_and_check<M: MutableAutomaton<Alphabet = IntAlphabet>>(
        automaton: &mut M,
        rng: &mut Rng,
    ) {
        let alphabet = *automaton.alphabet();
        let ids = automaton.state_ids();
        let state_index = rng.usize(..ids.len());
        let q = ids.state(state_index).unwrap();

        let before = signature(automaton);
        automaton.remove_all_transitions(q);
        for a in alphabet.universe() {
            assert_eq!(automaton.transitions(q, a).count(), 0);
        }
        let after = signature(automaton);

        check_locality(
            &before,
            &after,
            state_index * alphabet.size(),
            alphabet.size(),
        );
    }

    fn clear_and_check<M: MutableAutomaton<Alphabet = IntAlphabet>>(automaton: &mut M) {
        automaton.clear();
        assert_eq!(automaton.size(), 0);
        assert_eq!(automaton.states().count(), 0);
        assert_eq!(automaton.initial_states().count(), 0);

        automaton.clear();
        assert_eq!(automaton.size(), 0);

        for _ in 0..SIZE {
            automaton.add_state(None).unwrap();
        }
        check_empty(automaton);
    }

    fn check_contract<M: MutableAutomaton<Alphabet = IntAlphabet>>(
        mut automaton: M,
        state_properties: &[M::StateProperty],
        transition_properties: &[M::TransitionProperty],
    ) {
        let mut rng = Rng::with_seed(42);
        for _ in 0..SIZE {
            automaton.add_state(None).unwrap();
        }
        check_empty(&automaton);

        fill_randomly(
            &mut automaton,
            &mut rng,
            state_properties,
            transition_properties,
        );
        add_initial_and_check(&mut automaton, &mut rng, state_properties);
        remove_single_and_check(&mut automaton, &mut rng);
        remove_all_and_check(&mut automaton, &mut rng);
        clear_and_check(&mut automaton);
    }

    #[test_log::test]
    fn dfa_contract() {
        check_contract(DFA::<IntAlphabet>::new(alphabet()), &[true, false], &[]);
    }

    #[test_log::test]
    fn bounded_dfa_contract() {
        check_contract(
            DFA::<IntAlphabet>::bounded(alphabet(), 3 * SIZE),
            &[true, false],
            &[],
        );
    }

    #[test_log::test]
    fn nfa_contract() {
        check_contract(NFA::<IntAlphabet>::new(alphabet()), &[true, false], &[]);
    }

    #[test]
    fn mealy_contract() {
        check_contract(
            MealyMachine::<IntAlphabet, char>::new(alphabet()),
            &[],
            &['x', 'y', 'z'],
        );
    }

    #[test]
    fn moore_contract() {
        check_contract(
            MooreMachine::<IntAlphabet, usize>::new(alphabet()),
            &[0, 1, 2],
            &[],
        );
    }

    #[test]
    fn mts_contract() {
        check_contract(
            MTS::<IntAlphabet>::new(alphabet()),
            &[],
            &[ModalEdge::must(), ModalEdge::may()],
        );
    }

    #[test]
    fn bounded_capacity() {
        let mut dfa = DFA::<IntAlphabet>::bounded(alphabet(), 2);
        dfa.add_state(None).unwrap();
        let q1 = dfa.add_state(None).unwrap();
        let generation = dfa.generation();
        assert_eq!(
            dfa.add_state(None),
            Err(AutomatonError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(dfa.size(), 2);
        assert_eq!(dfa.generation(), generation);

        dfa.remove_state(q1);
        assert!(dfa.add_state(None).is_ok());
        assert_eq!(dfa.max_states(), Some(2));
    }

    #[test]
    fn deterministic_rejects_multiple_transitions() {
        let mut dfa = DFA::for_alphabet(CharAlphabet::of_size(2));
        let q0 = dfa.add_initial_state(Some(true)).unwrap();
        let q1 = dfa.add_state(Some(false)).unwrap();
        let t0 = dfa.add_new_transition(q0, 'a', q1, None).unwrap();

        let t1 = dfa.create_transition(Some(q0), None);
        let t2 = dfa.create_transition(Some(q1), None);
        assert_eq!(
            dfa.set_transitions(q0, 'a', [t1, t2]),
            Err(AutomatonError::NondeterministicTransitions { count: 2 })
        );
        assert_eq!(dfa.transition(q0, 'a'), Some(t0));
        assert_eq!(
            dfa.add_new_transition(q0, 'a', q0, None),
            Err(AutomatonError::NondeterministicTransitions { count: 2 })
        );
        assert_eq!(dfa.successor(q0, 'a'), Some(q1));

        dfa.set_transition(q0, 'a', Some(t1)).unwrap();
        assert_eq!(dfa.successor(q0, 'a'), Some(q0));
        assert_eq!(dfa.target(t0), None);

        dfa.set_transition(q0, 'a', None).unwrap();
        assert_eq!(dfa.transition(q0, 'a'), None);
        assert_eq!(dfa.successor(q0, 'a'), None);
        assert_eq!(dfa.transition_property_on(q0, 'a'), None);
    }

    #[test]
    fn deterministic_initial_state() {
        let mut dfa = DFA::for_alphabet(CharAlphabet::of_size(1));
        let q0 = dfa.add_state(None).unwrap();
        let q1 = dfa.add_state(None).unwrap();
        assert_eq!(dfa.initial_state(), None);

        dfa.set_initial_state(Some(q0)).unwrap();
        assert_eq!(dfa.initial_state(), Some(q0));
        dfa.set_initial_state(Some(q1)).unwrap();
        assert_eq!(dfa.initial_states().collect_vec(), vec![q1]);
        dfa.set_initial_state(None).unwrap();
        assert_eq!(dfa.initial_state(), None);
    }

    #[test]
    fn set_transitions_replaces() {
        let mut nfa = NFA::for_alphabet(CharAlphabet::of_size(2));
        let q0 = nfa.add_state(None).unwrap();
        let q1 = nfa.add_state(None).unwrap();
        let t0 = nfa.add_new_transition(q0, 'a', q0, None).unwrap();
        let t1 = nfa.add_new_transition(q0, 'a', q1, None).unwrap();
        let other = nfa.add_new_transition(q0, 'b', q1, None).unwrap();
        assert_eq!(nfa.transitions(q0, 'a').collect_vec(), vec![t0, t1]);

        let t2 = nfa.create_transition(Some(q0), None);
        nfa.set_transitions(q0, 'a', [t1, t2]).unwrap();
        assert_eq!(nfa.transitions(q0, 'a').collect_vec(), vec![t1, t2]);
        assert_eq!(nfa.target(t0), None);
        assert_eq!(nfa.transitions(q0, 'b').collect_vec(), vec![other]);

        // adding a transition that is already there changes nothing
        nfa.add_transition(q0, 'a', t2).unwrap();
        assert_eq!(nfa.transitions(q0, 'a').count(), 2);
        assert_eq!(nfa.transition_count(), 3);
    }

    #[test]
    #[should_panic]
    fn transition_attached_twice_panics() {
        let mut nfa = NFA::for_alphabet(CharAlphabet::of_size(2));
        let q0 = nfa.add_state(None).unwrap();
        let t = nfa.add_new_transition(q0, 'a', q0, None).unwrap();
        let _ = nfa.add_transition(q0, 'b', t);
    }

    #[test]
    #[should_panic]
    fn foreign_state_panics() {
        let mut dfa = DFA::for_alphabet(CharAlphabet::of_size(2));
        dfa.add_state(None).unwrap();
        dfa.set_state_property(StateId::from(42), Some(true));
    }

    #[test]
    fn dangling_transitions() {
        let mut mealy: MealyMachine<CharAlphabet, char> =
            MealyMachine::for_alphabet(CharAlphabet::of_size(1));
        let q0 = mealy.add_initial_state(None).unwrap();
        let q1 = mealy.add_state(None).unwrap();
        let t = mealy.create_transition(None, Some('o'));
        mealy.add_transition(q0, 'a', t).unwrap();

        assert_eq!(mealy.transitions(q0, 'a').collect_vec(), vec![t]);
        assert_eq!(mealy.successors(q0, 'a').count(), 0);
        assert_eq!(mealy.transition_property(t), Some(&'o'));

        mealy.set_transition_target(t, Some(q1));
        assert_eq!(mealy.successor(q0, 'a'), Some(q1));
        mealy.set_transition_property(t, None);
        assert_eq!(mealy.transition_property_on(q0, 'a'), None);
    }

    #[test_log::test]
    fn remove_state_drops_incident_transitions() {
        let mut nfa = NFA::for_alphabet(CharAlphabet::of_size(2));
        let q0 = nfa.add_state(Some(false)).unwrap();
        let q1 = nfa.add_initial_state(Some(true)).unwrap();
        let q2 = nfa.add_state(None).unwrap();
        nfa.add_new_transition(q0, 'a', q1, None).unwrap();
        nfa.add_new_transition(q0, 'a', q2, None).unwrap();
        let kept = nfa.add_new_transition(q0, 'b', q0, None).unwrap();
        nfa.add_new_transition(q1, 'a', q2, None).unwrap();
        nfa.add_new_transition(q2, 'b', q1, None).unwrap();
        let unattached = nfa.create_transition(Some(q1), None);
        let generation = nfa.generation();

        assert_eq!(nfa.remove_state(q1), Some(Some(true)));
        assert_eq!(nfa.remove_state(q1), None);
        assert_ne!(nfa.generation(), generation);
        assert_eq!(nfa.size(), 2);
        assert!(!nfa.contains_state(q1));
        assert_eq!(nfa.initial_states().count(), 0);

        assert_eq!(nfa.successors(q0, 'a').collect_vec(), vec![q2]);
        assert_eq!(nfa.transitions(q0, 'b').collect_vec(), vec![kept]);
        assert_eq!(nfa.transitions(q2, 'b').count(), 0);
        assert_eq!(nfa.transitions(q1, 'a').count(), 0);
        assert_eq!(nfa.target(unattached), None);
    }

    #[test]
    fn state_ids_become_stale() {
        let mut dfa = DFA::for_alphabet(CharAlphabet::of_size(1));
        let q0 = dfa.add_state(None).unwrap();
        let q1 = dfa.add_state(None).unwrap();
        let ids = dfa.state_ids();
        assert_eq!(ids.iter().collect_vec(), vec![(0, q0), (1, q1)]);
        assert!(ids.validate(&dfa).is_ok());

        // changing properties and transitions leaves the indices intact
        dfa.set_state_property(q0, Some(true));
        dfa.add_new_transition(q0, 'a', q1, None).unwrap();
        assert!(ids.is_current(&dfa));

        dfa.remove_state(q0);
        assert_eq!(
            ids.validate(&dfa).unwrap_err(),
            AutomatonError::StaleStateIds {
                taken: ids.generation(),
                current: dfa.generation(),
            }
        );
        assert_eq!(dfa.state_ids().index(q1), Some(0));
    }

    #[test]
    fn clear_restarts_numbering() {
        let mut nfa = NFA::for_alphabet(CharAlphabet::of_size(1));
        let q0 = nfa.add_initial_state(None).unwrap();
        nfa.add_state(None).unwrap();
        let ids = nfa.state_ids();
        nfa.clear();
        assert!(!ids.is_current(&nfa));
        assert!(nfa.is_empty());
        assert_eq!(nfa.add_state(None).unwrap(), q0);
        assert!(!nfa.is_initial(q0));
    }

    #[test]
    fn transition_table_rendering() {
        let mut dfa = DFA::for_alphabet(CharAlphabet::of_size(2));
        let q0 = dfa.add_initial_state(Some(false)).unwrap();
        let q1 = dfa.add_state(Some(true)).unwrap();
        dfa.add_new_transition(q0, 'a', q1, None).unwrap();
        dfa.add_new_transition(q1, 'b', q0, None).unwrap();

        let table = dfa.transition_table();
        assert!(table.contains("→ q0 : false"));
        assert!(table.contains("q1 : true"));
        assert!(table.contains("'a'"));
        assert_eq!(format!("{:?}", dfa), format!("{table}\n"));
    }
}
