use tracing::debug;

use super::{copy_graph, Bfs, CopyError, Dfs, Plain};
use crate::{
    graph::{AutomatonSink, TransitionEdge, TransitionGraph},
    math::{HashMapping, Mapping},
    prelude::*,
};

/// Selects the order in which [`copy_automaton`] visits the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Traversal {
    /// Copy all states, reachable or not.
    #[default]
    Plain,
    /// Copy the states reachable from the initial states, breadth first.
    Breadth,
    /// Copy the states reachable from the initial states, depth first.
    Depth,
}

/// Copies `source` into `destination`, which may be an entirely different kind of automaton
/// over the same symbols. State and transition properties are translated by `state_property`
/// and `transition_property`. After the structure has been copied, every initial state whose
/// copy exists is marked initial in the destination.
///
/// Dangling transitions of the source are not copied.
///
/// # Errors
/// Returns [`CopyError::Destination`] if `destination` refuses a state, a transition or an
/// initial marking. States and transitions copied up to that point are not rolled back, so
/// the destination may be left partly populated.
///
/// # Example
/// ```
/// use automata_model::prelude::*;
///
/// let mut dfa = DFA::for_alphabet(CharAlphabet::of_size(2));
/// let q0 = dfa.add_initial_state(Some(false)).unwrap();
/// let q1 = dfa.add_state(Some(true)).unwrap();
/// let unreachable = dfa.add_state(Some(true)).unwrap();
/// dfa.add_new_transition(q0, 'a', q1, None).unwrap();
/// dfa.add_new_transition(q1, 'b', q0, None).unwrap();
/// dfa.add_new_transition(unreachable, 'a', q0, None).unwrap();
///
/// let mut moore: MooreMachine<CharAlphabet, usize> = MooreMachine::for_alphabet(CharAlphabet::of_size(2));
/// let mapping = copy_automaton(
///     Traversal::Breadth,
///     &dfa,
///     &mut moore,
///     |q| dfa.state_property(q).map(|accepting| *accepting as usize),
///     |_| None,
/// )
/// .unwrap();
/// assert_eq!(moore.size(), 2);
/// assert!(!mapping.contains_key(&unreachable));
/// assert_eq!(moore.compute_state_outputs("ab".chars()), Some(vec![0, 1, 0]));
/// ```
pub fn copy_automaton<M1, M2, SF, TF>(
    traversal: Traversal,
    source: &M1,
    destination: &mut M2,
    state_property: SF,
    transition_property: TF,
) -> Result<HashMapping<M1::State, M2::State>, CopyError>
where
    M1: Automaton,
    M2: MutableAutomaton,
    M2::Alphabet: Alphabet<Symbol = SymbolOf<M1>>,
    SF: Fn(M1::State) -> Option<M2::StateProperty>,
    TF: Fn(M1::Transition) -> Option<M2::TransitionProperty>,
{
    let graph = TransitionGraph::new(source);
    let mut sink = AutomatonSink::new(destination);
    let node_property = |q: M1::State| state_property(q);
    let edge_property = |e: TransitionEdge<M1::State, SymbolOf<M1>, M1::Transition>| {
        (e.symbol, transition_property(e.transition))
    };

    let mapping = match traversal {
        Traversal::Plain => copy_graph(Plain, &graph, &mut sink, node_property, edge_property)?,
        Traversal::Breadth => copy_graph(
            Bfs::new(source.initial_states()),
            &graph,
            &mut sink,
            node_property,
            edge_property,
        )?,
        Traversal::Depth => copy_graph(
            Dfs::new(source.initial_states()),
            &graph,
            &mut sink,
            node_property,
            edge_property,
        )?,
    };

    let destination = sink.automaton();
    for initial in source.initial_states() {
        if let Some(copied) = mapping.get(&initial) {
            destination.set_initial(*copied, true)?;
        }
    }
    debug!(
        "copied {} of {} states using {traversal:?} traversal",
        mapping.len(),
        source.size()
    );
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;

    fn sample_nfa() -> (NFA, [StateId; 4]) {
        let mut nfa = NFA::for_alphabet(CharAlphabet::of_size(2));
        let q0 = nfa.add_initial_state(Some(false)).unwrap();
        let q1 = nfa.add_state(Some(true)).unwrap();
        let q2 = nfa.add_initial_state(None).unwrap();
        let q3 = nfa.add_state(Some(true)).unwrap();
        nfa.add_new_transition(q0, 'a', q0, None).unwrap();
        nfa.add_new_transition(q0, 'a', q1, None).unwrap();
        nfa.add_new_transition(q1, 'b', q0, None).unwrap();
        nfa.add_new_transition(q2, 'b', q1, None).unwrap();
        nfa.add_new_transition(q3, 'a', q3, None).unwrap();
        (nfa, [q0, q1, q2, q3])
    }

    #[test_log::test]
    fn plain_copy_preserves_language() {
        let (nfa, states) = sample_nfa();
        let mut copy = NFA::for_alphabet(CharAlphabet::of_size(2));
        let mapping = copy_automaton(
            Traversal::Plain,
            &nfa,
            &mut copy,
            |q| nfa.state_property(q).copied(),
            |_| None,
        )
        .unwrap();

        assert_eq!(copy.size(), 4);
        assert_eq!(mapping.len(), 4);
        let initial = copy.initial_states().sorted().collect_vec();
        assert_eq!(
            initial,
            [states[0], states[2]]
                .map(|q| *mapping.get(&q).unwrap())
                .into_iter()
                .sorted()
                .collect_vec()
        );
        for word in ["", "a", "ab", "aab", "b", "bb", "ba"] {
            assert_eq!(nfa.accepts(word.chars()), copy.accepts(word.chars()), "{word}");
        }
        for q in states {
            for a in ['a', 'b'] {
                assert_eq!(
                    nfa.successors(q, a)
                        .map(|p| *mapping.get(&p).unwrap())
                        .sorted()
                        .collect_vec(),
                    copy.successors(*mapping.get(&q).unwrap(), a)
                        .sorted()
                        .collect_vec()
                );
            }
        }
    }

    #[test]
    fn reachable_copy_drops_unreachable_states() {
        let (nfa, [_, _, _, q3]) = sample_nfa();
        for traversal in [Traversal::Breadth, Traversal::Depth] {
            let mut mts = MTS::for_alphabet(CharAlphabet::of_size(2));
            let mapping = copy_automaton(
                traversal,
                &nfa,
                &mut mts,
                |_| None,
                |_| Some(ModalEdge::must()),
            )
            .unwrap();
            assert_eq!(mts.size(), 3);
            assert!(!mapping.contains_key(&q3));
            assert_eq!(mts.initial_states().count(), 2);
            let q0 = *mapping.get(&StateId::from(0)).unwrap();
            assert_eq!(mts.must_successors(q0, 'a').count(), 2);
        }
    }

    #[test]
    fn deterministic_destination_rejects_nondeterminism() {
        let (nfa, _) = sample_nfa();
        let mut dfa = DFA::for_alphabet(CharAlphabet::of_size(2));
        let result = copy_automaton(
            Traversal::Plain,
            &nfa,
            &mut dfa,
            |q| nfa.state_property(q).copied(),
            |_| None,
        );
        assert_eq!(
            result.unwrap_err(),
            CopyError::Destination(AutomatonError::NondeterministicTransitions { count: 2 })
        );
    }

    #[test]
    fn bounded_destination_reports_capacity() {
        let (nfa, _) = sample_nfa();
        let mut small: NFA = HashAutomaton::bounded(CharAlphabet::of_size(2), 2);
        let result = copy_automaton(Traversal::Plain, &nfa, &mut small, |_| None, |_| None);
        assert_eq!(
            result.unwrap_err(),
            CopyError::Destination(AutomatonError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(small.size(), 2);
        assert_eq!(small.transition_count(), 0);
        assert_eq!(small.initial_states().count(), 0);
    }

    #[test]
    fn copy_into_graph_and_back() {
        let (nfa, _) = sample_nfa();
        let mut graph = SimpleGraph::new();
        let mapping =
            copy_universal_graph(Plain, &TransitionGraph::new(&nfa), &mut graph).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 5);
        let q1 = *mapping.get(&StateId::from(1)).unwrap();
        assert_eq!(graph.node_property(q1), Some(true));

        let mut back = NFA::for_alphabet(CharAlphabet::of_size(2));
        let mut sink = AutomatonSink::new(&mut back);
        copy_universal_graph(Plain, &graph, &mut sink).unwrap();
        assert_eq!(back.size(), 4);
        let view = TransitionGraph::new(&back);
        assert_eq!(
            view.nodes()
                .map(|q| view.outgoing_edges(q).count())
                .sum::<usize>(),
            5
        );
    }
}
