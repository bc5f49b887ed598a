use std::fmt::Debug;

macro_rules! opaque_id_type {
    ($($(#[$meta:meta])* $name:ident => $prefix:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $name(usize);

            impl $name {
                /// Returns the raw number behind the identity.
                pub fn index(self) -> usize {
                    self.0
                }
            }

            impl From<usize> for $name {
                fn from(value: usize) -> Self {
                    Self(value)
                }
            }

            impl From<$name> for usize {
                fn from(value: $name) -> Self {
                    value.0
                }
            }

            impl Debug for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, concat!($prefix, "{}"), self.0)
                }
            }
        )*
    };
}

opaque_id_type!(
    /// Identity of a state in a [`super::HashAutomaton`]. Identities are handed out in
    /// increasing order and are never reused, except after the automaton is cleared.
    StateId => "q",
    /// Identity of a transition in a [`super::HashAutomaton`].
    TransitionId => "t",
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_print_with_prefix() {
        assert_eq!(format!("{:?}", StateId::from(3)), "q3");
        assert_eq!(format!("{:?}", TransitionId::from(0)), "t0");
        assert!(StateId::from(1) < StateId::from(2));
        assert_eq!(usize::from(StateId::from(7)), 7);
    }
}
