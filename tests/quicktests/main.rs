use quickcheck::{Arbitrary, Gen};

mod tree;

/// An enum for the various kinds of "things" to do to
/// a tree in a quicktest.
#[derive(Clone, Debug)]
pub(crate) enum Op<T> {
    /// Add a single value.
    Add(T),
    /// Add a batch of values.
    AddAll(Vec<T>),
    /// Remove the first equal value.
    Remove(T),
    /// Remove every value equal to one of these.
    RemoveAll(Vec<T>),
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2, 3]).unwrap() {
            0 => Op::Add(T::arbitrary(g)),
            1 => Op::AddAll(Vec::arbitrary(g)),
            2 => Op::Remove(T::arbitrary(g)),
            3 => Op::RemoveAll(Vec::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
