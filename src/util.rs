/// The height of a tree holding `len` nodes where every level but the last is full, i.e.
/// `ceil(lg(len + 1))`. A rebuilt tree is never taller than this.
pub(crate) fn balanced_height(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize
}
