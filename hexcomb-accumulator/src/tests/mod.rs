mod test_proofs;

use hexcomb_hash::Arity;

pub(crate) fn arity(k: usize) -> Arity {
    Arity::new(k).expect("test arity is valid")
}
