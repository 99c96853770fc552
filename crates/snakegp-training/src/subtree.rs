//! Randomized subtree picking and replacement.
//!
//! Both walks start at the root and, at every node, first draw a stop
//! decision; when the walk goes on, a second draw picks one child uniformly.
//! Reaching a leaf always stops the walk. Trees are never modified: the
//! replacement walk rebuilds only the nodes on the path it took and shares
//! every other subtree with the input.

use std::sync::Arc;

use rand::Rng;
use snakegp_program::Expr;

use crate::draw;

/// Probability that [`random_subtree`] stops at the current node.
pub const PICK_STOP_PROBABILITY: f64 = 0.2;

/// Probability that [`set_random_subtree`] substitutes at the current node.
pub const SUBSTITUTE_PROBABILITY: f64 = 0.25;

/// Returns a randomly picked subtree of `tree` (possibly `tree` itself).
///
/// The returned `Arc` points into `tree`.
pub fn random_subtree<R>(rng: &mut R, tree: &Arc<Expr>) -> Arc<Expr>
where
    R: Rng + ?Sized,
{
    let mut node = tree;
    loop {
        if draw::chance(rng, PICK_STOP_PROBABILITY) {
            return Arc::clone(node);
        }
        let children = node.children();
        if children.is_empty() {
            return Arc::clone(node);
        }
        node = children[draw::index(rng, children.len())];
    }
}

/// Returns a copy of `tree` in which one randomly chosen subtree is replaced
/// by `replacement`.
pub fn set_random_subtree<R>(rng: &mut R, tree: &Arc<Expr>, replacement: Arc<Expr>) -> Arc<Expr>
where
    R: Rng + ?Sized,
{
    if draw::chance(rng, SUBSTITUTE_PROBABILITY) {
        return replacement;
    }
    let children = tree.children();
    if children.is_empty() {
        return replacement;
    }
    let index = draw::index(rng, children.len());
    let child = set_random_subtree(rng, children[index], replacement);
    Arc::new(tree.with_child(index, child))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use snakegp_program::BinaryOperation;

    use super::*;
    use crate::{generator::TreeGenerator, test_util::SequenceRng};

    fn contains(tree: &Arc<Expr>, node: &Arc<Expr>) -> bool {
        Arc::ptr_eq(tree, node) || tree.children().into_iter().any(|c| contains(c, node))
    }

    fn sample() -> Arc<Expr> {
        Arc::new(Expr::if_else(
            Expr::GetFieldInFront,
            Expr::binary(BinaryOperation::Add, Expr::GetX, Expr::num(1.0)),
            Expr::get_field(Expr::GetY, Expr::num(3.0)),
        ))
    }

    #[test]
    fn test_pick_follows_draws() {
        let tree = sample();
        // go on, branch 1 of 3, go on, branch 0 of 2, leaf
        let mut rng = SequenceRng::new([0.9, 0.5, 0.9, 0.1, 0.9]);
        let picked = random_subtree(&mut rng, &tree);
        assert_eq!(*picked, Expr::GetX);

        let mut rng = SequenceRng::new([0.0]);
        assert!(Arc::ptr_eq(&random_subtree(&mut rng, &tree), &tree));
    }

    #[test]
    fn test_picked_subtree_belongs_to_tree() {
        let generator = TreeGenerator::default();
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..200 {
            let tree = generator.generate(&mut rng, 0);
            let picked = random_subtree(&mut rng, &tree);
            assert!(contains(&tree, &picked));
        }
    }

    #[test]
    fn test_forced_substitution_returns_replacement() {
        let replacement = Arc::new(Expr::num(5.0));
        let mut rng = SequenceRng::new([0.0]);
        let result = set_random_subtree(&mut rng, &sample(), Arc::clone(&replacement));
        assert!(Arc::ptr_eq(&result, &replacement));
    }

    #[test]
    fn test_replacement_shares_untouched_subtrees() {
        let tree = sample();
        let replacement = Arc::new(Expr::num(5.0));
        // go on, branch 2 of 3, go on, branch 1 of 2, leaf
        let mut rng = SequenceRng::new([0.9, 0.9, 0.9, 0.9, 0.9]);
        let result = set_random_subtree(&mut rng, &tree, replacement);

        assert_eq!(
            result.to_string(),
            "if(field_in_front, (x + 1), field(y, 5))"
        );
        let (old, new) = (tree.children(), result.children());
        assert!(Arc::ptr_eq(old[0], new[0]));
        assert!(Arc::ptr_eq(old[1], new[1]));
        assert!(Arc::ptr_eq(old[2].children()[0], new[2].children()[0]));
        // input untouched
        assert_eq!(tree.to_string(), "if(field_in_front, (x + 1), field(y, 3))");
    }

    #[test]
    fn test_replacement_keeps_inputs_unchanged() {
        let generator = TreeGenerator::default();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let tree = generator.generate(&mut rng, 0);
            let replacement = generator.generate(&mut rng, 0);
            let (tree_before, replacement_before) = ((*tree).clone(), (*replacement).clone());
            let _ = set_random_subtree(&mut rng, &tree, Arc::clone(&replacement));
            assert_eq!(*tree, tree_before);
            assert_eq!(*replacement, replacement_before);
        }
    }
}
