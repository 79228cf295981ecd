use balanced_bst::{Node, Order, Tree, TreeError};

use std::collections::HashSet;

/// Asserts that every node's value is larger than everything to its left and smaller
/// than everything to its right.
fn is_ordered(tree: &Tree<i8>) -> bool {
    let values: Vec<_> = tree.iter().collect();
    values.windows(2).all(|w| w[0] < w[1])
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree = Tree::new(xs.iter().copied());

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = Tree::new(xs.iter().copied());
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn no_duplicates_after_inserts(xs: Vec<i8>, inserts: Vec<i8>) -> bool {
    let mut tree = Tree::new(xs.iter().copied());
    tree.extend(inserts.iter().copied());
    tree.extend(inserts.iter().copied());

    let distinct: HashSet<_> = xs.iter().chain(&inserts).collect();
    is_ordered(&tree) && tree.len() == distinct.len() && tree.iter().count() == distinct.len()
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new(xs.iter().copied());
    for delete in &deletes {
        tree.delete(delete);
        if !is_ordered(&tree) {
            return false;
        }
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
}

#[quickcheck]
fn delete_keeps_the_successor(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new(xs);
    let mut targets: Vec<(i8, i8)> = Vec::new();
    tree.pre_order(Some(|node: &Node<i8>| {
        if let (Some(_), Some(right)) = (node.left(), node.right()) {
            let mut successor = right;
            while let Some(left) = successor.left() {
                successor = left;
            }
            targets.push((*node.value(), *successor.value()));
        }
    }))
    .unwrap();

    match targets.first() {
        None => true,
        Some(&(deleted, successor)) => {
            tree.delete(&deleted) == Some(deleted)
                && tree.contains(&successor)
                && !tree.contains(&deleted)
                && is_ordered(&tree)
        }
    }
}

#[quickcheck]
fn rebalance_keeps_values(xs: Vec<i8>, inserts: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new(xs);
    tree.extend(inserts);
    for delete in &deletes {
        tree.delete(delete);
    }
    let before: Vec<i8> = tree.iter().copied().collect();

    tree.rebalance();

    let after: Vec<i8> = tree.iter().copied().collect();
    before == after && tree.is_balanced()
}

#[quickcheck]
fn visitors_agree_with_iterators(xs: Vec<i8>) -> bool {
    let tree = Tree::new(xs);
    let orders = [
        Order::PreOrder,
        Order::InOrder,
        Order::PostOrder,
        Order::LevelOrder,
    ];

    orders.iter().all(|&order| {
        let mut visited = Vec::new();
        let visitor = Some(|node: &Node<i8>| visited.push(*node.value()));
        let result = match order {
            Order::PreOrder => tree.pre_order(visitor),
            Order::InOrder => tree.in_order(visitor),
            Order::PostOrder => tree.post_order(visitor),
            Order::LevelOrder => tree.level_order(visitor),
        };
        let expected: Vec<i8> = tree.traverse(order).map(|n| *n.value()).collect();
        result.is_ok() && visited == expected
    })
}

#[quickcheck]
fn missing_visitor_is_rejected(xs: Vec<i8>) -> bool {
    let tree = Tree::new(xs);

    tree.level_order(None::<fn(&Node<i8>)>) == Err(TreeError::MissingVisitor(Order::LevelOrder))
}
