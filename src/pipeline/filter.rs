//! Selection stage
//!
//! Synchronous helpers used for counting; nothing here touches a channel.

/// Order-preserving sub-sequence of `items` satisfying `predicate`
pub fn filter<'a, I, P>(items: &'a [I], predicate: P) -> Vec<&'a I>
where
    P: Fn(&I) -> bool,
{
    items.iter().filter(|item| predicate(item)).collect()
}

/// Number of elements satisfying `predicate`
pub fn count_sat<I, P>(items: &[I], predicate: P) -> usize
where
    P: Fn(&I) -> bool,
{
    filter(items, predicate).len()
}

/// Whether at least one element satisfies `predicate`
pub fn any_sat<I, P>(items: &[I], predicate: P) -> bool
where
    P: Fn(&I) -> bool,
{
    count_sat(items, predicate) > 0
}
