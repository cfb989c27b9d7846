//! Minimum and second minimum by single-elimination tournament.
//!
//! Every input index enters as a one-element bracket. Combining two brackets plays
//! one match between their winners: the loser's own record is discarded in O(1) and
//! the losing winner is appended to the survivor's loser list. Feeding the combine
//! through [`BinaryReducer`] keeps brackets balanced, so the champion plays at most
//! ceil(lg n) matches and the second minimum is found among its direct losers with
//! at most n + ceil(lg n) - 2 comparisons in total. The stable variant keeps two
//! loser lists, split by which side of the champion the loser came from, so that
//! ties resolve to the earliest input position exactly like a stable sort.

use crate::arena::{ListArena, Queue};
use crate::reducer::BinaryReducer;

#[derive(Clone, Copy)]
struct Bracket {
    winner: usize,
    losers: Queue,
}

#[derive(Clone, Copy)]
struct StableBracket {
    winner: usize,
    // Losers that preceded the winner in the input, front-to-back in input order.
    before: Queue,
    // Losers that followed it, front-to-back in reverse input order.
    after: Queue,
}

/// Plays `x` (the earlier block) against `y` (the later block). Ties go to `x`.
fn combine<T, F>(
    arena: &mut ListArena<usize>,
    items: &[T],
    less: &mut F,
    x: Bracket,
    y: Bracket,
) -> Bracket
where
    F: FnMut(&T, &T) -> bool,
{
    if less(&items[y.winner], &items[x.winner]) {
        arena.free_queue(x.losers);
        Bracket {
            winner: y.winner,
            // x precedes everything already recorded against y.
            losers: arena.push_front(y.losers, x.winner),
        }
    } else {
        arena.free_queue(y.losers);
        Bracket {
            winner: x.winner,
            losers: arena.push_back(x.losers, y.winner),
        }
    }
}

fn combine_stable<T, F>(
    arena: &mut ListArena<usize>,
    items: &[T],
    less: &mut F,
    x: StableBracket,
    y: StableBracket,
) -> StableBracket
where
    F: FnMut(&T, &T) -> bool,
{
    if less(&items[y.winner], &items[x.winner]) {
        arena.free_queue(x.before);
        arena.free_queue(x.after);
        StableBracket {
            winner: y.winner,
            before: arena.push_front(y.before, x.winner),
            after: y.after,
        }
    } else {
        arena.free_queue(y.before);
        arena.free_queue(y.after);
        StableBracket {
            winner: x.winner,
            before: x.before,
            after: arena.push_front(x.after, y.winner),
        }
    }
}

/// Index held by the first queue node whose item is strictly smaller than every
/// node before it. The queue must be non-empty.
fn first_min_in<T, F>(arena: &ListArena<usize>, items: &[T], less: &mut F, q: Queue) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let mut best = q.front;
    let mut cursor = arena.next(best);
    while !cursor.is_nil() {
        if less(&items[*arena.value(cursor)], &items[*arena.value(best)]) {
            best = cursor;
        }
        cursor = arena.next(cursor);
    }
    *arena.value(best)
}

/// Like [`first_min_in`] but ties displace the incumbent, so the last minimal node
/// wins. Walking a reverse-input-order queue this yields the earliest input position.
fn last_min_in<T, F>(arena: &ListArena<usize>, items: &[T], less: &mut F, q: Queue) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let mut best = q.front;
    let mut cursor = arena.next(best);
    while !cursor.is_nil() {
        if !less(&items[*arena.value(best)], &items[*arena.value(cursor)]) {
            best = cursor;
        }
        cursor = arena.next(cursor);
    }
    *arena.value(best)
}

/// Positions of the minimum and the second minimum of `items` under `less`, in at
/// most n + ceil(lg n) - 2 comparisons. `None` on empty input; a singleton yields
/// its only position twice. Among equal minima the earliest position wins; the
/// second position is unspecified under ties (see
/// [`min_and_second_min_stable`] for the stable rule).
pub fn min_and_second_min<T, F>(items: &[T], mut less: F) -> Option<(usize, usize)>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut arena = ListArena::new();
    let mut counter = BinaryReducer::new();
    for i in 0..items.len() {
        counter.add(
            Bracket {
                winner: i,
                losers: Queue::EMPTY,
            },
            |x, y| combine(&mut arena, items, &mut less, x, y),
        );
    }
    let champion = counter.reduce(|x, y| combine(&mut arena, items, &mut less, x, y))?;
    let second = if champion.losers.is_empty() {
        champion.winner
    } else {
        first_min_in(&arena, items, &mut less, champion.losers)
    };
    Some((champion.winner, second))
}

/// Stable variant of [`min_and_second_min`]: the result equals the first two
/// positions of a stable sort of `items`, at the same comparison bound.
pub fn min_and_second_min_stable<T, F>(items: &[T], mut less: F) -> Option<(usize, usize)>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut arena = ListArena::new();
    let mut counter = BinaryReducer::new();
    for i in 0..items.len() {
        counter.add(
            StableBracket {
                winner: i,
                before: Queue::EMPTY,
                after: Queue::EMPTY,
            },
            |x, y| combine_stable(&mut arena, items, &mut less, x, y),
        );
    }
    let champion = counter.reduce(|x, y| combine_stable(&mut arena, items, &mut less, x, y))?;
    let second = match (champion.before.is_empty(), champion.after.is_empty()) {
        (true, true) => champion.winner,
        (false, true) => first_min_in(&arena, items, &mut less, champion.before),
        (true, false) => last_min_in(&arena, items, &mut less, champion.after),
        (false, false) => {
            let b = first_min_in(&arena, items, &mut less, champion.before);
            let a = last_min_in(&arena, items, &mut less, champion.after);
            // An earlier loser wins ties, and everything in `before` is earlier.
            if less(&items[a], &items[b]) { a } else { b }
        }
    };
    Some((champion.winner, second))
}

/// The pragmatic baseline: one pass keeping first and second place, roughly 2n
/// comparisons. Same results as [`min_and_second_min_stable`].
pub fn min_and_second_min_scan<T, F>(items: &[T], mut less: F) -> Option<(usize, usize)>
where
    F: FnMut(&T, &T) -> bool,
{
    if items.is_empty() {
        return None;
    }
    if items.len() == 1 {
        return Some((0, 0));
    }
    let (mut first, mut second) = if less(&items[1], &items[0]) {
        (1, 0)
    } else {
        (0, 1)
    };
    for i in 2..items.len() {
        if less(&items[i], &items[second]) {
            if less(&items[i], &items[first]) {
                second = first;
                first = i;
            } else {
                second = i;
            }
        }
    }
    Some((first, second))
}
