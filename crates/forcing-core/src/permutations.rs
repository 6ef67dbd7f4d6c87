//! Row assignments for a 4x4 grid.
//!
//! A row assignment maps each column index to a distinct row index. There are
//! `4! = 24` of them and the validator walks every one.

use crate::SIZE;
use std::sync::OnceLock;

/// Number of row assignments for a 4x4 grid.
pub const COUNT: usize = 24;

/// A bijection column -> row: `perm[col]` is the row picked in `col`.
pub type Permutation = [usize; SIZE];

/// All 24 permutations of `0..4`, in lexicographic order.
pub fn all() -> &'static [Permutation; COUNT] {
    static PERMUTATIONS: OnceLock<[Permutation; COUNT]> = OnceLock::new();
    PERMUTATIONS.get_or_init(build)
}

fn build() -> [Permutation; COUNT] {
    let mut out = [[0; SIZE]; COUNT];
    let mut next = 0;
    let mut current = [0; SIZE];
    let mut used = [false; SIZE];
    extend(0, &mut current, &mut used, &mut out, &mut next);
    debug_assert_eq!(next, COUNT);
    out
}

fn extend(
    depth: usize,
    current: &mut Permutation,
    used: &mut [bool; SIZE],
    out: &mut [Permutation; COUNT],
    next: &mut usize,
) {
    if depth == SIZE {
        out[*next] = *current;
        *next += 1;
        return;
    }
    for row in 0..SIZE {
        if used[row] {
            continue;
        }
        used[row] = true;
        current[depth] = row;
        extend(depth + 1, current, used, out, next);
        used[row] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_count_and_distinct() {
        let perms = all();
        let unique: HashSet<_> = perms.iter().collect();
        assert_eq!(perms.len(), 24);
        assert_eq!(unique.len(), 24);
    }

    #[test]
    fn test_each_is_bijection() {
        for perm in all() {
            let mut sorted = *perm;
            sorted.sort_unstable();
            assert_eq!(sorted, [0, 1, 2, 3], "{:?} is not a permutation", perm);
        }
    }

    #[test]
    fn test_lexicographic_ends() {
        assert_eq!(all()[0], [0, 1, 2, 3]);
        assert_eq!(all()[COUNT - 1], [3, 2, 1, 0]);
    }
}
