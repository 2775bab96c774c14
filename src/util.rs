/// Index combinations of size `k` drawn from `0..pool`, in lexicographic order.
/// Yields nothing when `k > pool`.
#[derive(Debug, Clone)]
pub struct Combinations {
    pool: usize,
    indices: Vec<usize>,
    first: bool,
    done: bool,
}

impl Combinations {
    pub fn new(pool: usize, k: usize) -> Self {
        Combinations {
            pool,
            indices: (0..k).collect(),
            first: true,
            done: k > pool,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if self.first {
            self.first = false;
            return Some(self.indices.clone());
        }

        let k = self.indices.len();
        let Some(i) = (0..k)
            .rev()
            .find(|&i| self.indices[i] != i + self.pool - k)
        else {
            self.done = true;
            return None;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

/// Permutations of distinct items in lexicographic order, starting from the
/// order given.
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Option<Vec<usize>>,
}

impl Permutations {
    pub fn new(mut items: Vec<usize>) -> Self {
        items.sort_unstable();
        Permutations {
            current: Some(items),
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.current.take()?;
        let mut next = current.clone();
        if let Some(i) = (0..next.len().saturating_sub(1))
            .rev()
            .find(|&i| next[i] < next[i + 1])
        {
            if let Some(j) = (i + 1..next.len()).rev().find(|&j| next[j] > next[i]) {
                next.swap(i, j);
                next[i + 1..].reverse();
                self.current = Some(next);
            }
        }
        Some(current)
    }
}

/// Every permutation of every size-`k` combination of `0..pool`.
pub fn ordered_selections(pool: usize, k: usize) -> impl Iterator<Item = Vec<usize>> {
    Combinations::new(pool, k).flat_map(Permutations::new)
}

/// Number of items `ordered_selections` yields, `None` on overflow.
pub fn ordered_selection_count(pool: usize, k: usize) -> Option<u64> {
    if k > pool {
        return Some(0);
    }
    ((pool - k + 1)..=pool).try_fold(1u64, |acc, x| acc.checked_mul(x as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combinations() {
        let all: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(Combinations::new(3, 3).count(), 1);
        assert_eq!(Combinations::new(2, 3).count(), 0);
        assert_eq!(Combinations::new(3, 0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_permutations() {
        let all: Vec<Vec<usize>> = Permutations::new(vec![2, 0, 5]).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 2, 5],
                vec![0, 5, 2],
                vec![2, 0, 5],
                vec![2, 5, 0],
                vec![5, 0, 2],
                vec![5, 2, 0]
            ]
        );
        assert_eq!(Permutations::new(vec![]).count(), 1);
        assert_eq!(Permutations::new(vec![4]).count(), 1);
    }

    #[test]
    fn test_ordered_selection_count() {
        assert_eq!(ordered_selections(5, 3).count() as u64, 60);
        assert_eq!(ordered_selection_count(5, 3), Some(60));
        assert_eq!(ordered_selection_count(2, 3), Some(0));
        assert_eq!(ordered_selections(2, 3).count(), 0);
        assert_eq!(ordered_selection_count(200, 100), None);
    }
}
