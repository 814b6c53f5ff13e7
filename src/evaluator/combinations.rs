/// Iterator over every 5-element index subset of `0..n`, in lexicographic order.
///
/// Yields C(n, 5) subsets: 1 for five cards, 6 for six, 21 for seven. For `n < 5` it yields
/// nothing.
pub struct FiveOf {
    n: usize,
    indices: [usize; 5],
    done: bool,
}

impl FiveOf {
    pub const K: usize = 5;

    pub fn new(n: usize) -> Self {
        Self { n, indices: [0, 1, 2, 3, 4], done: n < Self::K }
    }
}

impl Iterator for FiveOf {
    type Item = [usize; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices;

        // Find the rightmost index that can still move right
        let mut i = Self::K - 1;
        loop {
            if self.indices[i] < self.n - (Self::K - i) {
                self.indices[i] += 1;
                for j in (i + 1)..Self::K {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
        }

        Some(result)
    }
}
