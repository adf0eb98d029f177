//! Levenshtein edit distance.

/// Classic Levenshtein distance between `a` and `b`, counted in Unicode
/// scalar values. Insertion, deletion and substitution each cost 1.
///
/// The table has `len(b) + 1` rows and `len(a) + 1` columns; edges hold the
/// index values, interior cells take the diagonal when characters match and
/// `1 + min(left, up, diagonal)` otherwise.
#[must_use]
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut table = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=b.len() {
        for j in 1..=a.len() {
            table[i][j] = if b[i - 1] == a[j - 1] {
                table[i - 1][j - 1]
            } else {
                1 + table[i - 1][j - 1]
                    .min(table[i][j - 1])
                    .min(table[i - 1][j])
            };
        }
    }

    table[b.len()][a.len()]
}

/// Returns the distance when it is at most `max`.
///
/// Skips the table entirely when the length difference alone already
/// exceeds `max`.
#[must_use]
pub fn within(a: &str, b: &str, max: usize) -> Option<usize> {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a.abs_diff(len_b) > max {
        return None;
    }
    let d = distance(a, b);
    (d <= max).then_some(d)
}
