use crate::selection::PopSpec;
use rand::seq::{index, SliceRandom};
use rand::Rng;
use std::num::{NonZeroI64, NonZeroUsize};

/// The two halves of a line sequence after a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub extracted: Vec<String>,
    pub retained: Vec<String>,
}

impl Selection {
    pub fn total_lines(&self) -> usize {
        self.extracted.len() + self.retained.len()
    }
}

/// Splits `lines` into extracted and retained sets according to `spec`.
///
/// Retained lines always keep their original order. Extracted lines are in
/// file order except for unordered random picks.
pub fn select<R: Rng + ?Sized>(spec: &PopSpec, lines: Vec<String>, rng: &mut R) -> Selection {
    let indices = extracted_indices(spec, lines.len(), rng);
    partition(lines, &indices)
}

/// 0-origin positions of the lines `spec` extracts, in output order.
/// Every index is distinct and below `len`.
pub fn extracted_indices<R: Rng + ?Sized>(
    spec: &PopSpec,
    len: usize,
    rng: &mut R,
) -> Vec<usize> {
    match spec {
        PopSpec::Head { count } => head_indices(*count, len),
        PopSpec::Tail { count } => tail_indices(*count, len),
        PopSpec::Random {
            count,
            keep_ordered,
        } => random_indices(*count, *keep_ordered, len, rng),
        PopSpec::Range { start, stop, step } => range_indices(*start, *stop, *step, len),
        PopSpec::Specific { lines } => specific_indices(lines, len),
    }
}

fn partition(lines: Vec<String>, indices: &[usize]) -> Selection {
    let mut slots: Vec<Option<String>> = lines.into_iter().map(Some).collect();

    let extracted = indices
        .iter()
        .filter_map(|&i| slots.get_mut(i).and_then(Option::take))
        .collect();
    let retained = slots.into_iter().flatten().collect();

    Selection {
        extracted,
        retained,
    }
}

fn magnitude(count: NonZeroI64) -> usize {
    usize::try_from(count.get().unsigned_abs()).unwrap_or(usize::MAX)
}

fn head_indices(count: NonZeroI64, len: usize) -> Vec<usize> {
    let n = magnitude(count);
    if count.get() > 0 {
        (0..n.min(len)).collect()
    } else {
        // all but the last |n|
        (0..len.saturating_sub(n)).collect()
    }
}

fn tail_indices(count: NonZeroI64, len: usize) -> Vec<usize> {
    let n = magnitude(count);
    if count.get() > 0 {
        (len.saturating_sub(n)..len).collect()
    } else {
        // all but the first |n|
        (n.min(len)..len).collect()
    }
}

fn random_indices<R: Rng + ?Sized>(
    count: NonZeroUsize,
    keep_ordered: bool,
    len: usize,
    rng: &mut R,
) -> Vec<usize> {
    let count = count.get();

    // Asking for everything always yields a shuffled file, ordered or not.
    if count >= len {
        let mut all: Vec<usize> = (0..len).collect();
        all.shuffle(rng);
        return all;
    }

    let mut picked = index::sample(rng, len, count).into_vec();
    if keep_ordered {
        picked.sort_unstable();
    } else {
        picked.shuffle(rng);
    }
    picked
}

fn range_indices(
    start: NonZeroI64,
    stop: NonZeroI64,
    step: NonZeroUsize,
    len: usize,
) -> Vec<usize> {
    let n = i64::try_from(len).unwrap_or(i64::MAX);

    let start = start.get();
    let start = if start > 0 { start - 1 } else { n + start };

    let stop = stop.get();
    let stop = if stop < 0 { n + stop + 1 } else { stop };

    let lo = clamp_slice_bound(start, n);
    // A stop resolving to 0 means "through the last line".
    let hi = if stop == 0 { n } else { clamp_slice_bound(stop, n) };

    (lo..hi)
        .step_by(step.get())
        .filter_map(|i| usize::try_from(i).ok())
        .collect()
}

/// Slice bound semantics: negatives count from the end once more, then the
/// result is clamped into `[0, len]`.
fn clamp_slice_bound(bound: i64, len: i64) -> i64 {
    let bound = if bound < 0 { bound.saturating_add(len) } else { bound };
    bound.clamp(0, len)
}

fn specific_indices(lines: &[NonZeroI64], len: usize) -> Vec<usize> {
    let n = i64::try_from(len).unwrap_or(i64::MAX);

    let mut indices: Vec<usize> = lines
        .iter()
        .filter_map(|line| {
            let mut num = line.get();
            if num < 0 {
                num = n + num + 1;
                if num <= 0 {
                    return None;
                }
            }
            if num <= n {
                usize::try_from(num - 1).ok()
            } else {
                None
            }
        })
        .collect();

    indices.sort_unstable();
    indices.dedup();
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_lines() -> Vec<String> {
        ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect()
    }

    fn run(spec: PopSpec) -> Selection {
        let mut rng = StdRng::seed_from_u64(7);
        select(&spec, sample_lines(), &mut rng)
    }

    fn assert_partition(selection: &Selection, original: &[String]) {
        assert_eq!(selection.total_lines(), original.len());

        let mut rebuilt: Vec<&String> = selection
            .extracted
            .iter()
            .chain(selection.retained.iter())
            .collect();
        rebuilt.sort();
        let mut expected: Vec<&String> = original.iter().collect();
        expected.sort();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_head() {
        let selection = run(PopSpec::head(2).unwrap());
        assert_eq!(selection.extracted, vec!["a", "b"]);
        assert_eq!(selection.retained, vec!["c", "d", "e"]);

        let selection = run(PopSpec::head(10).unwrap());
        assert_eq!(selection.extracted, sample_lines());
        assert!(selection.retained.is_empty());
    }

    #[test]
    fn test_negative_head_keeps_the_tail() {
        let selection = run(PopSpec::head(-2).unwrap());
        assert_eq!(selection.extracted, vec!["a", "b", "c"]);
        assert_eq!(selection.retained, vec!["d", "e"]);

        let selection = run(PopSpec::head(-5).unwrap());
        assert!(selection.extracted.is_empty());
        assert_eq!(selection.retained, sample_lines());
    }

    #[test]
    fn test_tail() {
        let selection = run(PopSpec::tail(2).unwrap());
        assert_eq!(selection.extracted, vec!["d", "e"]);
        assert_eq!(selection.retained, vec!["a", "b", "c"]);

        let selection = run(PopSpec::tail(-3).unwrap());
        assert_eq!(selection.extracted, vec!["d", "e"]);
        assert_eq!(selection.retained, vec!["a", "b", "c"]);

        let selection = run(PopSpec::tail(-9).unwrap());
        assert!(selection.extracted.is_empty());
    }

    #[test]
    fn test_range_is_inclusive_and_one_origin() {
        let selection = run(PopSpec::range(2, 4, None).unwrap());
        assert_eq!(selection.extracted, vec!["b", "c", "d"]);
        assert_eq!(selection.retained, vec!["a", "e"]);
    }

    #[test]
    fn test_range_with_negative_bounds() {
        let selection = run(PopSpec::range(3, -1, None).unwrap());
        assert_eq!(selection.extracted, vec!["c", "d", "e"]);
        assert_eq!(selection.retained, vec!["a", "b"]);

        let selection = run(PopSpec::range(-2, -1, None).unwrap());
        assert_eq!(selection.extracted, vec!["d", "e"]);

        // -6 resolves to a stop of 0, which runs to the end
        let selection = run(PopSpec::range(4, -6, None).unwrap());
        assert_eq!(selection.extracted, vec!["d", "e"]);
        assert_eq!(selection.retained, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_range_with_step_retains_skipped_lines() {
        let selection = run(PopSpec::range(1, 5, Some(2)).unwrap());
        assert_eq!(selection.extracted, vec!["a", "c", "e"]);
        assert_eq!(selection.retained, vec!["b", "d"]);

        let selection = run(PopSpec::range(2, -1, Some(3)).unwrap());
        assert_eq!(selection.extracted, vec!["b", "e"]);
        assert_eq!(selection.retained, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_range_out_of_bounds_is_permissive() {
        let selection = run(PopSpec::range(7, 9, None).unwrap());
        assert!(selection.extracted.is_empty());
        assert_eq!(selection.retained, sample_lines());

        let selection = run(PopSpec::range(4, 2, None).unwrap());
        assert!(selection.extracted.is_empty());

        let selection = run(PopSpec::range(4, 100, None).unwrap());
        assert_eq!(selection.extracted, vec!["d", "e"]);
    }

    #[test]
    fn test_specific_uses_file_order() {
        let selection = run(PopSpec::specific([5, 2]).unwrap());
        assert_eq!(selection.extracted, vec!["b", "e"]);
        assert_eq!(selection.retained, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_specific_negative_duplicate_and_out_of_range() {
        let selection = run(PopSpec::specific([-1, 5, 2, 2, 40, -9]).unwrap());
        assert_eq!(selection.extracted, vec!["b", "e"]);
        assert_eq!(selection.retained, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_specific_all_lines() {
        let selection = run(PopSpec::specific(1..=5).unwrap());
        assert_eq!(selection.extracted, sample_lines());
        assert!(selection.retained.is_empty());
    }

    #[test]
    fn test_random_ordered_keeps_file_order() {
        let mut rng = StdRng::seed_from_u64(42);
        let spec = PopSpec::random_with_order(3, true).unwrap();
        let selection = select(&spec, sample_lines(), &mut rng);

        assert_eq!(selection.extracted.len(), 3);
        assert_eq!(selection.retained.len(), 2);
        let mut sorted = selection.extracted.clone();
        sorted.sort();
        assert_eq!(selection.extracted, sorted);
        assert_partition(&selection, &sample_lines());
    }

    #[test]
    fn test_random_is_deterministic_for_a_seed() {
        let spec = PopSpec::random(2).unwrap();
        let first = select(&spec, sample_lines(), &mut StdRng::seed_from_u64(99));
        let second = select(&spec, sample_lines(), &mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_count_exceeding_lines_takes_everything() {
        let lines: Vec<String> = vec!["x".into(), "y".into(), "z".into()];
        let spec = PopSpec::random_with_order(3, true).unwrap();
        let selection = select(&spec, lines.clone(), &mut StdRng::seed_from_u64(1));

        assert_eq!(selection.extracted.len(), 3);
        assert!(selection.retained.is_empty());
        assert_partition(&selection, &lines);
    }

    #[test]
    fn test_empty_input() {
        let spec = PopSpec::random(4).unwrap();
        let selection = select(&spec, Vec::new(), &mut StdRng::seed_from_u64(3));
        assert_eq!(selection, Selection::default());

        let selection = select(
            &PopSpec::tail(1).unwrap(),
            Vec::new(),
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn test_partition_holds_for_every_mode() {
        let specs = [
            PopSpec::head(3).unwrap(),
            PopSpec::head(-1).unwrap(),
            PopSpec::tail(8).unwrap(),
            PopSpec::tail(-2).unwrap(),
            PopSpec::random(2).unwrap(),
            PopSpec::random(9).unwrap(),
            PopSpec::range(-4, -2, Some(2)).unwrap(),
            PopSpec::range(1, -6, None).unwrap(),
            PopSpec::specific([1, -1, 3]).unwrap(),
        ];

        for spec in &specs {
            let selection = run(spec.clone());
            assert_partition(&selection, &sample_lines());
        }
    }
}
