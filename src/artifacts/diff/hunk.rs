use crate::artifacts::diff::diff_algorithm::Edit;

/// Default number of unchanged lines shown around each change
pub const DEFAULT_CONTEXT: usize = 3;

/// A run of edits printed under one `@@` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<T> {
    /// Zero-based line offset of the hunk in the old side
    a_start: usize,
    /// Zero-based line offset of the hunk in the new side
    b_start: usize,
    edits: Vec<Edit<T>>,
}

impl<T: Clone> Hunk<T> {
    /// Split an edit script into hunks
    ///
    /// Each hunk keeps up to `context` unchanged lines before its first and after
    /// its last change. Two changes separated by at most `2 * context` unchanged
    /// lines end up in the same hunk.
    pub fn build(edits: &[Edit<T>], context: usize) -> Vec<Hunk<T>> {
        let mut hunks = Vec::new();
        let mut offset = 0;

        loop {
            while offset < edits.len() && edits[offset].is_equal() {
                offset += 1;
            }
            if offset >= edits.len() {
                break;
            }

            let start = offset.saturating_sub(context);
            let mut last_change = offset;
            let mut cursor = offset;

            while cursor < edits.len() {
                if !edits[cursor].is_equal() {
                    last_change = cursor;
                } else if cursor - last_change > 2 * context {
                    break;
                }
                cursor += 1;
            }

            let end = edits.len().min(last_change + context + 1);
            hunks.push(Self::from_range(edits, start, end));
            offset = end;
        }

        hunks
    }

    fn from_range(edits: &[Edit<T>], start: usize, end: usize) -> Self {
        let preceding = &edits[..start];

        Hunk {
            a_start: preceding.iter().filter(|edit| edit.in_a()).count(),
            b_start: preceding.iter().filter(|edit| edit.in_b()).count(),
            edits: edits[start..end].to_vec(),
        }
    }
}

impl<T> Hunk<T> {
    pub fn a_start(&self) -> usize {
        self.a_start
    }

    pub fn b_start(&self) -> usize {
        self.b_start
    }

    pub fn a_size(&self) -> usize {
        self.edits.iter().filter(|edit| edit.in_a()).count()
    }

    pub fn b_size(&self) -> usize {
        self.edits.iter().filter(|edit| edit.in_b()).count()
    }

    pub fn edits(&self) -> &[Edit<T>] {
        &self.edits
    }

    /// `@@ -<a range> +<b range> @@`
    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@",
            format_range(self.a_start, self.a_size()),
            format_range(self.b_start, self.b_size())
        )
    }
}

/// One-based `start,len` range as unified diffs print it
///
/// A single line prints only its start; an empty range points at the line
/// before the gap.
fn format_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::diff::diff_algorithm::{DiffAlgorithm, MyersDiff};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn numbered(range: std::ops::Range<usize>) -> Vec<String> {
        range.map(|n| format!("line{n}")).collect()
    }

    fn render(hunk: &Hunk<String>) -> Vec<String> {
        std::iter::once(hunk.header())
            .chain(hunk.edits().iter().map(ToString::to_string))
            .collect()
    }

    #[rstest]
    #[case(0, 0, "0,0")]
    #[case(4, 0, "4,0")]
    #[case(0, 1, "1")]
    #[case(6, 1, "7")]
    #[case(0, 2, "1,2")]
    #[case(9, 5, "10,5")]
    fn ranges_follow_unified_conventions(
        #[case] start: usize,
        #[case] len: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(format_range(start, len), expected);
    }

    #[test]
    fn single_replacement_has_full_context() {
        let a = vec!["x".to_string(), "y".to_string()];
        let b = vec!["x".to_string(), "z".to_string()];

        let hunks = MyersDiff::new(&a, &b).hunks(DEFAULT_CONTEXT);

        assert_eq!(hunks.len(), 1);
        assert_eq!(render(&hunks[0]), vec!["@@ -1,2 +1,2 @@", " x", "-y", "+z"]);
    }

    #[test]
    fn identical_inputs_have_no_hunks() {
        let a = numbered(0..5);

        assert!(MyersDiff::new(&a, &a).hunks(DEFAULT_CONTEXT).is_empty());
    }

    #[test]
    fn context_is_trimmed_to_three_lines() {
        let a = numbered(0..20);
        let mut b = a.clone();
        b[10] = "changed".to_string();

        let hunks = MyersDiff::new(&a, &b).hunks(DEFAULT_CONTEXT);

        assert_eq!(hunks.len(), 1);
        assert_eq!(
            render(&hunks[0]),
            vec![
                "@@ -8,7 +8,7 @@",
                " line7",
                " line8",
                " line9",
                "-line10",
                "+changed",
                " line11",
                " line12",
                " line13",
            ]
        );
    }

    #[rstest]
    #[case::gap_of_six_merges(6, 1)]
    #[case::gap_of_seven_splits(7, 2)]
    fn nearby_changes_share_a_hunk(#[case] gap: usize, #[case] expected_hunks: usize) {
        let a = numbered(0..gap + 10);
        let mut b = a.clone();
        b[2] = "first".to_string();
        b[3 + gap] = "second".to_string();

        let hunks = MyersDiff::new(&a, &b).hunks(DEFAULT_CONTEXT);

        assert_eq!(hunks.len(), expected_hunks);
    }

    #[test]
    fn split_hunks_report_their_own_offsets() {
        let a = numbered(0..30);
        let mut b = a.clone();
        b.remove(25);
        b.insert(2, "new".to_string());

        let hunks = MyersDiff::new(&a, &b).hunks(DEFAULT_CONTEXT);

        assert_eq!(hunks[0].header(), "@@ -1,5 +1,6 @@");
        assert_eq!(hunks[1].header(), "@@ -23,7 +24,6 @@");
    }

    #[test]
    fn pure_insertion_into_empty_side() {
        let a: Vec<String> = Vec::new();
        let b = numbered(0..2);

        let hunks = MyersDiff::new(&a, &b).hunks(DEFAULT_CONTEXT);

        assert_eq!(render(&hunks[0]), vec!["@@ -0,0 +1,2 @@", "+line0", "+line1"]);
    }

    #[test]
    fn zero_context_keeps_only_changes() {
        let a = numbered(0..5);
        let mut b = a.clone();
        b[2] = "two".to_string();

        let hunks = MyersDiff::new(&a, &b).hunks(0);

        assert_eq!(render(&hunks[0]), vec!["@@ -3 +3 @@", "-line2", "+two"]);
    }
}
