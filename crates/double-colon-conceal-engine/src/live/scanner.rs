use std::collections::HashSet;

use log::{debug, trace};

use crate::{
    field::{SEPARATOR, separator_index},
    parsing::rope::Span,
};

use super::{
    CodeLabel, SyntaxLabels, TextBuffer,
    overlay::{ConcealWidget, OverlaySet, OverlaySetBuilder},
};

/// Computes the concealment regions for the visible part of a document.
///
/// For every visible line, the first `::` is concealed when the text before
/// it is a valid field name, unless
/// - the line touches the main selection (the user is working on it),
/// - the line belongs to a fenced code block, or
/// - the separator touches an inline code span.
///
/// Lines outside the visible ranges are never looked at; scrolling produces
/// a viewport change that triggers a new scan. Pure: the same inputs always
/// give the same set.
pub fn scan_concealments<B, L>(buffer: &B, labels: &L, replacement: &str) -> OverlaySet
where
    B: TextBuffer + ?Sized,
    L: SyntaxLabels + ?Sized,
{
    let mut builder = OverlaySetBuilder::new();
    let mut excluded_lines: HashSet<usize> = HashSet::new();
    let mut excluded_ranges: Vec<Span> = Vec::new();
    let selection = buffer.selection();
    // Lines shared by two visible ranges are only scanned once
    let mut next_line = 1;

    for &range in buffer.visible_ranges() {
        let start_line = buffer.line_at(range.start).number;
        let end_line = buffer.line_at(range.end).number;

        labels.iterate(range, &mut |label| match label {
            CodeLabel::InlineCode(span) => excluded_ranges.push(span),
            CodeLabel::FencedCodeLine(line) => {
                excluded_lines.insert(line.start);
            }
        });

        for number in start_line.max(next_line)..=end_line {
            let line = buffer.line(number);

            if line.span().touches(selection) {
                continue;
            }
            if excluded_lines.contains(&line.from) {
                continue;
            }
            let Some(idx) = separator_index(&line.text) else {
                continue;
            };

            let sign_from = line.from + idx;
            let sign = Span::new(sign_from, sign_from + SEPARATOR.len());
            if excluded_ranges.iter().any(|code| code.touches(sign)) {
                continue;
            }

            trace!("concealing separator at {sign:?} on line {number}");
            builder.add(sign, ConcealWidget::new(replacement));
        }

        next_line = next_line.max(end_line + 1);
    }

    let set = builder.finish();
    debug!(
        "scanned {} visible range(s), {} concealment(s)",
        buffer.visible_ranges().len(),
        set.len()
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        live::{EditorState, TextBuffer},
        parsing::rope::Line,
    };
    use pretty_assertions::assert_eq;

    fn scan(state: &EditorState) -> Vec<Span> {
        scan_concealments(state, state, ":").spans()
    }

    /// Caret parked on a line of its own at the end of the document.
    fn state_with_caret_at_end(text: &str) -> EditorState {
        let mut state = EditorState::new(text);
        state.set_cursor(state.len());
        state
    }

    /// Labels every span it was given, regardless of the parse.
    struct FixedLabels(Vec<CodeLabel>);

    impl SyntaxLabels for FixedLabels {
        fn iterate(&self, range: Span, visit: &mut dyn FnMut(CodeLabel)) {
            self.0
                .iter()
                .filter(|l| l.span().touches(range))
                .for_each(|l| visit(*l));
        }
    }

    #[test]
    fn conceals_field_separator() {
        let state = state_with_caret_at_end("Priority:: High\n");
        assert_eq!(scan(&state), vec![Span::new(8, 10)]);
    }

    #[test]
    fn selection_on_line_shows_raw_separator() {
        let mut state = EditorState::new("Priority:: High\n");
        state.set_selection(8, 10);
        assert!(scan(&state).is_empty());
    }

    #[test]
    fn caret_at_line_end_counts_as_on_line() {
        let mut state = EditorState::new("Priority:: High\nNext:: one\n");
        state.set_cursor(15);
        assert_eq!(scan(&state), vec![Span::new(20, 22)]);
    }

    #[test]
    fn inline_code_label_suppresses_separator() {
        let state = state_with_caret_at_end("Priority:: High\n");
        let labels = FixedLabels(vec![CodeLabel::InlineCode(Span::new(8, 10))]);
        assert!(scan_concealments(&state, &labels, ":").is_empty());
    }

    #[test]
    fn parsed_inline_code_suppresses_separator() {
        let state = state_with_caret_at_end("`a`:: b\n`x::y` z\nok:: fine\n");
        // `a` ends where the separator starts, which counts as touching
        assert_eq!(scan(&state), vec![Span::new(19, 21)]);
    }

    #[test]
    fn backticks_do_not_pair_across_list_items() {
        let state = state_with_caret_at_end("- use ` for code\n- Status:: `done`\n");
        assert_eq!(scan(&state), vec![Span::new(25, 27)]);
    }

    #[test]
    fn backticks_do_not_pair_across_heading_and_text() {
        let state = state_with_caret_at_end("# a ` b\nKey:: `c`\n");
        assert_eq!(scan(&state), vec![Span::new(11, 13)]);
    }

    #[test]
    fn fenced_code_lines_are_skipped() {
        let state = state_with_caret_at_end("```\nA:: b\n```\nC:: d\n");
        assert_eq!(scan(&state), vec![Span::new(15, 17)]);
    }

    #[test]
    fn only_first_separator_per_line() {
        let state = state_with_caret_at_end("a:: b:: c\n");
        assert_eq!(scan(&state), vec![Span::new(1, 3)]);
    }

    #[test]
    fn invalid_field_names_are_skipped() {
        let state = state_with_caret_at_end(":: x\n[draft:: y\n[draft]:: z\n");
        assert_eq!(scan(&state), vec![Span::new(23, 25)]);
    }

    #[test]
    fn only_visible_lines_are_scanned() {
        let mut state = state_with_caret_at_end("a:: 1\nb:: 2\nc:: 3\nd:: 4\n");
        state.set_viewport(2, 2);
        assert_eq!(scan(&state), vec![Span::new(7, 9), Span::new(13, 15)]);
    }

    #[test]
    fn multiple_visible_ranges_sharing_a_line() {
        let mut state = state_with_caret_at_end("a:: 1\nb:: 2\nc:: 3\n");
        state.set_visible_ranges(vec![Span::new(0, 8), Span::new(9, 17)]);
        assert_eq!(
            scan(&state),
            vec![Span::new(1, 3), Span::new(7, 9), Span::new(13, 15)]
        );
    }

    #[test]
    fn replacement_glyph_is_carried() {
        let state = state_with_caret_at_end("Key:: v\n");
        let set = scan_concealments(&state, &state, "→");
        let line: Line = state.line(1);
        assert_eq!(set.display_line(&line), "Key→ v");
    }

    #[test]
    fn scanning_is_idempotent() {
        let state = state_with_caret_at_end("a:: 1\n`b`\nc:: 3\n");
        assert_eq!(
            scan_concealments(&state, &state, ":"),
            scan_concealments(&state, &state, ":")
        );
    }
}
