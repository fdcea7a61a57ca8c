use super::{trim_body, HeadingLine, SectionTree};
use crate::input::parse_document;

const TICKET: &str = "## 1. Description\n\n### Problem Statement\nfoo\n\n### Current State\nbar\n\n## 2. Solution\nbaz\n";

fn heading(level: usize, title: &str, line_index: usize) -> HeadingLine {
    HeadingLine {
        level,
        title: title.to_string(),
        line_index,
        raw_header_text: format!("{} {title}", "#".repeat(level)),
    }
}

#[test]
fn test_build_nests_by_level() {
    let tree = parse_document(TICKET).unwrap();

    assert_eq!(tree.len(), 4);
    assert_eq!(tree.roots(), &[0, 3]);
    assert_eq!(tree.sections()[0].children_indices, vec![1, 2]);
    assert_eq!(tree.sections()[1].parent_index, Some(0));
    assert_eq!(tree.sections()[2].parent_index, Some(0));
    assert_eq!(tree.sections()[3].parent_index, None);
}

#[test]
fn test_line_ranges_are_nested_and_contiguous() {
    let tree = parse_document(TICKET).unwrap();
    let ranges: Vec<(usize, usize)> = tree
        .sections()
        .iter()
        .map(|s| (s.line_start, s.line_end))
        .collect();

    assert_eq!(ranges, vec![(0, 8), (2, 5), (5, 8), (8, 10)]);
    assert_eq!(tree.line_count(), 10);
}

#[test]
fn test_content_trims_surrounding_blank_lines() {
    let tree = parse_document(TICKET).unwrap();

    assert_eq!(tree.content(1), "foo");
    assert_eq!(tree.content(2), "bar");
    assert_eq!(tree.content(3), "baz");
    assert_eq!(tree.content_length(1), 3);
}

#[test]
fn test_parent_content_includes_children() {
    let tree = parse_document(TICKET).unwrap();

    assert_eq!(
        tree.content(0),
        "### Problem Statement\nfoo\n\n### Current State\nbar"
    );
    assert_eq!(tree.content_length(0), 48);
}

#[test]
fn test_hierarchical_paths() {
    let tree = parse_document(TICKET).unwrap();

    assert_eq!(tree.hierarchical_path(0), "## 1. Description");
    assert_eq!(
        tree.hierarchical_path(1),
        "## 1. Description / ### Problem Statement"
    );
    assert_eq!(tree.title_path(2), "1. Description / Current State");
    assert_eq!(tree.hierarchical_path(3), "## 2. Solution");
}

#[test]
fn test_repeated_titles_get_distinct_paths() {
    let doc = "## Frontend\n### Notes\na\n## Backend\n### Notes\nb\n";
    let tree = parse_document(doc).unwrap();

    assert_eq!(tree.hierarchical_path(1), "## Frontend / ### Notes");
    assert_eq!(tree.hierarchical_path(3), "## Backend / ### Notes");
}

#[test]
fn test_skipped_levels_attach_to_nearest_shallower_heading() {
    let tree = SectionTree::build(
        "# A\n### B\n## C\n",
        vec![heading(1, "A", 0), heading(3, "B", 1), heading(2, "C", 2)],
        Vec::new(),
    );

    assert_eq!(tree.sections()[0].children_indices, vec![1, 2]);
    assert_eq!(tree.sections()[1].line_end, 2);
    assert_eq!(tree.sections()[2].line_end, 3);
}

#[test]
fn test_preamble_is_text_before_first_heading() {
    let tree = parse_document("Intro text\n\n# A\nbody\n").unwrap();
    assert_eq!(tree.preamble(), "Intro text\n\n");

    let no_headings = parse_document("just prose\n").unwrap();
    assert!(no_headings.is_empty());
    assert_eq!(no_headings.preamble(), "just prose\n");
}

#[test]
fn test_depth_and_descendants() {
    let doc = "# A\n## B\n### C\n## D\n# E\n";
    let tree = parse_document(doc).unwrap();

    assert_eq!(tree.depth(0), 0);
    assert_eq!(tree.depth(2), 2);
    assert_eq!(tree.descendants(0), vec![1, 2, 3]);
    assert!(tree.descendants(4).is_empty());
    assert!(tree.sections()[0].has_children());
}

#[test]
fn test_byte_offsets_cover_heading_and_body() {
    let doc = "# A\nbody\n# B";
    let tree = parse_document(doc).unwrap();

    let a = &tree.sections()[0];
    assert_eq!((a.byte_start, a.body_start, a.byte_end), (0, 4, 9));
    let b = &tree.sections()[1];
    assert_eq!((b.byte_start, b.body_start, b.byte_end), (9, 12, 12));
    assert_eq!(tree.body(1), "");
}

#[test]
fn test_trim_body_keeps_indentation_of_first_line() {
    assert_eq!(trim_body("\n\n    code\nmore\n\n"), "    code\nmore");
    assert_eq!(trim_body("\n  \n"), "");
    assert_eq!(trim_body(""), "");
}

#[test]
fn test_trim_body_keeps_trailing_spaces_of_last_line() {
    assert_eq!(trim_body("\ntail  \n  \n\n"), "tail  ");
    assert_eq!(trim_body("a\r\nb \r\n\r\n"), "a\r\nb ");
}
