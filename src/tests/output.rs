use super::{
    get_payload, list_payload, render_error, render_tree, render_update, render_view,
    UpdateSummary,
};
use crate::edit_plan::UpdateMode;
use crate::error::SectionError;
use crate::input::parse_document;

const TICKET: &str = "## 1. Description\n\n### Problem Statement\nfoo\n\n### Current State\nbar\n\n## 2. Solution\nbaz\n";

#[test]
fn test_list_payload() {
    let tree = parse_document(TICKET).unwrap();
    let rows = list_payload(&tree);

    assert_eq!(rows.len(), 4);
    let levels: Vec<usize> = rows.iter().map(|r| r.level).collect();
    assert_eq!(levels, vec![2, 3, 3, 2]);
    assert_eq!(rows[1].hierarchical_path, "## 1. Description / ### Problem Statement");
    assert_eq!(rows[1].title, "Problem Statement");
    assert_eq!(rows[1].content_length, 3);
    assert_eq!(rows[3].header_text, "## 2. Solution");
}

#[test]
fn test_listing_serialises_camel_case() {
    let tree = parse_document(TICKET).unwrap();
    let value = serde_json::to_value(&list_payload(&tree)[0]).unwrap();

    assert_eq!(value["headerText"], "## 1. Description");
    assert_eq!(value["hierarchicalPath"], "## 1. Description");
    assert_eq!(value["contentLength"], 48);
    assert_eq!(value["level"], 2);
}

#[test]
fn test_render_tree() {
    let tree = parse_document(TICKET).unwrap();

    assert_eq!(
        render_tree(&tree),
        "├── ## 1. Description (48 chars)\n\
         │   ├── ### Problem Statement (3 chars)\n\
         │   └── ### Current State (3 chars)\n\
         └── ## 2. Solution (3 chars)\n"
    );
}

#[test]
fn test_render_tree_keeps_vertical_rule_for_open_ancestors() {
    let tree = parse_document("# A\n## B\n### C\n## D\n").unwrap();

    assert_eq!(
        render_tree(&tree),
        "└── # A (15 chars)\n\
         \x20   ├── ## B (5 chars)\n\
         \x20   │   └── ### C (0 chars)\n\
         \x20   └── ## D (0 chars)\n"
    );
}

#[test]
fn test_render_tree_without_sections() {
    let tree = parse_document("plain text\n").unwrap();
    assert_eq!(render_tree(&tree), "No sections found\n");
}

#[test]
fn test_get_payload_and_view() {
    let tree = parse_document(TICKET).unwrap();
    let view = get_payload(&tree, 2);

    assert_eq!(view.content, "bar");
    assert_eq!(view.content_length, 3);

    let text = render_view(&view);
    assert!(text.starts_with("Section: ## 1. Description / ### Current State\n"));
    assert!(text.contains("Content Length: 3 characters"));
    assert!(text.contains("---\n\nbar\n\n---"));
}

#[test]
fn test_render_update() {
    let summary = UpdateSummary {
        hierarchical_path: "## 2. Solution".to_string(),
        operation: UpdateMode::Replace,
        new_content_length: 3,
    };

    assert_eq!(
        render_update(&summary),
        "Updated section '## 2. Solution' (replace), new content length: 3 characters\n"
    );
    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["operation"], "replace");
    assert_eq!(value["newContentLength"], 3);
}

#[test]
fn test_render_not_found_error() {
    let error = SectionError::NotFound {
        identifier: "Deploy".to_string(),
        suggestions: vec!["## Deployment".to_string()],
    };
    let text = render_error(&error.payload());

    assert!(text.starts_with("NotFound: Section 'Deploy' not found\n"));
    assert!(text.contains("Did you mean:\n  - ## Deployment\n"));
}

#[test]
fn test_render_ambiguous_error() {
    let error = SectionError::Ambiguous {
        identifier: "Notes".to_string(),
        candidates: vec![
            "## Frontend / ### Notes".to_string(),
            "## Backend / ### Notes".to_string(),
        ],
    };
    let text = render_error(&error.payload());

    assert!(text.contains("ambiguous (2 matches)"));
    assert!(text.contains("  - ## Frontend / ### Notes\n  - ## Backend / ### Notes\n"));
}
