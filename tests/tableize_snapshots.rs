use std::num::NonZeroU32;

use postpress::application::render::{TableizeOptions, highlight, tableize, tableize_with};

#[test]
fn two_line_block() {
    let html = tableize("a\nb\n", "go");
    insta::assert_snapshot!("two_line_go_block", html);
}

#[test]
fn block_with_gutter() {
    let options = TableizeOptions {
        line_numbers: true,
        start_line: NonZeroU32::new(3).expect("non-zero"),
    };
    let html = tableize_with("let x = 1;\nlet y = 2;\n", "rust", &options);
    insta::assert_snapshot!("gutter_rust_block", html);
}

#[test]
fn highlighted_plain_text_block() {
    let html = highlight("a\nb\n", "txt").expect("plain text is known");
    insta::assert_snapshot!("highlighted_plain_text_block", html);
}
