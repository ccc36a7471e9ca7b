//! End-to-end behavior of the text-to-articles pipeline.

use newsdesk_parsing::{
    ArticleExtractor, ParsingConfigBuilder, clean_title, create_summary, determine_category,
    extract_articles_from_text, extract_tags,
};

fn pad_to(base: &str, len: usize) -> String {
    base.chars().chain(std::iter::repeat('.')).take(len).collect()
}

#[test]
fn two_paragraphs_one_too_short() {
    let first = pad_to(
        "Merit scholarship news for every student in the state board system. \
         Forms are due by the end of June at district offices near you",
        200,
    );
    assert_eq!(first.chars().count(), 200);
    let second = "Page 2 end";
    assert_eq!(second.chars().count(), 10);

    let result = extract_articles_from_text(&format!("{first}\n\n{second}"));

    assert_eq!(result.candidates.len(), 1);
    assert_eq!(result.skip_stats.too_short, 1);
    let candidate = &result.candidates[0];
    // "student" is an Education keyword and Education precedes Scholarship.
    assert_eq!(candidate.category, "Education");
    let scholarship = candidate.tags.iter().position(|t| t == "scholarship").unwrap();
    let student = candidate.tags.iter().position(|t| t == "student").unwrap();
    assert!(scholarship < student);
}

#[test]
fn scholarship_paragraph_without_education_keywords() {
    let text = pad_to(
        "Merit scholarship news for every pupil in the state board system. \
         Forms are due by the end of June at district offices near you",
        200,
    );
    let result = extract_articles_from_text(&text);
    assert_eq!(result.candidates.len(), 1);
    assert_eq!(result.candidates[0].category, "Scholarship");
    assert_eq!(result.candidates[0].tags, vec!["new", "scholarship"]);
}

#[test]
fn never_more_than_fifty_candidates() {
    let block = "Weekly bulletin item\nThe dean's office posted the weekly bulletin for all departments.";
    for count in [0usize, 1, 49, 50, 51, 120] {
        let text = vec![block; count].join("\n\n");
        let result = extract_articles_from_text(&text);
        assert_eq!(result.candidates.len(), count.min(50), "count = {count}");
    }
}

#[test]
fn short_segments_never_become_candidates() {
    let text = [
        "Header",
        "x".repeat(50).as_str(),
        "   padded but short   ",
        "A real article body that is comfortably longer than fifty characters in total.",
    ]
    .join("\n\n");
    let result = extract_articles_from_text(&text);
    assert_eq!(result.candidates.len(), 1);
    assert!(result.candidates[0].full_content.starts_with("A real article"));
}

#[test]
fn no_blank_lines_means_one_segment() {
    let text = "Line one of the notice\nLine two of the notice\nLine three of the notice";
    let result = extract_articles_from_text(text);
    assert_eq!(result.candidates.len(), 1);
    assert_eq!(result.candidates[0].title, "Line one of the notice");
    assert_eq!(result.candidates[0].full_content, text);
}

#[test]
fn classifier_tie_break_is_table_order() {
    assert_eq!(determine_category("a study of sleep habits"), "Education");
    assert_eq!(determine_category("research findings on sleep"), "Research");
}

#[test]
fn tag_order_follows_vocabulary() {
    let tags = extract_tags("student reporters cover breaking new stories");
    assert_eq!(tags, vec!["breaking", "new", "student"]);
}

#[test]
fn title_cleaning_example() {
    assert_eq!(
        clean_title("3. • Scholarship Update   for Students"),
        "Scholarship Update for Students"
    );
}

#[test]
fn summary_of_single_sentence() {
    let sentence = "Hall tickets are out this week";
    assert_eq!(sentence.chars().count(), 30);
    assert_eq!(create_summary(&format!("{sentence}.")), format!("{sentence}."));
}

#[test]
fn custom_minimum_segment_length() -> anyhow::Result<()> {
    let ext = ArticleExtractor::with_config(ParsingConfigBuilder::new().min_segment_chars(5).build()?);
    let result = ext.extract_from_text("Short notice\n\nTiny");
    assert_eq!(result.candidates.len(), 1);
    assert_eq!(result.candidates[0].title, "Short notice");
    Ok(())
}
