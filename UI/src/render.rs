use crate::models::ContextItem;
use crate::page::ContextBlock;

/// `Similarity: 87.50%` for a score of `0.875`.
pub fn score_line(score: f64) -> String {
    format!("Similarity: {:.2}%", score * 100.0)
}

/// Builds one block per context item, keeping the backend's ranking order.
pub fn render_context(items: &[ContextItem]) -> Vec<ContextBlock> {
    items
        .iter()
        .map(|item| ContextBlock {
            score_line: score_line(item.score),
            text: item.text.clone(),
            source_line: item.source().map(|source| format!("Source: {source}")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> ContextItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn score_is_percentage_with_two_decimals() {
        assert_eq!(score_line(0.875), "Similarity: 87.50%");
        assert_eq!(score_line(1.0), "Similarity: 100.00%");
        assert_eq!(score_line(0.0), "Similarity: 0.00%");
    }

    #[test]
    fn order_and_text_are_preserved() {
        let items = vec![
            item(json!({ "score": 0.9, "text": "first" })),
            item(json!({ "score": 0.95, "text": "second" })),
        ];
        let blocks = render_context(&items);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "first");
        assert_eq!(blocks[0].score_line, "Similarity: 90.00%");
        assert_eq!(blocks[1].text, "second");
        assert_eq!(blocks[1].score_line, "Similarity: 95.00%");
    }

    #[test]
    fn source_line_only_when_source_present() {
        let items = vec![
            item(json!({ "score": 0.5, "text": "a", "metadata": { "source": "doc1" } })),
            item(json!({ "score": 0.5, "text": "b", "metadata": { "type": "txt" } })),
            item(json!({ "score": 0.5, "text": "c" })),
        ];
        let blocks = render_context(&items);
        assert_eq!(blocks[0].source_line.as_deref(), Some("Source: doc1"));
        assert_eq!(blocks[1].source_line, None);
        assert_eq!(blocks[2].source_line, None);
    }
}
