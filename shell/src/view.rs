use pandaqa_ui::page::NotificationKind;
use pandaqa_ui::{Element, MemoryPage};

fn marker(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "…",
        NotificationKind::Success => "✓",
        NotificationKind::Warning => "!",
        NotificationKind::Error => "✗",
    }
}

/// Notifications still on screen, oldest first.
pub fn notifications(page: &MemoryPage) -> Vec<String> {
    page.notifications()
        .iter()
        .filter(|n| !n.fading)
        .map(|n| format!("[{}] {}", marker(n.node.kind), n.node.message))
        .collect()
}

pub fn render(page: &MemoryPage) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Status: {} | Documents: {} | Tab: {}\n",
        page.text(Element::SystemStatus).unwrap_or("-"),
        page.text(Element::DocCount).unwrap_or("-"),
        page.active_tabs().first().copied().unwrap_or("-"),
    ));
    out.push_str(&format!(
        "File: {}\n",
        page.text(Element::FileName).unwrap_or("-")
    ));

    if !page.is_hidden(Element::AnswerContainer) {
        out.push_str(&format!(
            "\nAnswer:\n{}\n",
            page.text(Element::Answer).unwrap_or("")
        ));
    }

    if !page.is_hidden(Element::ContextContainer) {
        out.push_str("\nContext:\n");
        for (i, block) in page.context_blocks().iter().enumerate() {
            out.push_str(&format!("{}. {}\n   {}\n", i + 1, block.score_line, block.text));
            if let Some(source) = &block.source_line {
                out.push_str(&format!("   {}\n", source));
            }
        }
    }

    for line in notifications(page) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_page_shows_labels_but_no_results() {
        let page = MemoryPage::new();
        let text = render(&page);
        assert!(text.starts_with("Status: Checking... | Documents: 0 | Tab: add-text"));
        assert!(text.contains("File: No file selected"));
        assert!(!text.contains("Answer:"));
        assert!(!text.contains("Context:"));
    }
}
