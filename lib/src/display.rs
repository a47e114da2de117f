use textwrap::Options;

use crate::card::CardData;

pub fn pad(text: &str, width: usize) -> String {
    if text.len() >= width {
        text.to_string()
    } else {
        let needed = width - text.len();
        format!("{}{}", text, " ".repeat(needed))
    }
}

/// Lines for one card in the filtered list: a header with the grade pushed
/// to the right edge, the wrapped description, and the crop line.
pub fn card_lines(card: &CardData, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let header = match &card.grade {
        Some(grade) => {
            let tag = format!("[{}]", grade);
            if card.name.len() + tag.len() < width {
                format!("{}{}", pad(&card.name, width - tag.len()), tag)
            } else {
                format!("{} {}", card.name, tag)
            }
        }
        None => card.name.clone(),
    };
    lines.push(header);
    for line in textwrap::wrap(&card.description, Options::new(width.saturating_sub(2))) {
        lines.push(format!("  {}", line));
    }
    if !card.crops.is_empty() {
        lines.push(format!("  Crops: {}", card.crops.join(", ")));
    }
    lines
}

/// Expanded view for a pinned card.
pub fn detail_lines(card: &CardData, width: usize) -> Vec<String> {
    let mut lines = vec![format!("=== {} ===", card.name)];
    if let Some(grade) = &card.grade {
        lines.push(format!("Grade: {}", grade));
    }
    for line in textwrap::wrap(&card.description, Options::new(width)) {
        lines.push(line.to_string());
    }
    if !card.crops.is_empty() {
        lines.push(format!("Recommended crops: {}", card.crops.join(", ")));
    }
    lines
}
