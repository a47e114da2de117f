use crossterm::event::{KeyCode, KeyEvent};

pub trait Searchable {
    fn search_text(&self) -> &str;
}

/// Case-insensitive, unanchored substring containment. The empty term
/// matches everything.
pub fn matches(text: &str, term: &str) -> bool {
    text.to_lowercase().contains(&term.to_lowercase())
}

/// One flag per item, in item order. Every item is re-evaluated on every
/// call, whether or not its flag changes.
pub fn compute_visibility<T: Searchable>(items: &[T], term: &str) -> Vec<bool> {
    items
        .iter()
        .map(|item| matches(item.search_text(), term))
        .collect()
}

pub fn visible<'a, T: Searchable>(items: &'a [T], flags: &[bool]) -> Vec<&'a T> {
    items
        .iter()
        .zip(flags.iter())
        .filter_map(|(item, shown)| if *shown { Some(item) } else { None })
        .collect()
}

pub enum SearchUpdate<'a, T: Searchable> {
    Continue {
        text: String,
        visible: Vec<bool>,
    },
    Selected(&'a T),
    Cancelled,
}

/// Applies one key event to the search text and rescans the whole item set.
pub fn apply_search_key<'a, T: Searchable>(
    items: &'a [T],
    current_text: &str,
    key: KeyEvent,
) -> SearchUpdate<'a, T> {
    let mut new_text = current_text.to_string();
    match key.code {
        KeyCode::Char(c) => {
            new_text.push(c);
        }
        KeyCode::Backspace => {
            new_text.pop();
        }
        KeyCode::Esc => {
            return SearchUpdate::Cancelled;
        }
        KeyCode::Enter => {
            let flags = compute_visibility(items, &new_text);
            if let Some(item) = visible(items, &flags).into_iter().next() {
                return SearchUpdate::Selected(item);
            }
        }
        _ => {}
    };
    let flags = compute_visibility(items, &new_text);
    SearchUpdate::Continue {
        text: new_text,
        visible: flags,
    }
}
