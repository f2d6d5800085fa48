use tracing::debug;

use crate::menu::classifier::estimate_nutrition;
use crate::models::FoodItem;

/// Lines shorter than this (in characters, after prefix stripping) are noise.
pub const MIN_ITEM_NAME_CHARS: usize = 3;

/// Bullet, numbering and arrow glyphs stripped from the start of a line.
const PREFIX_GLYPHS: &[char] = &['.', '-', '*', '•', '→', '➤', '►', '◆'];

fn is_prefix_char(c: char) -> bool {
    c.is_ascii_digit() || PREFIX_GLYPHS.contains(&c)
}

/// Strip a leading bullet/numbering prefix and surrounding whitespace.
pub fn clean_line(line: &str) -> &str {
    line.trim_start().trim_start_matches(is_prefix_char).trim()
}

/// Split pasted menu text into classified items.
///
/// Blank lines are dropped before numbering, so the id of an item is its
/// ordinal among the non-blank lines (`parsed-{n}`). Output preserves input
/// order and may be empty.
pub fn normalize_menu(text: &str) -> Vec<FoodItem> {
    let items: Vec<FoodItem> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .filter_map(|(index, line)| {
            let name = clean_line(line);
            if name.chars().count() < MIN_ITEM_NAME_CHARS {
                debug!(line, "skipping short menu line");
                return None;
            }

            let est = estimate_nutrition(name);
            Some(FoodItem {
                id: format!("parsed-{}", index),
                name: name.to_string(),
                calories: est.calories,
                protein: est.protein,
                carbs: est.carbs,
                fats: est.fats,
                category: est.category,
                serving_size: None,
            })
        })
        .collect();

    debug!(count = items.len(), "normalized menu text");
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_clean_line_prefixes() {
        assert_eq!(clean_line("1. Chicken Biryani"), "Chicken Biryani");
        assert_eq!(clean_line("- Dal Tadka "), "Dal Tadka");
        assert_eq!(clean_line("• Masala Dosa"), "Masala Dosa");
        assert_eq!(clean_line("➤ Lassi"), "Lassi");
        assert_eq!(clean_line("  12) Naan"), ") Naan");
        assert_eq!(clean_line("Plain text"), "Plain text");
    }

    #[test]
    fn test_numbered_menu() {
        let items = normalize_menu("1. Chicken Biryani\n2. Dal Tadka");
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].id, "parsed-0");
        assert_eq!(items[0].name, "Chicken Biryani");
        assert_eq!(items[0].calories, 450.0);
        assert_eq!(items[0].category, Category::MainCourse);

        assert_eq!(items[1].id, "parsed-1");
        assert_eq!(items[1].name, "Dal Tadka");
        assert_eq!(items[1].protein, 12.0);
    }

    #[test]
    fn test_blank_and_short_lines_dropped() {
        let text = "\n   \n1. Idli\n-> \n2. ab\nSambar Vada\r\n";
        let items = normalize_menu(text);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Idli", "Sambar Vada"]);
        // Ids count non-blank lines, including the ones skipped for length
        assert_eq!(items[0].id, "parsed-0");
        assert_eq!(items[1].id, "parsed-3");
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_menu("").is_empty());
        assert!(normalize_menu("\n\n  \t\n").is_empty());
    }

    #[test]
    fn test_output_never_exceeds_non_blank_lines() {
        let text = "Roti\n\nRaita\n1.\n•\nGulab Jamun";
        let non_blank = text.lines().filter(|l| !l.trim().is_empty()).count();
        let items = normalize_menu(text);
        assert!(items.len() <= non_blank);
        assert!(items.iter().all(|i| i.name.chars().count() >= MIN_ITEM_NAME_CHARS));
    }
}
