//! Deterministic colors for categories without an explicit color.

/// The color used for expenses without a known category.
pub const NEUTRAL_GRAY: &str = "#94a3b8";

const PALETTE: [&str; 8] = [
    "#34d399", "#60a5fa", "#f472b6", "#facc15", "#c084fc", "#fb7185", "#f97316", "#2dd4bf",
];

/// Pick a palette color for `label`.
///
/// The color only depends on the lower-cased label, so "Food" and "FOOD"
/// always get the same color. An empty label gets [NEUTRAL_GRAY].
pub fn color_from_label(label: &str) -> &'static str {
    if label.is_empty() {
        return NEUTRAL_GRAY;
    }

    let code_point_sum: u64 = label.to_lowercase().chars().map(|c| c as u64).sum();

    PALETTE[(code_point_sum % PALETTE.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::{NEUTRAL_GRAY, PALETTE, color_from_label};

    #[test]
    fn color_ignores_case() {
        assert_eq!(color_from_label("Food"), color_from_label("FOOD"));
        assert_eq!(color_from_label("Food"), color_from_label("food"));
    }

    #[test]
    fn color_is_indexed_by_code_point_sum() {
        // 'a' is 97, 97 % 8 == 1
        assert_eq!(color_from_label("a"), PALETTE[1]);
        // 'h' + 'i' is 104 + 105 = 209, 209 % 8 == 1
        assert_eq!(color_from_label("Hi"), PALETTE[1]);
        // 'f' + 'o' + 'o' + 'd' is 102 + 111 + 111 + 100 = 424, 424 % 8 == 0
        assert_eq!(color_from_label("Food"), PALETTE[0]);
    }

    #[test]
    fn color_handles_non_ascii_labels() {
        let color = color_from_label("Cafenea ☕");

        assert!(PALETTE.contains(&color));
        assert_eq!(color, color_from_label("CAFENEA ☕"));
    }

    #[test]
    fn empty_label_is_gray() {
        assert_eq!(color_from_label(""), NEUTRAL_GRAY);
    }
}
