//! Column widths derived from cell text.

use crate::config::SheetConfig;
use crate::provider::DataProvider;

/// Compute a width for every column from the text it shows.
///
/// Only the frozen rows and the rows that fit in the viewport's first screen
/// are sampled, and only the columns of that first screen are measured; the
/// rest get the default width. The cost follows the viewport size rather
/// than the table size. A measured column gets
/// `chars * char_width + 2 * cell_padding`, never less than the default width.
pub fn autosize_columns(provider: &dyn DataProvider, config: &SheetConfig) -> Vec<u32> {
    let rows_on_screen = config.height / config.row_height.max(1) + 1;
    let sample_rows = config
        .number_frozen_rows
        .saturating_add(rows_on_screen)
        .min(provider.row_count());

    let mut right = 0u32;
    (0..provider.column_count())
        .map(|column| {
            if right >= config.width {
                return config.default_column_width;
            }
            let chars = (0..sample_rows)
                .filter_map(|row| provider.cell_contents(column, row))
                .map(|text| text.chars().count())
                .max()
                .unwrap_or(0);
            let chars = u32::try_from(chars).unwrap_or(u32::MAX);
            let width = chars
                .saturating_mul(config.char_width)
                .saturating_add(config.cell_padding.saturating_mul(2))
                .max(config.default_column_width);
            right = right.saturating_add(width);
            width
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::provider::TableProvider;

    #[test]
    fn test_long_text_widens_column() {
        let table = TableProvider::new([["short", "a much longer piece of text"]]);
        let widths = autosize_columns(&table, &SheetConfig::default());
        assert_eq!(widths.len(), 2);
        assert_eq!(widths[0], 64);
        // 27 chars * 8 + 2 * 10
        assert_eq!(widths[1], 236);
    }

    #[test]
    fn test_rows_below_first_screen_are_ignored() {
        let mut rows = vec![vec!["x".to_string()]; 100];
        rows.push(vec!["w".repeat(200)]);
        let table = TableProvider::new(rows);
        let config = SheetConfig::default().with_size(200, 70);
        let widths = autosize_columns(&table, &config);
        assert_eq!(widths, vec![64]);
    }

    #[test]
    fn test_columns_past_first_screen_use_default() {
        let long = "w".repeat(30);
        let table = TableProvider::new([vec![long.as_str(); 6]]);
        // 30 * 8 + 20 = 260px each; the third column starts at 520 >= 500
        let config = SheetConfig::default().with_size(500, 200);
        let widths = autosize_columns(&table, &config);
        assert_eq!(widths, vec![260, 260, 64, 64, 64, 64]);
    }
}
