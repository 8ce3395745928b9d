//! Demo rows for the card list.

use crate::constants::MAX_SAMPLE_NUMBERS;

use super::CellModel;

/// Generates `count` collapsed demo rows, numbered from 1.
///
/// Every third row gets a longer description so wrapping is visible, and every
/// even row carries a number grid of up to [`MAX_SAMPLE_NUMBERS`] items.
#[must_use]
pub fn sample_models(count: usize) -> Vec<CellModel> {
    (1..=count).map(sample_model).collect()
}

fn sample_model(n: usize) -> CellModel {
    let description = if n % 3 == 0 {
        format!(
            "Longer description for item {n}. It spans several lines once the card is \
             narrower than the text, and it is never truncated: the detail area grows to \
             fit every wrapped line."
        )
    } else {
        format!("Short description for item {n}.")
    };

    let model = CellModel::new(
        format!("Section {n}"),
        format!("Title {n}"),
        description,
        format!("Footer text for item {n}."),
    );

    if n % 2 == 0 {
        model.with_numbers((0..n.min(MAX_SAMPLE_NUMBERS)).map(|i| i.to_string()))
    } else {
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_models_count_and_titles() {
        let models = sample_models(20);
        assert_eq!(models.len(), 20);
        assert_eq!(models[0].title, "Title 1");
        assert_eq!(models[19].title, "Title 20");
        assert!(models.iter().all(|m| !m.is_expanded));
    }

    #[test]
    fn test_first_row_matches_reference_scenario() {
        let first = &sample_models(1)[0];
        assert_eq!(first.description, "Short description for item 1.");
        assert_eq!(first.footer, "Footer text for item 1.");
        assert!(!first.has_numbers());
    }

    #[test]
    fn test_even_rows_carry_capped_numbers() {
        let models = sample_models(30);
        assert_eq!(models[1].numbers().len(), 2);
        assert_eq!(models[1].numbers(), ["0".to_string(), "1".to_string()]);
        assert_eq!(models[29].numbers().len(), MAX_SAMPLE_NUMBERS);
        assert!(!models[2].has_numbers());
    }

    #[test]
    fn test_every_third_row_is_long() {
        let models = sample_models(3);
        assert!(models[2].description.starts_with("Longer description for item 3."));
    }

    #[test]
    fn test_zero_rows() {
        assert!(sample_models(0).is_empty());
    }
}
