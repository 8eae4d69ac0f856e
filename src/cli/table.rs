//! Probability Table Rendering
//!
//! Tabular view of the win-probability matrix, shown at any prompt via
//! `?`. Rows are the user's die, columns the opponent's; diagonal cells
//! are marked since a die never actually faces itself.

use prettytable::{Cell, Row, Table};

use crate::core::dice::DieSet;
use crate::core::probability::ProbabilityMatrix;

/// Render the matrix as a bordered text table.
///
/// Deterministic for a given set and matrix, so repeated help requests
/// within one run produce byte-identical output.
pub fn render_probability_table(dice: &DieSet, matrix: &ProbabilityMatrix) -> String {
    let mut table = Table::new();

    let mut header = vec![Cell::new("User dice v")];
    header.extend(dice.iter().map(|d| Cell::new(&d.label())));
    table.set_titles(Row::new(header));

    for (i, die) in dice.iter().enumerate() {
        let mut cells = vec![Cell::new(&die.label())];
        for j in 0..matrix.len() {
            let p = matrix.probability(i, j);
            let text = if i == j {
                format!("- ({p:.4})")
            } else {
                format!("{p:.4}")
            };
            cells.push(Cell::new(&text));
        }
        table.add_row(Row::new(cells));
    }

    format!("Probability of the win for the user:\n{table}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical() -> (DieSet, ProbabilityMatrix) {
        let dice =
            DieSet::parse(&["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap();
        let matrix = ProbabilityMatrix::compute(&dice).unwrap();
        (dice, matrix)
    }

    #[test]
    fn test_render_contains_probabilities_and_labels() {
        let (dice, matrix) = canonical();
        let out = render_probability_table(&dice, &matrix);
        assert!(out.starts_with("Probability of the win for the user:"));
        assert!(out.contains("User dice v"));
        assert!(out.contains("2,2,4,4,9,9"));
        assert!(out.contains("0.5556"));
        assert!(out.contains("0.4444"));
    }

    #[test]
    fn test_diagonal_is_marked() {
        let (dice, matrix) = canonical();
        let out = render_probability_table(&dice, &matrix);
        // Each canonical die has three doubled values, so a self-pair
        // wins 12/36 of face combinations.
        assert_eq!(out.matches("- (0.3333)").count(), 3);
    }

    #[test]
    fn test_render_is_deterministic() {
        let (dice, matrix) = canonical();
        assert_eq!(
            render_probability_table(&dice, &matrix),
            render_probability_table(&dice, &matrix)
        );
    }
}
