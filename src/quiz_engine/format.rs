use crate::quiz_engine::models::{DisplayFormat, Equation, EquationDisplay, Operator};

/// Single-line form without the answer, e.g. `"12 + 7 + 3 ="`.
pub fn horizontal(eq: &Equation) -> String {
    let sep = format!(" {} ", eq.operator.display_symbol());
    let lhs = eq.numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(&sep);
    format!("{lhs} =")
}

/// Column-arithmetic form: right-aligned operands, the operator in front of
/// every operand after the first, and a rule underneath.
///
/// ```text
///   12
/// +  7
/// +  3
/// ----
/// ```
pub fn stacked(eq: &Equation) -> Vec<String> {
    let digits = eq.numbers.iter().map(|n| n.to_string().len()).max().unwrap_or(1);
    let width = digits + 2;
    let symbol = eq.operator.display_symbol();

    let mut lines = Vec::with_capacity(eq.numbers.len() + 1);
    for (i, n) in eq.numbers.iter().enumerate() {
        if i == 0 {
            lines.push(format!("{n:>width$}"));
        } else {
            lines.push(format!("{symbol} {n:>digits$}"));
        }
    }
    lines.push("-".repeat(width));
    lines
}

/// Division and two-operand products only make sense on one line; everything
/// else follows the requested layout.
pub fn render(eq: &Equation, requested: DisplayFormat) -> EquationDisplay {
    let forced_horizontal =
        eq.operator == Operator::Divide || (eq.operator == Operator::Multiply && eq.numbers.len() == 2);
    let format = if forced_horizontal { DisplayFormat::Horizontal } else { requested };

    let stacked = match format {
        DisplayFormat::Horizontal => Vec::new(),
        DisplayFormat::Vertical | DisplayFormat::Both => stacked(eq),
    };

    EquationDisplay { format, horizontal: horizontal(eq), stacked }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(numbers: Vec<u64>, operator: Operator, result: u64) -> Equation {
        Equation { numbers, operator, result }
    }

    #[test]
    fn horizontal_uses_display_symbols() {
        assert_eq!(horizontal(&eq(vec![28, 4], Operator::Divide, 7)), "28 ÷ 4 =");
        assert_eq!(horizontal(&eq(vec![3, 4, 2], Operator::Multiply, 24)), "3 × 4 × 2 =");
    }

    #[test]
    fn stacked_right_aligns() {
        let lines = stacked(&eq(vec![12, 7, 3], Operator::Add, 22));
        assert_eq!(lines, vec!["  12", "+  7", "+  3", "----"]);
    }

    #[test]
    fn division_is_always_horizontal() {
        let d = render(&eq(vec![28, 4], Operator::Divide, 7), DisplayFormat::Vertical);
        assert_eq!(d.format, DisplayFormat::Horizontal);
        assert!(d.stacked.is_empty());
    }

    #[test]
    fn two_factor_product_is_horizontal_but_three_is_not() {
        let two = render(&eq(vec![6, 7], Operator::Multiply, 42), DisplayFormat::Both);
        assert_eq!(two.format, DisplayFormat::Horizontal);
        let three = render(&eq(vec![2, 3, 4], Operator::Multiply, 24), DisplayFormat::Both);
        assert_eq!(three.format, DisplayFormat::Both);
        assert_eq!(three.stacked.len(), 4);
    }
}
