use crate::error::BalanzaError;
use crate::model::Amount;
use crate::parsing::slicer::RawCell;
use regex::Regex;
use std::sync::LazyLock;

/// Dot-grouped integer with an optional comma-decimal tail. Only the integer
/// part is captured; the decimals are consumed and dropped, so a value like
/// `1.234,56` yields one token `1.234` rather than two.
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+[\d.?]*)(?:,\d+)?").expect("amount pattern is valid")
});

/// The numeric tokens found in one piece of text.
///
/// Most cells hold one figure. Rows where two printed columns ran together
/// hold two, and callers decide which shape they expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountToken {
    One(String),
    Many(Vec<String>),
}

impl AmountToken {
    pub fn as_slice(&self) -> &[String] {
        match self {
            AmountToken::One(s) => std::slice::from_ref(s),
            AmountToken::Many(v) => v,
        }
    }
}

/// Find every amount-looking substring in `text`.
///
/// Returns `None` when there are no digits at all.
pub fn extract_amounts(text: &str) -> Option<AmountToken> {
    let mut tokens: Vec<String> = AMOUNT_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    match tokens.len() {
        0 => None,
        1 => tokens.pop().map(AmountToken::One),
        _ => Some(AmountToken::Many(tokens)),
    }
}

/// Strip thousand separators and parse the rest as a base-10 integer.
///
/// `"1.234.567"` becomes `1234567`.
pub fn normalize_amount(token: &str) -> Result<Amount, BalanzaError> {
    let digits: String = token.chars().filter(|c| *c != '.').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(BalanzaError::MalformedAmount {
            raw: token.to_string(),
            reason: "not a dot-grouped integer".into(),
        });
    }
    digits
        .parse::<Amount>()
        .map_err(|e| BalanzaError::MalformedAmount {
            raw: token.to_string(),
            reason: e.to_string(),
        })
}

/// The single amount held by a column cell.
pub fn cell_amount(cell: &RawCell) -> Result<Amount, BalanzaError> {
    match extract_amounts(&cell.text) {
        Some(AmountToken::One(token)) => normalize_amount(&token),
        Some(AmountToken::Many(tokens)) => Err(BalanzaError::MalformedAmount {
            raw: cell.text.clone(),
            reason: format!(
                "row {} holds {} amounts ({}) where one was expected",
                cell.row,
                tokens.len(),
                tokens.join(", ")
            ),
        }),
        None => Err(BalanzaError::MalformedAmount {
            raw: cell.text.clone(),
            reason: format!("row {} holds no amount", cell.row),
        }),
    }
}

/// The two amounts held by a merged row, in printed order.
pub fn cell_amount_pair(cell: &RawCell) -> Result<(Amount, Amount), BalanzaError> {
    let found = extract_amounts(&cell.text);
    match found.as_ref().map(AmountToken::as_slice) {
        Some([first, second]) => Ok((normalize_amount(first)?, normalize_amount(second)?)),
        other => Err(BalanzaError::MalformedAmount {
            raw: cell.text.clone(),
            reason: format!(
                "row {} holds {} amounts where two were expected",
                cell.row,
                other.map_or(0, |tokens| tokens.len())
            ),
        }),
    }
}

pub fn column_amounts(cells: &[RawCell]) -> Result<Vec<Amount>, BalanzaError> {
    cells.iter().map(cell_amount).collect()
}

/// Split merged rows into first and paired figures, then append the
/// trailing single-figure rows to the paired list.
pub fn merged_amounts(
    pairs: &[RawCell],
    remainder: &[RawCell],
) -> Result<(Vec<Amount>, Vec<Amount>), BalanzaError> {
    let mut first = Vec::with_capacity(pairs.len());
    let mut paired = Vec::with_capacity(pairs.len() + remainder.len());
    for cell in pairs {
        let (a, b) = cell_amount_pair(cell)?;
        first.push(a);
        paired.push(b);
    }
    for cell in remainder {
        paired.push(cell_amount(cell)?);
    }
    Ok((first, paired))
}
