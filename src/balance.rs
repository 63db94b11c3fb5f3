//! Token balance normalization
//!
//! The token quotes balances as fixed-point integers scaled by 10^18.
//! Ledger SDKs return that value either bare or wrapped in an array-like
//! response, and encode it as a JSON number or a decimal string. Balance
//! display is best-effort: any shape we cannot coerce degrades to a
//! sentinel instead of an error.

use crate::config::TOKEN_SCALE;
use crate::traits::LedgerGateway;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Display value when no balance is available
pub const BALANCE_UNAVAILABLE: &str = "-";

/// Normalized balance: grouped display string plus the whole-unit count
/// used by the like-affordability gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceView {
    pub display: String,
    /// Whole token units, absent when the raw value did not coerce
    pub whole_units: Option<u128>,
}

impl BalanceView {
    pub fn unavailable() -> Self {
        Self {
            display: BALANCE_UNAVAILABLE.to_string(),
            whole_units: None,
        }
    }
}

impl Default for BalanceView {
    fn default() -> Self {
        Self::unavailable()
    }
}

fn coerce_raw_units(value: &Value) -> Option<u128> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Some(u as u128)
            } else {
                // values past u64 arrive as strings in practice; a float
                // here has already lost precision
                None
            }
        }
        Value::String(s) => s.trim().parse::<u128>().ok(),
        _ => None,
    }
}

/// Insert thousands separators into a non-negative integer
fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Normalize a raw balance response into a display value
///
/// Accepts a bare integer-like value or an array-like wrapper whose
/// first element is the value. Whole units are the floor of the raw
/// value divided by 10^18; the fractional remainder is discarded, not
/// rounded.
pub fn normalize_balance(raw: &Value) -> BalanceView {
    let value = match raw {
        Value::Array(items) => match items.first() {
            Some(first) => first,
            None => return BalanceView::unavailable(),
        },
        other => other,
    };

    match coerce_raw_units(value) {
        Some(units) => {
            let whole = units / TOKEN_SCALE;
            BalanceView {
                display: group_thousands(whole),
                whole_units: Some(whole),
            }
        }
        None => BalanceView::unavailable(),
    }
}

/// Caches the most recently fetched balance for the active account
///
/// Refreshed on account change and after confirmed transactions. The
/// cached value is what the like gate consults; it can be stale against
/// a concurrent spend, which the gate accepts as an approximation.
pub struct BalanceTracker {
    ledger: Arc<dyn LedgerGateway>,
    view: Mutex<BalanceView>,
}

impl BalanceTracker {
    pub fn new(ledger: Arc<dyn LedgerGateway>) -> Self {
        Self {
            ledger,
            view: Mutex::new(BalanceView::unavailable()),
        }
    }

    /// Re-fetch the balance for `account`, or clear it when no account
    /// is connected. Never fails: fetch errors leave the sentinel.
    pub async fn refresh(&self, account: Option<&str>) -> BalanceView {
        let next = match account {
            None => BalanceView::unavailable(),
            Some(address) => match self.ledger.token_balance(address).await {
                Ok(raw) => normalize_balance(&raw),
                Err(err) => {
                    debug!("balance fetch failed, showing sentinel: {}", err);
                    BalanceView::unavailable()
                }
            },
        };
        *self.view.lock().await = next.clone();
        next
    }

    /// Last fetched balance, without re-querying
    pub async fn current(&self) -> BalanceView {
        self.view.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn floor_division_fixture_table() {
        let scale = TOKEN_SCALE;
        let cases: [(u128, &str); 5] = [
            (0, "0"),
            (1, "0"),
            (scale - 1, "0"),
            (scale, "1"),
            (scale * 5 / 2, "2"),
        ];
        for (raw, expected) in cases {
            let view = normalize_balance(&json!(raw.to_string()));
            assert_eq!(view.display, expected, "raw {}", raw);
        }
    }

    #[test]
    fn accepts_array_wrapped_value() {
        let view = normalize_balance(&json!([TOKEN_SCALE.to_string()]));
        assert_eq!(view.whole_units, Some(1));
    }

    #[test]
    fn accepts_bare_number() {
        let view = normalize_balance(&json!(1_000_000_u64));
        assert_eq!(view.whole_units, Some(0));
        assert_eq!(view.display, "0");
    }

    #[test]
    fn malformed_values_degrade_to_sentinel() {
        for raw in [json!({"balance": 1}), json!("12abc"), json!(null), json!([])] {
            let view = normalize_balance(&raw);
            assert_eq!(view.display, BALANCE_UNAVAILABLE);
            assert_eq!(view.whole_units, None);
        }
    }

    #[test]
    fn grouping_inserts_separators() {
        let raw = (1_234_567_u128 * TOKEN_SCALE).to_string();
        let view = normalize_balance(&json!(raw));
        assert_eq!(view.display, "1,234,567");
    }
}
