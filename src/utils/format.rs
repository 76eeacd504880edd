use crate::services::mrr_service::MrrResult;

/// Shown whenever a refresh fails; the previous figure is never kept.
pub const MRR_PLACEHOLDER: &str = "MRR --";

/// Renders the dominant-currency total as a status line, e.g. "MRR: $1,234".
///
/// Amounts arrive in the currency's smallest unit, so two-decimal
/// currencies round to whole major units while zero-decimal currencies
/// (JPY, KRW, ...) are used as-is. Currencies without a known symbol fall
/// back to the uppercase code, e.g. "MRR: CHF 1,234".
pub fn format_mrr(result: &MrrResult) -> String {
    let whole_units = if is_zero_decimal_currency(&result.currency) {
        result.cents
    } else {
        (result.cents as f64 / 100.0).round() as i64
    };
    let amount = group_thousands(whole_units);

    match currency_symbol(&result.currency) {
        Some(symbol) => format!("MRR: {}{}", symbol, amount),
        None => format!("MRR: {} {}", result.currency.to_uppercase(), amount),
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "usd" | "cad" | "aud" => Some("$"),
        "eur" => Some("€"),
        "gbp" => Some("£"),
        "brl" => Some("R$"),
        "jpy" | "cny" => Some("¥"),
        "inr" => Some("₹"),
        _ => None,
    }
}

/// Zero-decimal currencies don't use decimal places in Stripe's API
/// Source: https://docs.stripe.com/currencies#zero-decimal
fn is_zero_decimal_currency(currency: &str) -> bool {
    matches!(
        currency.to_uppercase().as_str(),
        "BIF" | "CLP"
            | "DJF"
            | "GNF"
            | "JPY"
            | "KMF"
            | "KRW"
            | "MGA"
            | "PYG"
            | "RWF"
            | "UGX"
            | "VND"
            | "VUV"
            | "XAF"
            | "XOF"
            | "XPF"
    )
}

fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
