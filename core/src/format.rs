//! Display formatting shared by the dashboard, tables and PDF export.

/// Group digits the Indian way: the last three, then pairs (`12,34,567`).
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Rupee amount with no decimals, e.g. `₹42,000` or `-₹1,600`.
#[uniffi::export]
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("₹{}", amount);
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}₹{}", sign, group_indian(&digits))
}

/// Distance in km with two decimals, e.g. `7.50 km`.
#[uniffi::export]
pub fn format_distance(km: f64) -> String {
    format!("{:.2} km", km)
}

#[uniffi::export]
pub fn format_depth(cm: f64) -> String {
    format!("{:.1} cm", cm)
}
