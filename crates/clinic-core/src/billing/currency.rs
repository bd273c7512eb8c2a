//! Baht formatting for display and print.

const DIGITS: [&str; 10] = [
    "ศูนย์", "หนึ่ง", "สอง", "สาม", "สี่", "ห้า", "หก", "เจ็ด", "แปด", "เก้า",
];
const PLACES: [&str; 6] = ["", "สิบ", "ร้อย", "พัน", "หมื่น", "แสน"];
const MILLION: u64 = 1_000_000;

/// `1234.5` → `"1,234.50"`. Non-finite amounts print as `"0.00"`.
pub fn format_baht(amount: f64) -> String {
    if !amount.is_finite() {
        return "0.00".to_string();
    }
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// `1234.5` → `"฿1,234.50"`.
pub fn format_baht_with_symbol(amount: f64) -> String {
    let formatted = format_baht(amount);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-฿{}", rest),
        None => format!("฿{}", formatted),
    }
}

/// Amount in Thai words as printed on receipts.
///
/// `21` → `"ยี่สิบเอ็ดบาทถ้วน"`, `0.25` → `"ยี่สิบห้าสตางค์"`.
pub fn baht_text(amount: f64) -> String {
    if !amount.is_finite() {
        return String::new();
    }

    let satang_total = (amount.abs() * 100.0).round() as u64;
    let baht = satang_total / 100;
    let satang = satang_total % 100;
    let sign = if amount < 0.0 && satang_total > 0 { "ลบ" } else { "" };

    let mut text = String::from(sign);
    if baht == 0 && satang == 0 {
        text.push_str("ศูนย์บาทถ้วน");
        return text;
    }
    if baht > 0 {
        text.push_str(&read_number(baht, false));
        text.push_str("บาท");
    }
    if satang == 0 {
        text.push_str("ถ้วน");
    } else {
        text.push_str(&read_number(satang, false));
        text.push_str("สตางค์");
    }
    text
}

fn read_number(n: u64, has_higher: bool) -> String {
    if n >= MILLION {
        format!(
            "{}ล้าน{}",
            read_number(n / MILLION, has_higher),
            read_group(n % MILLION, true)
        )
    } else {
        read_group(n, has_higher)
    }
}

/// Read a number below one million. `has_higher` marks that millions precede it.
fn read_group(n: u64, has_higher: bool) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut text = String::new();

    for (i, b) in digits.bytes().enumerate() {
        let d = (b - b'0') as usize;
        if d == 0 {
            continue;
        }
        let place = len - 1 - i;
        match place {
            0 if d == 1 && (n > 9 || has_higher) => text.push_str("เอ็ด"),
            0 => text.push_str(DIGITS[d]),
            1 => {
                match d {
                    1 => {}
                    2 => text.push_str("ยี่"),
                    _ => text.push_str(DIGITS[d]),
                }
                text.push_str(PLACES[1]);
            }
            _ => {
                text.push_str(DIGITS[d]);
                text.push_str(PLACES[place]);
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_baht() {
        assert_eq!(format_baht(0.0), "0.00");
        assert_eq!(format_baht(350.0), "350.00");
        assert_eq!(format_baht(1234.5), "1,234.50");
        assert_eq!(format_baht(1234567.891), "1,234,567.89");
        assert_eq!(format_baht(-50.0), "-50.00");
    }

    #[test]
    fn test_format_baht_non_finite() {
        assert_eq!(format_baht(f64::NAN), "0.00");
        assert_eq!(format_baht(f64::INFINITY), "0.00");
        assert_eq!(format_baht_with_symbol(f64::NEG_INFINITY), "฿0.00");
    }

    #[test]
    fn test_format_baht_with_symbol() {
        assert_eq!(format_baht_with_symbol(400.0), "฿400.00");
        assert_eq!(format_baht_with_symbol(-1000.0), "-฿1,000.00");
    }

    #[test]
    fn test_baht_text() {
        assert_eq!(baht_text(0.0), "ศูนย์บาทถ้วน");
        assert_eq!(baht_text(1.0), "หนึ่งบาทถ้วน");
        assert_eq!(baht_text(10.0), "สิบบาทถ้วน");
        assert_eq!(baht_text(11.0), "สิบเอ็ดบาทถ้วน");
        assert_eq!(baht_text(21.0), "ยี่สิบเอ็ดบาทถ้วน");
        assert_eq!(baht_text(101.0), "หนึ่งร้อยเอ็ดบาทถ้วน");
        assert_eq!(baht_text(350.0), "สามร้อยห้าสิบบาทถ้วน");
        assert_eq!(baht_text(1234.5), "หนึ่งพันสองร้อยสามสิบสี่บาทห้าสิบสตางค์");
        assert_eq!(baht_text(0.25), "ยี่สิบห้าสตางค์");
        assert_eq!(baht_text(1_000_000.0), "หนึ่งล้านบาทถ้วน");
        assert_eq!(baht_text(2_000_001.0), "สองล้านเอ็ดบาทถ้วน");
    }
}
