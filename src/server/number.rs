//! Number parsing and formatting that follows the float grammar and `%.2f`
//! output clients of this endpoint already depend on.

/// Parses a float the way `Float.parseFloat` does: surrounding control
/// characters and spaces are ignored, `NaN` and `Infinity` are case sensitive,
/// a trailing `f`/`F`/`d`/`D` is allowed, and hexadecimal literals need a
/// binary exponent (`0x1.8p1`).
pub fn parse_float(text: &str) -> Option<f32> {
    let text = text.trim_matches(|c: char| c <= ' ');

    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = match unsigned {
        "NaN" => f32::NAN,
        "Infinity" => f32::INFINITY,
        _ => {
            let body = unsigned
                .strip_suffix(|c: char| matches!(c, 'f' | 'F' | 'd' | 'D'))
                .unwrap_or(unsigned);

            if body.starts_with("0x") || body.starts_with("0X") {
                parse_hex(&body[2..])?
            } else if is_decimal(body) {
                body.parse().ok()?
            } else {
                return None;
            }
        }
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// `digits [. digits] [(e|E) [+|-] digits]` with at least one significand digit.
fn is_decimal(text: &str) -> bool {
    let (significand, exponent) = match text.find(|c: char| c == 'e' || c == 'E') {
        Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
        None => (text, None),
    };

    let mut parts = significand.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    if !all_digits(whole) || !all_digits(fraction) || whole.len() + fraction.len() == 0 {
        return false;
    }

    match exponent {
        None => true,
        Some(exponent) => {
            let digits = exponent
                .strip_prefix(|c: char| c == '+' || c == '-')
                .unwrap_or(exponent);
            !digits.is_empty() && all_digits(digits)
        }
    }
}

/// Hex significand with optional point, followed by a mandatory `p` exponent.
fn parse_hex(text: &str) -> Option<f32> {
    let idx = text.find(|c: char| c == 'p' || c == 'P')?;
    let (significand, exponent) = (&text[..idx], &text[idx + 1..]);

    let exponent_digits = exponent
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(exponent);
    if exponent_digits.is_empty() || !exponent_digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // anything past this magnitude is zero or infinity for an f32 anyway
    let exponent: i32 = exponent.parse().unwrap_or(if exponent.starts_with('-') {
        -10_000
    } else {
        10_000
    });

    let mut parts = significand.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");
    if whole.len() + fraction.len() == 0 {
        return None;
    }

    let mut mantissa: u64 = 0;
    let mut scale: i32 = 0;

    for (digits, in_fraction) in [(whole, false), (fraction, true)] {
        for c in digits.chars() {
            let digit = c.to_digit(16)? as u64;

            if mantissa >> 56 == 0 {
                mantissa = mantissa << 4 | digit;
                if in_fraction {
                    scale -= 4;
                }
            } else if !in_fraction {
                // out of precision; keep the magnitude
                scale += 4;
            }
        }
    }

    let exponent = (exponent.clamp(-10_000, 10_000) + scale).clamp(-2_000, 2_000);
    let mut value = mantissa as f64;
    // split the scaling so intermediate powers stay finite
    for part in [exponent / 2, exponent - exponent / 2] {
        value *= 2f64.powi(part);
    }

    Some(value as f32)
}

/// Formats like `String.format("%.2f", value)`: the float is widened to a
/// double, and its shortest decimal representation is rounded half-up to two
/// places.
pub fn format_fixed2(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-Infinity" } else { "Infinity" }.to_owned();
    }

    let value = value as f64;
    let sign = if value.is_sign_negative() { "-" } else { "" };

    // shortest round-trip digits, e.g. "1.625e0"
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    let digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();

    // digits[i] carries the weight 10^(exponent - i)
    let digit_at = |weight: i32| -> u8 {
        let idx = exponent - weight;
        if idx >= 0 && (idx as usize) < digits.len() {
            digits[idx as usize]
        } else {
            b'0'
        }
    };

    let mut kept: Vec<u8> = (-2..=exponent.max(0)).rev().map(digit_at).collect();

    if digit_at(-3) >= b'5' {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - 2;
    let whole = std::str::from_utf8(&kept[..split]).unwrap_or("0").trim_start_matches('0');
    let fraction = std::str::from_utf8(&kept[split..]).unwrap_or("00");

    format!(
        "{}{}.{}",
        sign,
        if whole.is_empty() { "0" } else { whole },
        fraction
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_decimal_forms() {
        let cases = [
            ("0", 0.0f32),
            ("12.5", 12.5),
            ("-3.25", -3.25),
            ("+4", 4.0),
            (".75", 0.75),
            ("5.", 5.0),
            ("1e1", 10.0),
            ("-2.5E-1", -0.25),
            (" 4 ", 4.0),
            ("\t7\n", 7.0),
        ];

        for (text, expected) in cases.iter() {
            assert_eq!(parse_float(text), Some(*expected), "parsing {:?}", text);
        }
    }

    #[test]
    fn accepts_type_suffixes() {
        assert_eq!(parse_float("1f"), Some(1.0));
        assert_eq!(parse_float("2.5d"), Some(2.5));
        assert_eq!(parse_float("-3F"), Some(-3.0));
        assert_eq!(parse_float("1e2D"), Some(100.0));
    }

    #[test]
    fn accepts_hex_literals() {
        assert_eq!(parse_float("0x1p3"), Some(8.0));
        assert_eq!(parse_float("0X1.8P1"), Some(3.0));
        assert_eq!(parse_float("-0x.8p0f"), Some(-0.5));
        assert_eq!(parse_float("0x10p-4"), Some(1.0));
    }

    #[test]
    fn special_values_are_case_sensitive() {
        assert_eq!(parse_float("Infinity"), Some(f32::INFINITY));
        assert_eq!(parse_float("-Infinity"), Some(f32::NEG_INFINITY));
        assert!(parse_float("NaN").unwrap().is_nan());

        for text in ["inf", "infinity", "INFINITY", "nan", "NAN", "Infinityf", "NaNd"] {
            assert_eq!(parse_float(text), None, "parsing {:?}", text);
        }
    }

    #[test]
    fn rejects_malformed_numbers() {
        for text in [
            "", " ", "abc", "12deg", "1,5", ".", "e5", "1e", "1e+", "--1", "1ff", "0x1", "0xp1",
            "0x1.8", "1.2.3", "f",
        ] {
            assert_eq!(parse_float(text), None, "parsing {:?}", text);
        }
    }

    #[test]
    fn rounds_ties_half_up() {
        assert_eq!(format_fixed2(0.125), "0.13");
        assert_eq!(format_fixed2(0.375), "0.38");
        assert_eq!(format_fixed2(1.625), "1.63");
        assert_eq!(format_fixed2(-2.875), "-2.88");
    }

    #[test]
    fn formats_two_decimals() {
        assert_eq!(format_fixed2(0.0), "0.00");
        assert_eq!(format_fixed2(-0.0), "-0.00");
        assert_eq!(format_fixed2(12.5), "12.50");
        assert_eq!(format_fixed2(-3.25), "-3.25");
        assert_eq!(format_fixed2(1.0 / 3.0), "0.33");
        assert_eq!(format_fixed2(-90.0), "-90.00");
        assert_eq!(format_fixed2(9.999), "10.00");
        assert_eq!(format_fixed2(0.004), "0.00");
        assert_eq!(format_fixed2(0.0001), "0.00");
        assert_eq!(format_fixed2(1e10), "10000000000.00");
    }

    #[test]
    fn formats_special_values() {
        assert_eq!(format_fixed2(f32::INFINITY), "Infinity");
        assert_eq!(format_fixed2(f32::NEG_INFINITY), "-Infinity");
        assert_eq!(format_fixed2(f32::NAN), "NaN");
    }
}
