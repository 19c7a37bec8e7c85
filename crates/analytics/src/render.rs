//! Script markup and value formatting for the data-layer push.

use crate::event::ProfitEvent;

/// Print `value` the way the storefront prints a float: rounded to
/// `precision` significant digits, without trailing zeros, integers without a
/// decimal point (`45.0` → `45`, `0.1 + 0.2` → `0.3`).
///
/// Magnitudes with a decimal exponent below -4, or at least `precision`, use
/// exponent form instead (`1.0E+20`, `9.9999999747524E-7`).
pub fn format_amount(value: f64, precision: u8) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    let precision = precision.clamp(1, 17);
    let scientific = format!("{:.*e}", usize::from(precision) - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format!("{value}");
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return format!("{value}");
    };

    if exponent < -4 || exponent >= i32::from(precision) {
        return exponent_form(mantissa, exponent);
    }
    // `Display` prints the shortest decimal form of the rounded value.
    let rounded = scientific.parse::<f64>().unwrap_or(value);
    format!("{rounded}")
}

fn exponent_form(mantissa: &str, exponent: i32) -> String {
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };
    let point = if mantissa.contains('.') { "" } else { ".0" };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}{point}E{sign}{}", exponent.unsigned_abs())
}

/// Escape `raw` for use inside a single-quoted JavaScript string within an
/// inline `<script>` block.
pub fn escape_js_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\x22"),
            '<' => out.push_str("\\x3C"),
            '>' => out.push_str("\\x3E"),
            '&' => out.push_str("\\x26"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

/// Render the inline script that pushes `event` onto `window.<data_layer>`.
///
/// `data_layer` is trusted to be an identifier (checked by
/// [`EmitterConfig::validate`](crate::EmitterConfig::validate)).
pub fn script(event: &ProfitEvent, data_layer: &str) -> String {
    format!(
        "<script type=\"text/javascript\">\
         window.{dl} = window.{dl} || [];\
         window.{dl}.push({{'event': '{name}','{field}' : '{value}'}});\
         </script>",
        dl = data_layer,
        name = escape_js_string(event.event_name()),
        field = escape_js_string(event.profit_field()),
        value = escape_js_string(event.value()),
    )
}
