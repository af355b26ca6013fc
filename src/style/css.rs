//! Inline CSS declaration parsing.
//!
//! Only the properties a word processor can express are recognized. Unknown
//! properties are skipped, and a malformed value drops that one property
//! without affecting the rest of the declaration block.

use super::color::resolve_color;
use super::record::{
    FontStyle, FontWeight, Length, LineHeight, Margin, MeasurementUnit, StyleRecord, TextAlign,
    TextDecoration,
};
use log::debug;

/// Properties picked up from `style` attributes.
pub const SUPPORTED_PROPERTIES: &[&str] = &[
    "font-size",
    "color",
    "font-weight",
    "font-style",
    "text-align",
    "margin",
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
    "line-height",
    "text-decoration",
    "background-color",
];

/// Parse a `style` attribute value into a [`StyleRecord`].
///
/// `unit` is applied to unit-less numbers in `font-size` and margins.
/// Later declarations of the same property win, as in CSS.
pub fn parse_style(declarations: &str, unit: MeasurementUnit) -> StyleRecord {
    let mut record = StyleRecord::default();

    for declaration in declarations.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        let value = strip_important(value.trim());
        if name.is_empty() || value.is_empty() {
            continue;
        }

        if !apply_property(&mut record, &name, value, unit) {
            debug!("ignoring CSS declaration `{}: {}`", name, value);
        }
    }

    record
}

/// Apply one declaration. Returns `false` when the property is unknown or its
/// value is malformed.
fn apply_property(record: &mut StyleRecord, name: &str, value: &str, unit: MeasurementUnit) -> bool {
    match name {
        "font-size" => set(&mut record.font_size, parse_font_size(value, unit)),
        "color" => set(&mut record.color, resolve_color(value).ok()),
        "background-color" => set(&mut record.background_color, resolve_color(value).ok()),
        "font-weight" => set(&mut record.font_weight, parse_font_weight(value)),
        "font-style" => set(&mut record.font_style, parse_font_style(value)),
        "text-align" => set(&mut record.text_align, parse_text_align(value)),
        "line-height" => set(&mut record.line_height, parse_line_height(value, unit)),
        "text-decoration" => set(&mut record.text_decoration, parse_text_decoration(value)),
        "margin" => match parse_margin_shorthand(value, unit) {
            Some(margin) => {
                record.margin = margin;
                true
            }
            None => false,
        },
        "margin-top" => set(&mut record.margin.top, parse_margin_length(value, unit)),
        "margin-right" => set(&mut record.margin.right, parse_margin_length(value, unit)),
        "margin-bottom" => set(&mut record.margin.bottom, parse_margin_length(value, unit)),
        "margin-left" => set(&mut record.margin.left, parse_margin_length(value, unit)),
        _ => false,
    }
}

fn set<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = Some(v);
            true
        }
        None => false,
    }
}

fn strip_important(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    match lower.rfind("!important") {
        Some(idx) if lower[idx..].trim() == "!important" => value[..idx].trim_end(),
        _ => value,
    }
}

/// Parse a CSS length. Bare numbers take the default `unit`; `auto` and
/// negative values are rejected.
pub fn parse_length(value: &str, unit: MeasurementUnit) -> Option<Length> {
    let value = value.trim().to_ascii_lowercase();
    if value == "0" {
        return Some(Length::Pt(0.0));
    }

    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(value.len());
    let (number, suffix) = value.split_at(split);
    let number: f32 = number.parse().ok()?;
    if !number.is_finite() || number < 0.0 {
        return None;
    }

    let length = match suffix.trim() {
        "" => unit.length(number),
        "pt" => Length::Pt(number),
        "px" => Length::Px(number),
        "em" => Length::Em(number),
        "rem" => Length::Rem(number),
        "%" => Length::Percent(number),
        "in" => Length::Pt(number * 72.0),
        "cm" => Length::Pt(number * 72.0 / 2.54),
        "mm" => Length::Pt(number * 72.0 / 25.4),
        "pc" => Length::Pt(number * 12.0),
        _ => return None,
    };
    Some(length)
}

fn parse_font_size(value: &str, unit: MeasurementUnit) -> Option<Length> {
    let keyword = match value.to_ascii_lowercase().as_str() {
        "xx-small" => Some(Length::Px(9.0)),
        "x-small" => Some(Length::Px(10.0)),
        "small" => Some(Length::Px(13.0)),
        "medium" => Some(Length::Px(16.0)),
        "large" => Some(Length::Px(18.0)),
        "x-large" => Some(Length::Px(24.0)),
        "xx-large" => Some(Length::Px(32.0)),
        "smaller" => Some(Length::Em(0.8)),
        "larger" => Some(Length::Em(1.2)),
        _ => None,
    };
    keyword.or_else(|| parse_length(value, unit).filter(|l| !matches!(l, Length::Pt(v) if *v == 0.0)))
}

fn parse_font_weight(value: &str) -> Option<FontWeight> {
    match value.to_ascii_lowercase().as_str() {
        "normal" | "lighter" => Some(FontWeight::Normal),
        "bold" | "bolder" => Some(FontWeight::Bold),
        numeric => {
            let weight: u16 = numeric.parse().ok()?;
            if !(1..=1000).contains(&weight) {
                return None;
            }
            Some(if weight >= 600 {
                FontWeight::Bold
            } else {
                FontWeight::Normal
            })
        }
    }
}

fn parse_font_style(value: &str) -> Option<FontStyle> {
    match value.to_ascii_lowercase().as_str() {
        "normal" => Some(FontStyle::Normal),
        "italic" | "oblique" => Some(FontStyle::Italic),
        _ => None,
    }
}

fn parse_text_align(value: &str) -> Option<TextAlign> {
    match value.to_ascii_lowercase().as_str() {
        "left" | "start" => Some(TextAlign::Left),
        "center" => Some(TextAlign::Center),
        "right" | "end" => Some(TextAlign::Right),
        "justify" => Some(TextAlign::Justify),
        _ => None,
    }
}

fn parse_line_height(value: &str, unit: MeasurementUnit) -> Option<LineHeight> {
    let lower = value.trim().to_ascii_lowercase();
    if lower == "normal" {
        return Some(LineHeight::Multiplier(1.0));
    }
    if let Ok(multiplier) = lower.parse::<f32>() {
        return (multiplier.is_finite() && multiplier > 0.0).then_some(LineHeight::Multiplier(multiplier));
    }
    match parse_length(&lower, unit)? {
        Length::Percent(pct) if pct > 0.0 => Some(LineHeight::Multiplier(pct / 100.0)),
        Length::Em(em) if em > 0.0 => Some(LineHeight::Multiplier(em)),
        Length::Percent(_) | Length::Em(_) => None,
        length => Some(LineHeight::Length(length)),
    }
}

fn parse_text_decoration(value: &str) -> Option<TextDecoration> {
    let mut decoration = TextDecoration::default();
    for token in value.split_whitespace() {
        match token.to_ascii_lowercase().as_str() {
            "underline" => decoration.underline = true,
            "line-through" => decoration.line_through = true,
            "none" => decoration = TextDecoration::default(),
            _ => return None,
        }
    }
    Some(decoration)
}

/// Percentages refer to the containing block width, which has no equivalent here.
fn parse_margin_length(value: &str, unit: MeasurementUnit) -> Option<Length> {
    parse_length(value, unit).filter(|l| !matches!(l, Length::Percent(_)))
}

fn parse_margin_shorthand(value: &str, unit: MeasurementUnit) -> Option<Margin> {
    let sides: Vec<Option<Length>> = value
        .split_whitespace()
        .map(|part| {
            if part.eq_ignore_ascii_case("auto") {
                Ok(None)
            } else {
                parse_margin_length(part, unit).map(Some).ok_or(())
            }
        })
        .collect::<Result<_, ()>>()
        .ok()?;

    let (top, right, bottom, left) = match sides.as_slice() {
        [all] => (*all, *all, *all, *all),
        [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
        [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
        [top, right, bottom, left] => (*top, *right, *bottom, *left),
        _ => return None,
    };
    Some(Margin {
        top,
        right,
        bottom,
        left,
    })
}
