//! Tests for the numeric range compiler
//!
//! The brute-force checks mirror how the pattern is used downstream: it is
//! searched unanchored at the start and terminated by the `%` sign.

use super::*;
use regex::Regex;

fn matcher(threshold: u32) -> Regex {
    let pattern = simplify_classes(&compile(threshold));
    Regex::new(&format!("{pattern}%")).unwrap()
}

fn stat_line(value: u32) -> String {
    format!("Item Quantity: +{value}%")
}

#[test]
fn zero_is_no_constraint() {
    assert_eq!(compile(0), "");
}

#[test]
fn single_digits() {
    assert_eq!(compile(1), r"([1-9]|\d..?)");
    assert_eq!(compile(5), r"([5-9]|\d..?)");
    assert_eq!(compile(9), r"([9-9]|\d..?)");
    assert_eq!(simplify_classes(&compile(9)), r"(9|\d..?)");
}

#[test]
fn two_digits() {
    assert_eq!(compile(20), "([2-9].|1..)");
    assert_eq!(compile(37), "(3[7-9]|[4-9].|1..)");
    assert_eq!(compile(95), "(9[5-9]|1..)");
    assert_eq!(compile(90), "([9-9].|1..)");
    assert_eq!(simplify_classes(&compile(18)), "(1[89]|[2-9].|1..)");
}

#[test]
fn one_hundred_is_any_three_digits() {
    assert_eq!(compile(100), r"(\d{3})");
}

#[test]
fn hundreds() {
    assert_eq!(compile(137), "1([3-9][7-9]|[4-9].)");
    assert_eq!(compile(150), "1[5-9].");
    assert_eq!(compile(105), r"(\d0[5-9]|\d[1-9].)");
    assert_eq!(compile(199), "199");
    assert_eq!(compile(195), "19[5-9]");
    assert_eq!(compile(190), "1[9-9].");
    assert_eq!(simplify_classes(&compile(190)), "19.");
}

#[test]
fn two_hundred_and_up_collapse() {
    assert_eq!(compile(200), "2..");
    assert_eq!(compile(250), "2..");
    assert_eq!(compile(999), "2..");
    assert_eq!(compile(u32::MAX), "2..");
}

#[test]
fn simplify_classes_rewrites_whole_query() {
    assert_eq!(
        simplify_classes(r#""m q.*(1[8-9]|[2-9].|1..)%" "iz.*([9-9]|\d..?)%""#),
        r#""m q.*(1[89]|[2-9].|1..)%" "iz.*(9|\d..?)%""#
    );
}

#[test]
fn brute_force_below_two_hundred() {
    for threshold in 1..200 {
        let re = matcher(threshold);
        for value in 0..200 {
            assert_eq!(
                re.is_match(&stat_line(value)),
                value >= threshold,
                "threshold {threshold}, value {value}, pattern {}",
                re.as_str()
            );
        }
    }
}

#[test]
fn brute_force_two_hundred_and_up() {
    for threshold in (200..1000).step_by(7) {
        let re = matcher(threshold);
        for value in 0..200 {
            assert!(!re.is_match(&stat_line(value)), "value {value} matched");
        }
        for value in 200..300 {
            assert!(re.is_match(&stat_line(value)), "value {value} missed");
        }
    }
}

#[test]
fn quantity_clause_matches_stat_text() {
    let re = Regex::new(&format!("(?i)m q.*{}%", compile(137))).unwrap();

    assert!(re.is_match("Item Quantity: +142%"));
    assert!(re.is_match("Item Quantity: +137%"));
    assert!(!re.is_match("Item Quantity: +136%"));
    assert!(!re.is_match("Item Rarity: +150%"));
}

// ── NumericSetting ───────────────────────────────────────────────────

#[test]
fn setting_without_digits_is_unconstrained() {
    assert_eq!(NumericSetting::new("", false).pattern(), "");
    assert_eq!(NumericSetting::new("abc", false).pattern(), "");
    assert_eq!(NumericSetting::new("  %", true).pattern(), "");
}

#[test]
fn setting_extracts_digits_only() {
    let setting = NumericSetting::new("1 3x7%", false);
    assert_eq!(setting.threshold(), 137);
    assert_eq!(setting.pattern(), "1([3-9][7-9]|[4-9].)");
}

#[test]
fn setting_leading_zeros() {
    assert_eq!(NumericSetting::new("007", false).threshold(), 7);
}

#[test]
fn relax_rounds_down_to_ten() {
    assert_eq!(NumericSetting::new("137", true).threshold(), 130);
    assert_eq!(NumericSetting::new("137", true).pattern(), "1[3-9].");
    assert_eq!(NumericSetting::new("80", true).threshold(), 80);
}

#[test]
fn relax_below_ten_is_unconstrained() {
    let setting = NumericSetting::new("7", true);
    assert_eq!(setting.threshold(), 0);
    assert_eq!(setting.pattern(), "");
}

#[test]
fn oversized_input_saturates() {
    let setting = NumericSetting::new("99999999999999999999", false);
    assert_eq!(setting.threshold(), u32::MAX);
    assert_eq!(setting.pattern(), "2..");
}

#[test]
fn setting_deserializes_with_defaults() {
    let setting: NumericSetting = serde_json::from_str(r#"{"digits": "42"}"#).unwrap();
    assert_eq!(setting, NumericSetting::new("42", false));
}
