//! Operator tests

use crate::engine::evaluate_condition;
use serde_json::json;
use typeline_core::operator::lookup;
use typeline_core::Value;

fn eval(value: Option<&Value>, symbol: &str, raw: &str) -> bool {
    let operator = lookup(symbol).unwrap_or_else(|| panic!("unknown operator {}", symbol));
    evaluate_condition(value, operator, raw)
}

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

// ===========================================
// Existence operator tests
// ===========================================

#[test]
fn test_exists() {
    assert!(!eval(None, "exists", ""));
    assert!(!eval(Some(&Value::Null), "exists", ""));
    assert!(eval(Some(&v(json!(""))), "exists", ""));
    assert!(eval(Some(&v(json!(0))), "exists", ""));

    assert!(eval(None, "!exists", ""));
    assert!(eval(Some(&Value::Null), "!exists", ""));
    assert!(!eval(Some(&v(json!(false))), "!exists", ""));
}

#[test]
fn test_empty() {
    assert!(!eval(Some(&Value::Null), "empty", ""));
    assert!(!eval(None, "empty", ""));
    assert!(eval(Some(&v(json!(""))), "empty", ""));
    assert!(eval(Some(&v(json!([]))), "empty", ""));
    assert!(eval(Some(&v(json!({}))), "empty", ""));
    assert!(!eval(Some(&v(json!(0))), "empty", ""));
    assert!(!eval(Some(&v(json!(false))), "empty", ""));

    assert!(eval(Some(&v(json!(0))), "!empty", ""));
    assert!(eval(Some(&Value::Null), "!empty", ""));
    assert!(!eval(Some(&v(json!([]))), "!empty", ""));
}

#[test]
fn test_null() {
    assert!(eval(Some(&Value::Null), "null", ""));
    assert!(!eval(None, "null", ""));
    assert!(!eval(Some(&v(json!(""))), "null", ""));

    assert!(eval(None, "!null", ""));
    assert!(!eval(Some(&Value::Null), "!null", ""));
}

// ===========================================
// Comparison operator tests
// ===========================================

#[test]
fn test_equality_is_by_string() {
    assert!(eval(Some(&v(json!(0))), "=", "0"));
    assert!(eval(Some(&v(json!("0"))), "=", "0"));
    assert!(eval(Some(&v(json!(true))), "=", "true"));
    assert!(eval(Some(&v(json!(1.5))), "=", "1.5"));
    assert!(eval(Some(&v(json!(10.0))), "=", "10"));
    assert!(!eval(Some(&v(json!("active"))), "=", "Active"));
    assert!(eval(None, "=", "undefined"));

    assert!(eval(Some(&v(json!("banned"))), "!=", "active"));
    assert!(!eval(Some(&v(json!(7))), "!=", "7"));
}

#[test]
fn test_ordering() {
    assert!(eval(Some(&v(json!(18))), ">=", "18"));
    assert!(!eval(Some(&v(json!(18))), ">", "18"));
    assert!(eval(Some(&v(json!("20"))), ">", "18"));
    assert!(eval(Some(&v(json!(-1))), "<", "0"));
    assert!(eval(Some(&v(json!(3))), "<=", "3.0"));
}

#[test]
fn test_ordering_with_nan_is_false() {
    assert!(!eval(Some(&v(json!("abc"))), ">", "1"));
    assert!(!eval(Some(&v(json!("abc"))), "<=", "1"));
    assert!(!eval(Some(&v(json!(5))), "<", "five"));
    assert!(!eval(None, ">=", "0"));
    assert!(!eval(Some(&v(json!({"a": 1}))), ">", "0"));
}

#[test]
fn test_ordering_loose_coercions() {
    // null and empty strings coerce to zero, booleans to 0/1
    assert!(eval(Some(&Value::Null), ">=", "0"));
    assert!(eval(Some(&v(json!(""))), "<", "1"));
    assert!(eval(Some(&v(json!(true))), ">", "0"));
}

// ===========================================
// String operator tests
// ===========================================

#[test]
fn test_string_operators() {
    let title = v(json!("urgent: server down"));
    assert!(eval(Some(&title), "contains", "server"));
    assert!(!eval(Some(&title), "!contains", "server"));
    assert!(eval(Some(&title), "startsWith", "urgent"));
    assert!(eval(Some(&title), "endsWith", "down"));
    assert!(!eval(Some(&title), "endsWith", "up"));

    assert!(eval(Some(&v(json!(12345))), "contains", "234"));
    assert!(eval(Some(&v(json!(["a", "b"]))), "contains", "a,b"));
}

#[test]
fn test_regex_operators() {
    let code = v(json!("ABC123"));
    assert!(eval(Some(&code), "~", "^[A-Z]{3}[0-9]+$"));
    assert!(!eval(Some(&code), "!~", "^[A-Z]{3}[0-9]+$"));
    assert!(eval(Some(&code), "~", "/^abc/i"));
    assert!(!eval(Some(&code), "~", "^abc"));
    assert!(eval(Some(&v(json!(42))), "~", "^\\d+$"));
}

#[test]
fn test_invalid_regex_degrades() {
    let code = v(json!("anything"));
    assert!(!eval(Some(&code), "~", "(unclosed"));
    assert!(eval(Some(&code), "!~", "(unclosed"));
}

// ===========================================
// Membership operator tests
// ===========================================

#[test]
fn test_in() {
    assert!(eval(Some(&v(json!("moderator"))), "in", "admin,moderator"));
    assert!(eval(Some(&v(json!(" moderator"))), "in", "(admin, moderator)"));
    assert!(eval(Some(&v(json!("user"))), "in", "[admin, user]"));
    assert!(eval(Some(&v(json!(2))), "in", "(1,2,3)"));
    assert!(!eval(Some(&v(json!("guest"))), "in", "(admin,moderator)"));
    assert!(!eval(None, "in", "(admin)"));
}

#[test]
fn test_not_in() {
    assert!(eval(Some(&v(json!("guest"))), "!in", "(admin,moderator)"));
    assert!(!eval(Some(&v(json!("admin"))), "!in", "(admin,moderator)"));
    assert!(eval(None, "!in", "(admin)"));
}
