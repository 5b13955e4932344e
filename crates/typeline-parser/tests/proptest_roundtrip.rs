//! Property tests for canonical re-serialisation
//!
//! Every accepted type string and descriptor must print to a form that
//! parses back to an equal value.

use proptest::prelude::*;
use typeline_core::BaseKind;
use typeline_parser::{parse_descriptor, parse_type};

fn number_text() -> impl Strategy<Value = String> {
    (-1000i32..1000, 0u8..4).prop_map(|(whole, quarter)| {
        if quarter == 0 {
            whole.to_string()
        } else {
            format!("{}.{}", whole, quarter * 25)
        }
    })
}

fn range_text() -> impl Strategy<Value = String> {
    (proptest::option::of(0u16..500), proptest::option::of(0u16..500)).prop_map(|(a, b)| {
        let (lo, hi) = match (a, b) {
            (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
            other => other,
        };
        let side = |v: Option<u16>| v.map(|n| n.to_string()).unwrap_or_default();
        format!("({},{})", side(lo), side(hi))
    })
}

/// Union literals, including ones that start with a kind name
/// (`string-editor`, `date range`)
fn literal_word() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_-]{0,7}",
        "(string|number|date|any)[-_ ][a-z0-9]{1,5}",
        "[a-z]{1,5} [a-z0-9]{1,5}",
    ]
    .prop_filter("not a base kind", |s| BaseKind::from_name(s).is_none())
    .prop_filter("no nested conditional", |s| {
        !s.split(' ').any(|word| word == "when")
    })
}

fn base_type() -> impl Strategy<Value = String> {
    let plain = prop_oneof![
        Just("boolean".to_string()),
        Just("date".to_string()),
        Just("object".to_string()),
        Just("record".to_string()),
        Just("any".to_string()),
    ];
    let ranged = (
        prop_oneof![Just("string"), Just("number")],
        proptest::option::of(range_text()),
    )
        .prop_map(|(name, range)| format!("{}{}", name, range.unwrap_or_default()));
    let regex = (
        prop_oneof![Just("^[a-z]+$"), Just("\\d{3}"), Just("^a.b$"), Just("x|y")],
        prop_oneof![Just(""), Just("i"), Just("ms")],
    )
        .prop_map(|(source, flags)| format!("string(/{}/{})", source, flags));

    let base = prop_oneof![plain, ranged, regex];
    (
        base,
        proptest::option::of(proptest::option::of(range_text())),
    )
        .prop_map(|(base, array)| match array {
            None => base,
            Some(None) => format!("{}[]", base),
            Some(Some(count)) => format!("{}[]{}", base, count),
        })
}

fn type_string() -> impl Strategy<Value = String> {
    let union = prop::collection::vec(
        prop_oneof![literal_word(), base_type()],
        2..5,
    )
    .prop_map(|members| members.join("|"));
    let constant = prop_oneof![number_text(), literal_word(), Just("true".to_string())]
        .prop_map(|literal| format!("={}", literal));

    (prop_oneof![base_type(), union, constant], any::<bool>())
        .prop_map(|(body, optional)| if optional { format!("{}?", body) } else { body })
}

fn condition() -> impl Strategy<Value = String> {
    let field = "[a-z]{1,6}".prop_map(|s| format!("f_{}", s));
    let predicate = (
        field,
        prop_oneof![
            Just("="), Just("!="), Just(">="), Just(">"), Just("<"),
            Just(" exists"), Just("!empty"), Just(" in "), Just(" contains "),
        ],
        "[a-z0-9]{1,6}",
    )
        .prop_map(|(field, op, value)| {
            if op == " exists" || op == "!empty" {
                format!("{}{}", field, op)
            } else if op == " in " {
                format!("{}{}({},x)", field, op, value)
            } else {
                format!("{}{}{}", field, op, value)
            }
        });
    prop::collection::vec(predicate, 1..4).prop_map(|parts| parts.join(" && "))
}

proptest! {
    #[test]
    fn type_strings_reserialise_idempotently(input in type_string()) {
        let parsed = parse_type(&input).unwrap();
        let printed = parsed.to_string();
        let reparsed = parse_type(&printed).unwrap();
        prop_assert_eq!(&reparsed, &parsed);
        prop_assert_eq!(reparsed.to_string(), printed);
    }

    #[test]
    fn conditionals_reserialise_idempotently(
        cond in condition(),
        then_type in type_string(),
        else_type in type_string(),
        inner_cond in condition(),
        nested in any::<bool>(),
    ) {
        let else_text = if nested {
            format!("when {} *? {} : {}", inner_cond, then_type, else_type)
        } else {
            else_type
        };
        let input = format!("when {} *? {} : {}", cond, then_type, else_text);
        let parsed = parse_descriptor(&input).unwrap();
        let reparsed = parse_descriptor(&parsed.to_string()).unwrap();
        prop_assert_eq!(reparsed, parsed);
    }
}
