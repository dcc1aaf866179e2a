//! Shared hierarchy used across unit tests

use crate::hierarchy::{ScopeDeclaration, ScopeItem};

/// `admin → {app, user → {group-one, group-two, group-three → {...}}}`, `grandma`,
/// `grandpa → {dad}`
pub(crate) fn scope_options() -> ScopeDeclaration {
    ScopeDeclaration::new(vec![
        ScopeItem::nested(
            "admin",
            vec![
                ScopeItem::nested("app", vec![]),
                ScopeItem::nested(
                    "user",
                    vec![
                        "group-one".into(),
                        "group-two".into(),
                        ScopeItem::nested(
                            "group-three",
                            vec![
                                "group-three-one".into(),
                                ScopeItem::nested("group-three-two", vec![]),
                            ],
                        ),
                    ],
                ),
            ],
        ),
        "grandma".into(),
        ScopeItem::nested("grandpa", vec!["dad".into()]),
    ])
}
