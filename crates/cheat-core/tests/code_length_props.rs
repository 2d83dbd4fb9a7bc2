// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property tests for code sanitization and the group-length rule.
#![allow(clippy::unwrap_used)]

use cheat_core::{
    sanitize_code, sanitized_len, Cheat, CheatError, CheatFormat, CheatId, CheatType,
    CheatValidator, GameId,
};
use proptest::prelude::*;

fn code_with_breaks() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[0-9A-F \n\r-]{0,64}").unwrap()
}

proptest! {
    #[test]
    fn sanitize_is_idempotent(code in code_with_breaks()) {
        let once = sanitize_code(&code);
        prop_assert_eq!(sanitize_code(&once), once.clone());
        prop_assert!(!once.contains('\n') && !once.contains('\r'));
    }

    #[test]
    fn sanitize_preserves_non_break_order(code in code_with_breaks()) {
        let kept: String = code.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        prop_assert_eq!(sanitize_code(&code), kept);
        prop_assert_eq!(sanitized_len(&code), sanitize_code(&code).chars().count());
    }

    #[test]
    fn length_rule_matches_modulo(code in code_with_breaks(), group in 1usize..=17) {
        let pattern = "X".repeat(group);
        let format = CheatFormat::new("p", CheatType::GameShark, pattern).unwrap();
        let store: Vec<Cheat> = Vec::new();
        let candidate = Cheat::new(CheatId(1), "n", code.clone(), GameId::new("g"), CheatType::GameShark);
        let result = CheatValidator::new(&format, &store).validate(&candidate);
        if sanitized_len(&code) % group == 0 {
            prop_assert_eq!(result, Ok(()));
        } else {
            prop_assert_eq!(result, Err(CheatError::InvalidCode));
        }
    }

    #[test]
    fn self_never_conflicts(name in "[a-zA-Z ]{1,16}", units in 0usize..4) {
        let format = CheatFormat::new("p", CheatType::GameShark, "XXXXXXXX").unwrap();
        let code = "DEADBEEF\n".repeat(units);
        let stored = Cheat::new(CheatId(11), name, code, GameId::new("g"), CheatType::GameShark);
        let store = vec![stored.clone()];
        prop_assert_eq!(CheatValidator::new(&format, &store).validate(&stored), Ok(()));
    }
}
