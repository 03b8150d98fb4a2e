// tests/properties.rs

use proptest::prelude::*;

use actrun::exec::build_run_command;
use actrun::output::parse_outputs;
use actrun::types::RunPaths;
use actrun_test_utils::builders::ActionSpecBuilder;

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,12}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,24}"
}

proptest! {
    #[test]
    fn parse_is_idempotent(text in "(.{0,40}\n){0,20}") {
        prop_assert_eq!(parse_outputs(text.as_bytes()), parse_outputs(text.as_bytes()));
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = parse_outputs(&bytes);
    }

    #[test]
    fn last_declaration_wins_for_every_key(
        decls in proptest::collection::vec((key_strategy(), value_strategy()), 1..20)
    ) {
        let mut captured = String::new();
        for (k, v) in &decls {
            captured.push_str(&format!("[step] ::set-output::{k}={v}\n"));
        }
        let record = parse_outputs(captured.as_bytes());

        for (k, _) in &decls {
            let last = decls.iter().rev().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
            prop_assert_eq!(record.get(k), last);
        }
    }

    #[test]
    fn actor_flag_is_followed_by_actor(actor in "[A-Za-z0-9-]{0,16}") {
        let spec = ActionSpecBuilder::new("a@v1").actor(&actor).build();
        let cmd = build_run_command("act", &spec, &RunPaths::default());

        if actor.is_empty() {
            prop_assert!(!cmd.has_flag("--actor"));
        } else {
            prop_assert_eq!(cmd.flag_value("--actor"), Some(actor.as_str()));
        }
    }
}
