#![no_main]

//! Level parser fuzzer.
//!
//! Arbitrary text must either fail to load with a `LoadError` or produce a
//! level whose state invariants hold and whose rendering loads again.

use konkr::game::check_invariants;
use konkr::{GameConfig, LevelTable, parse_level, render_ascii};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(level) = parse_level(source, GameConfig::default(), LevelTable::default()) else {
        return;
    };

    let violations = check_invariants(&level);
    assert!(violations.is_empty(), "invariants violated: {violations:?}");

    // Holes and neutral sand render as cells the parser skips, so only
    // owned boards are required to load again.
    let rendered = render_ascii(&level);
    if !rendered.contains(['?', '.']) {
        assert!(
            parse_level(&rendered, GameConfig::default(), LevelTable::default()).is_ok(),
            "rendered level failed to parse:\n{rendered}"
        );
    }
});
