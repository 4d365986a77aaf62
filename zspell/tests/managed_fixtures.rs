//! Runs every `.test` fixture under `tests/managed/` through `TestManager`.

use zspell_test_util::TestManager;

fn run(fname: &str) {
    let mgr = TestManager::new_from_file(fname);
    let dict = mgr.build_dict();
    mgr.check_all(&dict);
}

#[test]
fn english() {
    run("english.test");
}

#[test]
fn compound_rule() {
    run("compound_rule.test");
}

#[test]
fn german_sharps() {
    run("german_sharps.test");
}

#[test]
fn en_za_phone() {
    run("en_za_phone.test");
}

#[test]
fn alot_twowords() {
    run("alot_twowords.test");
}

#[test]
fn break_hyphen() {
    run("break_hyphen.test");
}
