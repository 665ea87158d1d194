use assert_cmd::Command;

const SIMPLE: &str = "tests/target/flags/simple.rpal";

const SIMPLE_AST: &str = "\
let
.=
..<ID:x>
..<INT:5>
.gamma
..<ID:Print>
..<ID:x>
";

const SIMPLE_ST: &str = "\
gamma
.lambda
..<ID:x>
..gamma
...<ID:Print>
...<ID:x>
.<INT:5>
";

#[test]
fn no_flags_runs_the_program() {
    Command::cargo_bin("rpal").unwrap()
        .arg(SIMPLE)
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn l_flag_prints_the_source_without_running() {
    Command::cargo_bin("rpal").unwrap()
        .args(["-l", SIMPLE])
        .assert()
        .success()
        .stdout("let x = 5 in Print x\n\n");
}

#[test]
fn ast_flag_prints_the_tree_without_running() {
    Command::cargo_bin("rpal").unwrap()
        .args(["-ast", SIMPLE])
        .assert()
        .success()
        .stdout(format!("{SIMPLE_AST}\n"));
}

#[test]
fn st_flag_prints_the_standardized_tree() {
    Command::cargo_bin("rpal").unwrap()
        .args(["-st", SIMPLE])
        .assert()
        .success()
        .stdout(format!("{SIMPLE_ST}\n"));
}

#[test]
fn ast_and_st_flags_print_both_trees() {
    Command::cargo_bin("rpal").unwrap()
        .args(["-ast", "-st", SIMPLE])
        .assert()
        .success()
        .stdout(format!("{SIMPLE_AST}\n{SIMPLE_ST}\n"));
}

#[test]
fn l_flag_combines_with_ast() {
    Command::cargo_bin("rpal").unwrap()
        .args(["-l", "-ast", SIMPLE])
        .assert()
        .success()
        .stdout(format!("let x = 5 in Print x\n\n{SIMPLE_AST}\n"));
}

#[test]
fn unrecognized_flag_shows_usage() {
    Command::cargo_bin("rpal").unwrap()
        .args(["-x", SIMPLE])
        .assert()
        .failure()
        .stdout("Usage:\n  rpal [-l] [-ast] [-st] <filename>\n");
}

#[test]
fn no_arguments_shows_usage() {
    Command::cargo_bin("rpal").unwrap()
        .assert()
        .failure()
        .stdout("Usage:\n  rpal [-l] [-ast] [-st] <filename>\n");
}

#[test]
fn missing_file_is_an_error() {
    Command::cargo_bin("rpal").unwrap()
        .arg("tests/target/flags/nope.rpal")
        .assert()
        .failure()
        .stderr("Error: File 'tests/target/flags/nope.rpal' not found.\n");
}
