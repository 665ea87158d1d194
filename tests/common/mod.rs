#[macro_export]
macro_rules! tests {
    ($file:ident in $scope:ident is OK $($expected:expr)*) => {
        #[test]
        fn $file() {
            use assert_cmd::Command;

            let lines: Vec<&str> = vec![$($expected),*];

            // if exists, concat expected lines with new lines
            let expected = match lines.len() {
                0 => String::new(),
                _ => {
                    // add empty string to end to add new line to end of output
                    let mut lines = lines;
                    lines.push("");
                    lines.join("\n")
                }
            };

            let file = format!("tests/target/{}/{}.rpal", stringify!($scope), stringify!($file));

            Command::cargo_bin("rpal").unwrap()
                .arg(file)
                .assert()
                .success()
                .stdout(expected);
        }
    };

    ($file:ident in $scope:ident is ERR $($expected:expr)+) => {
        #[test]
        fn $file() {
            use assert_cmd::Command;

            // output concats expected with new line
            let output = vec![$($expected),+].join("\n");
            let file = format!("tests/target/{}/{}.rpal", stringify!($scope), stringify!($file));

            Command::cargo_bin("rpal").unwrap()
                .arg(file)
                .assert()
                .stderr(format!("{output}\n"))
                .failure();
        }
    };
}
