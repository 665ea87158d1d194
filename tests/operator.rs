#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        precedence in operator is OK
        "14"
    }

    tests! {
        division in operator is OK
        "3"
    }

    tests! {
        negative_division in operator is OK
        "-3"
    }

    tests! {
        power in operator is OK
        "32"
    }

    tests! {
        comparison in operator is OK
        "true"
    }

    tests! {
        surface_comparison in operator is OK
        "false"
    }

    tests! {
        logic in operator is OK
        "true"
    }

    tests! {
        unary_minus in operator is OK
        "5"
    }
}
