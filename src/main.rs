use std::{env, fs, process};

use rpal_lang::error::Error;

fn usage() -> ! {
    println!("Usage:\n  rpal [-l] [-ast] [-st] <filename>");
    process::exit(1);
}

fn throw(error: Box<dyn Error>) -> ! {
    error.throw();
    process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage();
    }

    let filename = &args[args.len() - 1];
    let flags = &args[1..args.len() - 1];

    if flags.iter().any(|flag| !matches!(flag.as_str(), "-l" | "-ast" | "-st")) {
        usage();
    }

    let source = match fs::read_to_string(filename) {
        Ok(source) => source,
        Err(_) => {
            eprintln!("Error: File '{filename}' not found.");
            process::exit(1);
        },
    };

    // Without flags the program runs; the result is emitted only if it
    // called Print.
    if flags.is_empty() {
        match rpal_lang::interpret(&source) {
            Ok(result) if result.printed => println!("{}", result.value),
            Ok(_) => {},
            Err(error) => throw(error),
        }
        return;
    }

    let has = |flag: &str| flags.iter().any(|f| f == flag);

    if has("-l") {
        println!("{source}");
        println!();
    }

    if has("-ast") || has("-st") {
        let tree = match rpal_lang::parse(&source) {
            Ok(tree) => tree,
            Err(error) => throw(error),
        };

        if has("-ast") {
            print!("{}", tree.render());
            println!();
        }

        if has("-st") {
            let standard = rpal_lang::standardize(tree);
            print!("{}", standard.render());
            println!();
        }
    }
}
