//! A small interactive shell over a `Bimap<i64, String>`.
//!
//! Reads whitespace separated commands from stdin, one per line:
//! ```text
//! insert 1 one       add a pair
//! left 1             the right key paired with 1
//! right one          the left key paired with "one"
//! erase-left 1       remove by left key
//! erase-right one    remove by right key
//! bound 5            the first pair with a left key not less than 5
//! list               every pair, in left order
//! rlist              every pair, in right order
//! len
//! quit
//! ```
//! Set `RUST_LOG=trace` to see what the map is doing.

use std::io::Write;

use bitreap::{Bimap, Builder};
use text_io::try_read;

type Map = Bimap<i64, String>;

fn read_left() -> Option<i64> {
    match try_read!() {
        Ok(left) => Some(left),
        Err(e) => {
            println!("expected a number: {}", e);
            None
        }
    }
}

fn read_right() -> Option<String> {
    try_read!().ok()
}

fn run(map : &mut Map, command : &str) -> bool {
    match command {
        "insert" => {
            if let (Some(left), Some(right)) = (read_left(), read_right()) {
                if map.insert(left, right).is_end() {
                    println!("not inserted: a key is taken");
                }
            }
        },
        "left" => if let Some(left) = read_left() {
            match map.at_left(&left) {
                Ok(right) => println!("{}", right),
                Err(e) => println!("{}", e),
            }
        },
        "right" => if let Some(right) = read_right() {
            match map.at_right(&right) {
                Ok(left) => println!("{}", left),
                Err(e) => println!("{}", e),
            }
        },
        "erase-left" => if let Some(left) = read_left() {
            if !map.remove_left(&left) {
                println!("no such left key");
            }
        },
        "erase-right" => if let Some(right) = read_right() {
            if !map.remove_right(&right) {
                println!("no such right key");
            }
        },
        "bound" => if let Some(left) = read_left() {
            let cursor = map.lower_bound_left(&left);
            if cursor.is_end() {
                println!("end");
            } else {
                let (left, right) = map.pair(cursor);
                println!("{} {}", left, right);
            }
        },
        "list" => for (left, right) in map.iter_left() {
            println!("{} {}", left, right);
        },
        "rlist" => for (right, left) in map.iter_right() {
            println!("{} {}", right, left);
        },
        "len" => println!("{}", map.len()),
        "quit" => return false,
        other => println!("unknown command {:?}", other),
    }
    true
}

pub fn main() {
    env_logger::init();
    let mut map = Builder::new().build();

    loop {
        print!("> ");
        let _ = std::io::stdout().flush();
        let command : String = match try_read!() {
            Ok(command) => command,
            // end of input
            Err(_) => break,
        };
        if !run(&mut map, &command) {
            break;
        }
    }
    map.assert_correctness();
}
