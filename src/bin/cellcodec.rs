//! Cell encoding inspector CLI.
//!
//! Decodes, builds and describes cells from the command line.
//!
//! # Usage
//! ```text
//! cellcodec decode <hex>
//! cellcodec char <literal>
//! cellcodec transfer <nonce> <target> <amount>
//! ```
//!
//! # Commands
//! - `decode`: Decode a hex encoding and describe the cell it holds
//! - `char`: Build a character cell from a literal such as `\a`, `é` or `\newline`
//! - `transfer`: Build a transfer cell to a 20-byte hex address
//!
//! # Examples
//! ```text
//! cellcodec decode 3c61
//! cellcodec char '\space'
//! cellcodec transfer 7 0x00000000000000000000000000000000000000ff 1000
//! ```

use cvm_cell::cell::errors::ParseError;
use cvm_cell::cell::character::CvmChar;
use cvm_cell::cell::{Cell, Value};
use cvm_cell::transactions::transfer::Transfer;
use cvm_cell::types::address::Address;
use cvm_cell::types::blob::Blob;
use cvm_cell::types::encoding::Decode;
use cvm_cell::utils::log::init_from_env;
use cvm_cell::{error, info};
use std::env;
use std::process;

fn main() {
    init_from_env();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage(&args[0]);
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let operands = &args[2..];
    let value = match (args[1].as_str(), operands) {
        ("decode", [hex]) => decode(hex),
        ("char", [literal]) => parse_char(literal).map(Value::from),
        ("transfer", [nonce, target, amount]) => build_transfer(nonce, target, amount),
        ("decode" | "char" | "transfer", _) => {
            error!("Wrong number of arguments for '{}'", args[1]);
            print_usage(&args[0]);
            process::exit(1);
        }
        (other, _) => {
            error!("Unknown command '{other}'");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    match value {
        Ok(value) => describe(&value),
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}

fn decode(hex: &str) -> Result<Value, String> {
    let digits = hex.strip_prefix("0x").unwrap_or(hex);
    let blob = Blob::from_hex(digits).ok_or_else(|| ParseError::InvalidHex(hex.to_string()).to_string())?;
    Value::from_bytes(&blob).map_err(|e| format!("Decoding failed: {e}"))
}

fn parse_char(literal: &str) -> Result<std::sync::Arc<CvmChar>, String> {
    CvmChar::parse(literal).ok_or_else(|| ParseError::InvalidCharacter(literal.to_string()).to_string())
}

fn build_transfer(nonce: &str, target: &str, amount: &str) -> Result<Value, String> {
    let nonce = parse_integer(nonce)?;
    let target = Address::from_hex(target).ok_or_else(|| ParseError::InvalidAddress(target.to_string()).to_string())?;
    let amount = parse_integer(amount)?;
    Ok(Value::from(Transfer::create(nonce, target, amount)))
}

fn parse_integer(s: &str) -> Result<i64, String> {
    s.parse::<i64>()
        .map_err(|_| ParseError::InvalidInteger(s.to_string()).to_string())
}

fn describe(value: &Value) {
    let kind = match value {
        Value::Char(_) => "char",
        Value::Transfer(_) => "transfer",
    };
    info!("Decoded {kind} cell");
    println!("type:     {kind}");
    println!("encoding: {}", value.encoding());
    println!("hash:     0x{}", value.hash());
    println!("printed:  {}", value.print_default());
    if let Some(transfer) = value.as_transfer() {
        println!("edn:      {}", transfer.edn_string());
    }
    match value.validate() {
        Ok(()) => println!("valid:    yes"),
        Err(e) => {
            println!("valid:    no ({e})");
            process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  decode <hex>                        Decode a cell encoding");
    eprintln!("  char <literal>                      Build a character cell");
    eprintln!("  transfer <nonce> <target> <amount>  Build a transfer cell");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CVM_LOG=debug|info|warn|error       Log level (default info)");
    eprintln!("  CVM_LOG_TIMESTAMP=0|1               Timestamp log lines (default 1)");
}
