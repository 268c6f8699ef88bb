use crate::cli::OutputFormat;
use crate::core::alphabet::{Alphabet, DNA, RNA};

pub fn run(format: OutputFormat) -> anyhow::Result<()> {
    let alphabets: [&Alphabet; 2] = [&DNA, &RNA];

    match format {
        OutputFormat::Text => {
            for alphabet in alphabets {
                println!("{} alphabet ({})", alphabet.name(), alphabet.kind());
                for symbol in alphabet.symbols() {
                    println!(
                        "  Actual symbol: {}, complementary symbol: {}",
                        symbol.actual, symbol.complementary
                    );
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&alphabets)?),
        OutputFormat::Tsv => {
            println!("alphabet\tactual\tcomplementary");
            for alphabet in alphabets {
                for symbol in alphabet.symbols() {
                    println!(
                        "{}\t{}\t{}",
                        alphabet.name(),
                        symbol.actual,
                        symbol.complementary
                    );
                }
            }
        }
    }

    Ok(())
}
