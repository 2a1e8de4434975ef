use tally_parser::parse_file;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let filename = std::env::args().nth(1).ok_or("filename argument")?;
    let ledger = parse_file(filename)?;

    println!(
        "{} accounts, {} commodities, {} transactions, {} prices, {} balances",
        ledger.accounts().count(),
        ledger.commodities().count(),
        ledger.transactions().len(),
        ledger.prices().len(),
        ledger.balances().len()
    );
    for error in ledger.errors() {
        println!("error: {}", error);
    }
    for problem in ledger.validate() {
        println!("invalid: {}", problem);
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        println!("Error: {}", e);
    }
}
