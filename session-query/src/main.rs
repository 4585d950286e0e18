use session_query::{build_query, FieldRegistry};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <query string>", args[0]);
        std::process::exit(1);
    }
    let registry = FieldRegistry::builtin();
    match build_query(&registry, &args[1], None) {
        Ok(query) => println!(
            "{}",
            query.to_json().expect("Failed to serialize query")
        ),
        Err(e) => {
            eprintln!("Invalid query: {}", e);
            std::process::exit(1);
        }
    }
}
