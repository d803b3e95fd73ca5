//! Geocode a free-text address and print the classified fields.
//!
//! ```text
//! GEOCODE_API_KEY=... cargo run --example lookup_address -- "100 Main St Springfield IL" 62701
//! ```

use geocode_fields::{AddressFields, FieldMap, FieldWriter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let address = args.next().unwrap_or_default();
    let zip = args.next();

    let fields = AddressFields::new()?;

    match fields.lookup(&address, zip.as_deref()).await {
        Ok(parsed) => {
            for (field, value) in parsed.fields() {
                println!("{:>16}: {}", field.label(), value);
            }

            let mut form = FieldMap::new();
            form.write(&parsed);
            println!("\nForm fields: {:?}", form.values());
        }
        Err(e) => {
            println!("{}", e.user_message());
        }
    }

    let summary = fields.stats().summary();
    println!(
        "\nLookups: {}, average geocode time: {:?}",
        summary.lookups, summary.average_geocode_time
    );
    Ok(())
}
