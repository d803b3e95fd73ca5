//! Classify canned geocoder payloads without touching the network.

use geocode_fields::{Template, ValueForm, classify_outcome, extract};

const PAYLOADS: &[&str] = &[
    r#"{
        "results": [{ "address_components": [
            { "long_name": "100", "short_name": "100", "types": ["street_number"] },
            { "long_name": "Main Street", "short_name": "Main St", "types": ["route"] },
            { "long_name": "Springfield", "short_name": "Springfield", "types": ["locality", "political"] },
            { "long_name": "Sangamon County", "short_name": "Sangamon County", "types": ["administrative_area_level_2", "political"] },
            { "long_name": "Illinois", "short_name": "IL", "types": ["administrative_area_level_1", "political"] },
            { "long_name": "United States", "short_name": "US", "types": ["country", "political"] },
            { "long_name": "62701", "short_name": "62701", "types": ["postal_code"] },
            { "long_name": "1234", "short_name": "1234", "types": ["postal_code_suffix"] }
        ] }],
        "status": "OK"
    }"#,
    r#"{ "results": [], "status": "ZERO_RESULTS" }"#,
    r#"{ "results": [{ "address_components": [
            { "long_name": "Springfield", "short_name": "Springfield", "types": ["locality"] },
            { "long_name": "United States", "short_name": "US", "types": ["country"] }
        ] }], "status": "OK" }"#,
];

fn main() {
    for (i, payload) in PAYLOADS.iter().enumerate() {
        println!("Payload {}", i + 1);

        let outcome = match extract(payload, ValueForm::Short) {
            Ok(outcome) => outcome,
            Err(e) => {
                println!("  {}", e.user_message());
                continue;
            }
        };

        let template = Template::for_components(&outcome.components);
        println!(
            "  status: {}, components: {}, template: {}",
            outcome.status,
            outcome.components.len(),
            template.name()
        );

        match classify_outcome(outcome) {
            Ok(parsed) => {
                for (field, value) in parsed.fields() {
                    println!("  {:>16}: {}", field.label(), value);
                }
            }
            Err(e) => println!("  {}", e.user_message().replace('\n', "\n  ")),
        }
    }
}
