//! Sample listings loaded by the `seed` binary.

use super::ListingInput;

fn sample(title: &str, description: &str, price: f64, location: &str, country: &str) -> ListingInput {
    ListingInput {
        title: title.to_string(),
        description: description.to_string(),
        price,
        location: location.to_string(),
        country: country.to_string(),
    }
}

pub fn sample_listings() -> Vec<ListingInput> {
    vec![
        sample(
            "Cozy Beachfront Cottage",
            "Escape to this charming beachfront cottage for a relaxing getaway.",
            1500.0,
            "Malibu",
            "United States",
        ),
        sample(
            "Modern Loft in Downtown",
            "Stay in the heart of the city in this stylish loft apartment.",
            1200.0,
            "New York City",
            "United States",
        ),
        sample(
            "Mountain Retreat",
            "Unplug and unwind in this peaceful mountain cabin.",
            1000.0,
            "Aspen",
            "United States",
        ),
        sample(
            "Historic Villa in Tuscany",
            "Experience the charm of Tuscany in this beautifully restored villa.",
            2500.0,
            "Florence",
            "Italy",
        ),
        sample(
            "Secluded Treehouse Getaway",
            "Live among the treetops in this unique treehouse retreat.",
            800.0,
            "Portland",
            "United States",
        ),
        sample(
            "Beachfront Paradise",
            "Step out of your door onto the sandy beach.",
            2000.0,
            "Cancun",
            "Mexico",
        ),
        sample(
            "My new Villa",
            "By the beach",
            1200.0,
            "Calangute, Goa",
            "India",
        ),
        sample(
            "Canal-side Apartment",
            "Watch the boats go by from a bright apartment on the canal.",
            1800.0,
            "Amsterdam",
            "Netherlands",
        ),
    ]
}
