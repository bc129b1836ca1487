//! Server-rendered pages.
//!
//! Deliberately plain HTML. Every user-supplied value goes through `escape`.

use crate::domain::model::{Listing, ListingDetail, Review};
use axum::http::StatusCode;
use std::fmt::Write;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Whole amounts get thousands separators (`1,200`), anything else two decimals.
pub fn format_price(price: f64) -> String {
    if price.fract() != 0.0 || price.abs() >= 1e15 {
        return format!("{:.2}", price);
    }
    let digits = format!("{}", price.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if price < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Wanderlust</title>
</head>
<body>
<nav><a href="/listings">Explore</a> | <a href="/listings/new">Add new listing</a></nav>
<main>
{body}
</main>
<footer>&copy; Wanderlust</footer>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

pub fn index_page(listings: &[Listing]) -> String {
    let mut body = String::from("<h3>All Listings</h3>\n<ul class=\"listings\">\n");
    for listing in listings {
        let _ = writeln!(
            body,
            "<li><a href=\"/listings/{id}\"><b>{title}</b></a> &middot; &#8377; {price} / night &middot; {location}, {country}</li>",
            id = listing.id,
            title = escape(&listing.title),
            price = format_price(listing.price),
            location = escape(&listing.location),
            country = escape(&listing.country),
        );
    }
    body.push_str("</ul>");
    layout("All Listings", &body)
}

fn listing_fields(listing: Option<&Listing>) -> String {
    let (title, description, price, location, country) = match listing {
        Some(l) => (
            escape(&l.title),
            escape(&l.description),
            l.price.to_string(),
            escape(&l.location),
            escape(&l.country),
        ),
        None => Default::default(),
    };
    format!(
        r#"<label>Title <input name="listing[title]" value="{title}" required></label>
<label>Description <textarea name="listing[description]" required>{description}</textarea></label>
<label>Price <input name="listing[price]" type="number" min="0" value="{price}" required></label>
<label>Location <input name="listing[location]" value="{location}" required></label>
<label>Country <input name="listing[country]" value="{country}" required></label>
"#
    )
}

pub fn new_page() -> String {
    let body = format!(
        "<h3>Create a New Listing</h3>\n<form method=\"POST\" action=\"/listings\">\n{}<button>Add</button>\n</form>",
        listing_fields(None)
    );
    layout("New Listing", &body)
}

pub fn edit_page(listing: &Listing) -> String {
    let body = format!(
        "<h3>Edit your Listing</h3>\n<form method=\"POST\" action=\"/listings/{id}?_method=PUT\">\n{fields}<button>Edit</button>\n</form>",
        id = listing.id,
        fields = listing_fields(Some(listing)),
    );
    layout("Edit Listing", &body)
}

fn review_card(listing: &Listing, review: &Review) -> String {
    format!(
        r#"<div class="review">
<p class="rating">{rating} stars</p>
<p>{comment}</p>
<p><small>{created}</small></p>
<form method="POST" action="/listings/{listing_id}/reviews/{review_id}?_method=DELETE"><button>Delete</button></form>
</div>
"#,
        rating = review.rating,
        comment = escape(&review.comment),
        created = review.created_at.format("%Y-%m-%d %H:%M UTC"),
        listing_id = listing.id,
        review_id = review.id,
    )
}

pub fn show_page(detail: &ListingDetail) -> String {
    let listing = &detail.listing;
    let mut body = format!(
        r#"<h3>{title}</h3>
<p>{description}</p>
<p>&#8377; {price} / night</p>
<p>{location}, {country}</p>
<a href="/listings/{id}/edit">Edit</a>
<form method="POST" action="/listings/{id}?_method=DELETE"><button>Delete</button></form>
<hr>
<h4>Leave a Review</h4>
<form method="POST" action="/listings/{id}/reviews">
<label>Rating <input name="review[rating]" type="range" min="1" max="5" value="3"></label>
<label>Comment <textarea name="review[comment]" required></textarea></label>
<button>Submit</button>
</form>
<hr>
<h4>All Reviews</h4>
"#,
        title = escape(&listing.title),
        description = escape(&listing.description),
        price = format_price(listing.price),
        location = escape(&listing.location),
        country = escape(&listing.country),
        id = listing.id,
    );
    for review in &detail.reviews {
        body.push_str(&review_card(listing, review));
    }
    layout(&listing.title, &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<div class=\"alert\"><h4>{code}</h4><p>{message}</p></div>",
        code = status.as_u16(),
        message = escape(message),
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ListingInput, ReviewInput};

    fn listing(title: &str) -> Listing {
        Listing::new(ListingInput {
            title: title.into(),
            description: "Woods".into(),
            price: 1200.0,
            location: "Aspen".into(),
            country: "USA".into(),
        })
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn prices_are_grouped() {
        assert_eq!(format_price(0.0), "0");
        assert_eq!(format_price(100.0), "100");
        assert_eq!(format_price(1200.0), "1,200");
        assert_eq!(format_price(1_200_000_000_000.0), "1,200,000,000,000");
        assert_eq!(format_price(99.5), "99.50");
    }

    #[test]
    fn index_links_every_listing() {
        let a = listing("Cabin");
        let b = listing("<Lodge>");
        let html = index_page(&[a.clone(), b.clone()]);
        assert!(html.contains(&format!("/listings/{}", a.id)));
        assert!(html.contains(&format!("/listings/{}", b.id)));
        assert!(html.contains("&lt;Lodge&gt;"));
        assert!(!html.contains("<Lodge>"));
    }

    #[test]
    fn edit_form_overrides_to_put() {
        let l = listing("Cabin");
        let html = edit_page(&l);
        assert!(html.contains(&format!("action=\"/listings/{}?_method=PUT\"", l.id)));
        assert!(html.contains("value=\"Cabin\""));
        assert!(html.contains("value=\"1200\""));
    }

    #[test]
    fn show_renders_reviews_with_delete_forms() {
        let mut l = listing("Cabin");
        let review = Review::new(l.id, ReviewInput { rating: 5, comment: "Great".into() });
        l.attach_review(review.id);
        let html = show_page(&ListingDetail {
            listing: l.clone(),
            reviews: vec![review.clone()],
        });
        assert!(html.contains("5 stars"));
        assert!(html.contains("<p>Great</p>"));
        assert!(html.contains(&format!(
            "/listings/{}/reviews/{}?_method=DELETE",
            l.id, review.id
        )));
    }

    #[test]
    fn error_page_shows_status_and_message() {
        let html = error_page(StatusCode::NOT_FOUND, "Listing not found");
        assert!(html.contains("<h4>404</h4>"));
        assert!(html.contains("Listing not found"));
    }
}
