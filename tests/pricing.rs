use chrono::Utc;
use uuid::Uuid;

use bizhub_api::models::{PaymentStatus, Product, ProductCategory};
use bizhub_api::services::pricing::{
    SelectedProduct, basket_total, effective_unit_price, filter_products, outstanding,
    payment_status_for,
};

fn product(name: &str, price: i64, gen_price: Option<i64>, favorite: bool) -> Product {
    let now = Utc::now();
    let owner = Uuid::new_v4();
    Product {
        id: Uuid::new_v4(),
        product_name: name.to_string(),
        category: ProductCategory::Service,
        price,
        gen_price,
        stock: None,
        favorite,
        created_by: owner,
        created_at: now,
        updated_by: owner,
        updated_at: now,
    }
}

#[test]
fn filter_matches_case_insensitively() {
    let products = vec![
        product("Photocopy Per Page", 5000, None, false),
        product("Lamination", 50000, None, false),
    ];
    let filtered = filter_products("photo", &products);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].product_name, "Photocopy Per Page");
}

#[test]
fn favorites_lead_and_order_is_otherwise_stable() {
    let products = vec![
        product("Binding A", 100, None, false),
        product("Binding B", 100, None, true),
        product("Binding C", 100, None, false),
        product("Binding D", 100, None, true),
    ];
    let filtered = filter_products("binding", &products);
    let names: Vec<&str> = filtered.iter().map(|p| p.product_name.as_str()).collect();
    // All favorited matches ahead of all non-favorited, insertion order kept
    // within each group.
    assert_eq!(names, vec!["Binding B", "Binding D", "Binding A", "Binding C"]);
}

#[test]
fn empty_filter_returns_everything() {
    let products = vec![
        product("Photocopy", 5000, None, false),
        product("Lamination", 50000, None, true),
    ];
    assert_eq!(filter_products("", &products).len(), 2);
}

#[test]
fn custom_price_beats_generator_price() {
    let p = product("Printing", 10000, Some(15000), false);
    assert_eq!(effective_unit_price(&p, Some(12000), true), 12000);
}

#[test]
fn generator_price_applies_only_while_toggle_is_on() {
    let p = product("Printing", 10000, Some(15000), false);
    assert_eq!(effective_unit_price(&p, None, true), 15000);
    assert_eq!(effective_unit_price(&p, None, false), 10000);
}

#[test]
fn base_price_when_no_generator_price_defined() {
    let p = product("Printing", 10000, None, false);
    assert_eq!(effective_unit_price(&p, None, true), 10000);
}

#[test]
fn basket_total_sums_effective_prices() {
    let plain = product("Photocopy", 5000, None, false);
    let powered = product("Printing", 10000, Some(15000), false);
    let selection = vec![
        SelectedProduct {
            product: &plain,
            quantity: 4,
            custom_price: None,
        },
        SelectedProduct {
            product: &powered,
            quantity: 2,
            custom_price: None,
        },
        SelectedProduct {
            product: &powered,
            quantity: 1,
            custom_price: Some(9000),
        },
    ];
    // 4*5000 + 2*15000 + 1*9000
    assert_eq!(basket_total(&selection, true), 59000);
    // 4*5000 + 2*10000 + 1*9000
    assert_eq!(basket_total(&selection, false), 49000);
}

#[test]
fn outstanding_may_be_negative() {
    assert_eq!(outstanding(1000, 1500), -500);
    assert_eq!(outstanding(1000, 400), 600);
    assert_eq!(outstanding(1000, 1000), 0);
}

#[test]
fn status_is_paid_only_at_zero_balance() {
    assert_eq!(payment_status_for(0), PaymentStatus::Paid);
    assert_eq!(payment_status_for(600), PaymentStatus::Pending);
    assert_eq!(payment_status_for(-500), PaymentStatus::Pending);
}
