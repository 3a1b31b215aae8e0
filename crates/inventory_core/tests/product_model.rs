use inventory_core::{Category, ParseCategoryError, ProductInput, ProductValidationError};
use std::str::FromStr;

#[test]
fn input_new_sets_defaults() {
    let input = ProductInput::new("Clean Code", 65.9, 30, Category::Books);

    assert_eq!(input.description, "");
    assert!(input.active);
    assert!(input.validate().is_ok());
}

#[test]
fn validate_counts_name_chars_after_trimming() {
    let short = ProductInput::new("  a  ", 1.0, 1, Category::Other);
    assert_eq!(
        short.validate().unwrap_err(),
        ProductValidationError::NameLength { chars: 1 }
    );

    let long = ProductInput::new("x".repeat(101), 1.0, 1, Category::Other);
    assert_eq!(
        long.validate().unwrap_err(),
        ProductValidationError::NameLength { chars: 101 }
    );

    let multibyte = ProductInput::new("ç".repeat(100), 1.0, 1, Category::Other);
    assert!(multibyte.validate().is_ok());
}

#[test]
fn validate_rejects_long_description() {
    let input = ProductInput::new("Sofa", 1.0, 1, Category::Home).with_description("d".repeat(501));
    assert_eq!(
        input.validate().unwrap_err(),
        ProductValidationError::DescriptionTooLong { chars: 501 }
    );
}

#[test]
fn validate_rejects_negative_and_non_finite_prices() {
    for price in [-0.01, f64::NAN, f64::INFINITY] {
        let input = ProductInput::new("Sofa", price, 1, Category::Home);
        assert!(matches!(
            input.validate(),
            Err(ProductValidationError::InvalidPrice(_))
        ));
    }
    assert!(ProductInput::new("Gift", 0.0, 1, Category::Other)
        .validate()
        .is_ok());
}

#[test]
fn category_tokens_round_trip_through_from_str() {
    for category in Category::ALL {
        assert_eq!(Category::from_str(category.as_str()), Ok(category));
    }
    assert_eq!(" Electronics ".parse::<Category>(), Ok(Category::Electronics));
    assert_eq!(
        "gadgets".parse::<Category>(),
        Err(ParseCategoryError("gadgets".to_string()))
    );
}

#[test]
fn category_serializes_as_lowercase_token() {
    let json = serde_json::to_value(Category::Automotive).unwrap();
    assert_eq!(json, "automotive");
}

#[test]
fn input_deserialization_defaults_active_to_true() {
    let value = serde_json::json!({
        "name": "Lego Set",
        "description": "",
        "price": 49.5,
        "quantity": 3,
        "category": "toys"
    });

    let input: ProductInput = serde_json::from_value(value).unwrap();
    assert!(input.active);
    assert_eq!(input.category, Category::Toys);
}
